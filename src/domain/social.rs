use strum::EnumIter;

/// Which reaction control was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Marker class the control carries in the markup.
    pub fn marker_class(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like-btn",
            ReactionKind::Dislike => "dislike-btn",
        }
    }

    /// Resolves the kind from the control's class list. Like wins when both
    /// markers are present.
    pub fn from_classes<'a>(classes: impl Iterator<Item = &'a str>) -> Option<Self> {
        let mut found = None;
        for class in classes {
            if class == "like-btn" {
                return Some(ReactionKind::Like);
            }
            if class == "dislike-btn" {
                found = Some(ReactionKind::Dislike);
            }
        }
        found
    }

    /// Outline and solid variants flipped after a successful request.
    pub fn toggled_classes(&self) -> [&'static str; 2] {
        match self {
            ReactionKind::Like => ["btn-outline-primary", "btn-primary"],
            ReactionKind::Dislike => ["btn-outline-secondary", "btn-secondary"],
        }
    }
}

/// Selector matching every reaction control on a page.
pub fn reaction_selector() -> String {
    use strum::IntoEnumIterator;
    ReactionKind::iter()
        .map(|kind| format!(".{}", kind.marker_class()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Visibility of a comment's replies container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyVisibility {
    Hidden,
    Shown,
}

impl ReplyVisibility {
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden { ReplyVisibility::Hidden } else { ReplyVisibility::Shown }
    }

    /// Label of the toggle for the current state.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ReplyVisibility::Hidden => "Show Replies",
            ReplyVisibility::Shown => "Hide Replies",
        }
    }
}

pub const HIDDEN_CLASS: &str = "d-none";

pub fn replies_container_id(comment_id: &str) -> String {
    format!("replies-{}", comment_id.trim())
}
