use wasm_bindgen::JsValue;

/// Every failure the page behaviors can hit. None of them is fatal; they are
/// logged at the component boundary and swallowed.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NetworkError(String),
    ParseError(String),
    DomError(String),
    WidgetError(String),
    RenderingError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
            AppError::DomError(msg) => write!(f, "DOM Error: {}", msg),
            AppError::WidgetError(msg) => write!(f, "Widget Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Wraps a thrown JS value, keeping its string form when it has one.
    pub fn dom(context: &str, value: JsValue) -> Self {
        AppError::DomError(format!("{context}: {}", describe_js(&value)))
    }

    pub fn widget(context: &str, value: JsValue) -> Self {
        AppError::WidgetError(format!("{context}: {}", describe_js(&value)))
    }

    pub fn rendering(context: &str, value: JsValue) -> Self {
        AppError::RenderingError(format!("{context}: {}", describe_js(&value)))
    }
}

fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
