use wasm_bindgen::prelude::*;

use crate::application::PageCoordinator;
use crate::config::PageConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

/// Entry point: installs logging, reads the page configuration and mounts
/// the page behaviors once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let document = infrastructure::dom::document().ok();
    let (config, config_error) = PageConfig::load(document.as_ref());

    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(config.log_level)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    if let Some(err) = config_error {
        get_logger().warn(
            LogComponent::Presentation("Initialize"),
            &format!("Ignoring page config, using defaults: {err}"),
        );
    }

    let Some(document) = document else {
        get_logger().error(LogComponent::Presentation("Initialize"), "No document, nothing to mount");
        return;
    };

    let target = document.clone();
    let mounted = infrastructure::dom::on_ready(&document, move || {
        PageCoordinator::new(target, config).mount_all();
    });
    if let Err(err) = mounted {
        get_logger().error(LogComponent::Presentation("Initialize"), &err.to_string());
    }
}
