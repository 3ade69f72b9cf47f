use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod app;
pub mod application;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;
pub mod time_utils;

use crate::domain::logging::{get_logger, LogComponent};

/// Entry point: install logging, mount the UI and start the coordinator.
/// The chart bridge calls `chartReady` once its surface is usable.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::init_time_provider(Box::new(
        infrastructure::services::BrowserTimeProvider::new(),
    ));
    domain::logging::init_logger(Box::new(app::LeptosLogger::new()));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        "Annotation UI starting",
    );

    leptos::mount_to_body(app::App);
    spawn_local(application::coordinator::bootstrap());
}
