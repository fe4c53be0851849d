//! ShapeForge Application
//!
//! The application shell: windowing, pointer routing, the command panel and
//! the render loop around the core editor.

mod app;
mod ui;

pub use app::{App, AppConfig};
pub use ui::{render_ui, PanelProps, UiAction, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
