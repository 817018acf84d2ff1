//! # Toolstrip TUI
//!
//! Terminal front end for the overflow-aware toolbar. Items that fit the
//! measured row are drawn as buttons; the rest collapse into a dropdown
//! opened from a trigger at the end of the row.
//!
//! ## Architecture
//!
//! The TUI follows a component-based architecture: `App` holds the state,
//! components (toolbar, activity pane) route input into it and render from
//! it, and `ui::runtime` drives the event loop.

mod app;
pub mod log_persistence;
mod ui;

use anyhow::Result;
use toolstrip_engine::Measure;
use toolstrip_types::{ItemSpec, ToolbarConfig};

pub use log_persistence::{TUI_LOG_PATH_ENV, open_log_file, resolve_log_path};

/// Runs the interactive toolbar until the user quits.
///
/// # Errors
///
/// Terminal setup, drawing and teardown failures.
pub async fn run(config: ToolbarConfig) -> Result<()> {
    ui::runtime::run_app(config).await
}

/// Natural row width of each configured item, in order, as `(id, width)`.
pub fn measure_items(specs: &[ItemSpec]) -> Vec<(String, u16)> {
    specs
        .iter()
        .map(|spec| {
            let item = ui::components::items::build_item(spec);
            (item.id().to_string(), item.width())
        })
        .collect()
}
