//! UI components: toolbar, its item adapters, and the activity pane.

pub mod activity;
pub mod component;
pub mod items;
pub mod toolbar;

pub use activity::ActivityComponent;
pub use component::*;
pub use toolbar::ToolbarComponent;
