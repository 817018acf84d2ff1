//! Overflow-aware toolbar: items that fit are shown as buttons, the rest are
//! collapsed into a dropdown behind a trigger.

mod dropdown;
mod state;
mod toolbar_component;

pub use dropdown::DropdownState;
pub use state::ToolbarState;
pub use toolbar_component::{OVERFLOW_TRIGGER_TEXT, ToolbarComponent};
