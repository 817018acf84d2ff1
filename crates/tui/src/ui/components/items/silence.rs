//! Preset action that creates a silence for the targeted entries.

use super::ActionItem;

pub const SILENCE_TITLE: &str = "Silence";
pub const SILENCE_DESCRIPTION: &str = "Create a silence for target item(s).";
pub const SILENCE_ICON: &str = "🔕";

/// An `ActionItem` with the silence title, description and icon.
pub fn silence_item(id: impl Into<String>) -> ActionItem {
    ActionItem::new(id, SILENCE_TITLE)
        .with_icon(SILENCE_ICON)
        .with_description(SILENCE_DESCRIPTION)
}
