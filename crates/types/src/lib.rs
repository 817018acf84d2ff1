//! Shared type definitions for the toolstrip workspace.
//!
//! Everything here is plain data: the serializable toolbar configuration
//! (`ToolbarConfig`, `ItemSpec`) and the messages/effects exchanged between
//! the TUI runtime and its components.

use serde::{Deserialize, Serialize};

/// Quiet period used to coalesce terminal resize bursts.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Cells reserved for the overflow trigger (`[ … ]`).
pub const DEFAULT_OVERFLOW_TRIGGER_WIDTH: u16 = 5;

fn default_auto_close() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_overflow_trigger_width() -> u16 {
    DEFAULT_OVERFLOW_TRIGGER_WIDTH
}

/// A single choice offered by a select item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOptionSpec {
    /// Value reported when the option is chosen.
    pub value: String,
    /// Display text; falls back to `value` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOptionSpec {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text shown for the option.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Declarative description of a toolbar item.
///
/// The `kind` tag selects which adapter renders the item. The `id` is the
/// item's identity: two item lists with the same ids in the same order are
/// considered the same set of items for layout purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSpec {
    /// Plain icon-labeled action button.
    Action {
        id: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default = "default_auto_close")]
        auto_close: bool,
    },
    /// Preset action that creates a silence for the targeted entries.
    Silence {
        id: String,
        #[serde(default = "default_auto_close")]
        auto_close: bool,
    },
    /// Button that opens a list of options and reports the chosen value.
    Select {
        id: String,
        label: String,
        #[serde(default)]
        options: Vec<SelectOptionSpec>,
        #[serde(default = "default_auto_close")]
        auto_close: bool,
    },
}

impl ItemSpec {
    /// Convenience constructor for an action without icon or description.
    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Action {
            id: id.into(),
            label: label.into(),
            icon: None,
            description: None,
            auto_close: true,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Action { id, .. } | Self::Silence { id, .. } | Self::Select { id, .. } => id,
        }
    }
}

/// Toolbar configuration, loaded from JSON and overridable from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarConfig {
    /// Externally imposed width in cells. When set, the toolbar never
    /// measures itself against the terminal and ignores resize events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// Width reserved for the overflow trigger when items collapse.
    #[serde(default = "default_overflow_trigger_width")]
    pub overflow_trigger_width: u16,
    /// Trailing debounce interval for terminal resize events.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Optional leading label rendered before the buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            width: None,
            overflow_trigger_width: DEFAULT_OVERFLOW_TRIGGER_WIDTH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            label: Some("Events".to_string()),
            items: default_items(),
        }
    }
}

/// Items shown when no configuration file exists.
pub fn default_items() -> Vec<ItemSpec> {
    vec![
        ItemSpec::Silence {
            id: "silence".to_string(),
            auto_close: true,
        },
        ItemSpec::Action {
            id: "resolve".to_string(),
            label: "Resolve".to_string(),
            icon: Some("✔".to_string()),
            description: Some("Mark the selected events as resolved.".to_string()),
            auto_close: true,
        },
        ItemSpec::Action {
            id: "rerun".to_string(),
            label: "Re-run".to_string(),
            icon: Some("↻".to_string()),
            description: Some("Request an immediate check execution.".to_string()),
            auto_close: true,
        },
        ItemSpec::Select {
            id: "sort".to_string(),
            label: "Sort".to_string(),
            options: vec![
                SelectOptionSpec::new("last_ok").with_label("Last OK"),
                SelectOptionSpec::new("severity").with_label("Severity"),
                SelectOptionSpec::new("newest").with_label("Newest"),
                SelectOptionSpec::new("oldest").with_label("Oldest"),
            ],
            auto_close: true,
        },
        ItemSpec::Action {
            id: "delete".to_string(),
            label: "Delete".to_string(),
            icon: Some("✖".to_string()),
            description: Some("Delete the selected events.".to_string()),
            auto_close: true,
        },
    ]
}

/// Messages that drive component state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Raw terminal resize as reported by the terminal backend.
    Resize(u16, u16),
    /// Terminal width after the resize burst settled (debounced).
    WindowResized(u16),
    /// Replace the toolbar items wholesale.
    SetItems(Vec<ItemSpec>),
}

/// Side effects reported by components for the runtime to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// An action item was activated.
    ItemActivated { id: String },
    /// A select item reported a chosen value.
    OptionSelected { id: String, value: String },
    /// The overflow dropdown opened or closed.
    OverflowToggled { open: bool },
    /// Leave the application.
    Quit,
}
