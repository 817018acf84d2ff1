//! Application state for the toolstrip TUI.
//!
//! `App` is the single state container the components read and mutate. The
//! components themselves stay thin: they route input into the states held
//! here and render from them.

use toolstrip_types::{Effect, ItemSpec, Msg, ToolbarConfig};
use tracing::info;

use crate::ui::{
    components::{activity::ActivityState, toolbar::ToolbarState},
    theme::{self, Theme},
};

/// Cross-cutting shared context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active theme
    pub theme: Box<dyn Theme>,
    /// Configuration the session started with
    pub config: ToolbarConfig,
}

impl SharedCtx {
    pub fn new(config: ToolbarConfig) -> Self {
        Self {
            theme: theme::load(),
            config,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub toolbar: ToolbarState,
    pub activity: ActivityState,
    /// Item list currently shown; edited by the demo keys.
    item_specs: Vec<ItemSpec>,
    /// Counter for generated demo items.
    added_items: usize,
}

impl App {
    pub fn new(config: ToolbarConfig) -> Self {
        let toolbar = ToolbarState::from_config(&config);
        let item_specs = config.items.clone();
        Self {
            ctx: SharedCtx::new(config),
            toolbar,
            activity: ActivityState::default(),
            item_specs,
            added_items: 0,
        }
    }

    pub fn item_specs(&self) -> &[ItemSpec] {
        &self.item_specs
    }

    /// Appends a generated action and returns the message that installs the
    /// new list.
    pub fn add_demo_item(&mut self) -> Msg {
        self.added_items += 1;
        let index = self.added_items;
        self.item_specs
            .push(ItemSpec::action(format!("extra-{index}"), format!("Extra {index}")));
        self.activity.push_message(format!("added extra-{index}"));
        Msg::SetItems(self.item_specs.clone())
    }

    /// Drops the last item. `None` when the list is already empty.
    pub fn remove_last_item(&mut self) -> Option<Msg> {
        let removed = self.item_specs.pop()?;
        self.activity.push_message(format!("removed {}", removed.id()));
        Some(Msg::SetItems(self.item_specs.clone()))
    }

    /// Applies an effect reported by a component. Returns `true` when the
    /// application should exit.
    pub fn apply_effect(&mut self, effect: &Effect) -> bool {
        info!(?effect, "toolbar effect");
        self.activity.record(effect);
        matches!(effect, Effect::Quit)
    }
}
