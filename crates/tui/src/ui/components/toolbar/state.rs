use ratatui::layout::Rect;
use toolstrip_engine::{LayoutState, Measure, PartitionIndices, RenderContext, partition, partition_indices};
use toolstrip_types::{Effect, ItemSpec, ToolbarConfig};
use toolstrip_util::display_width;
use tracing::debug;

use super::DropdownState;
use crate::ui::components::items::{ToolbarItem, build_item};

/// State for the overflow-aware toolbar.
///
/// Owns the items, the width-measurement state, the dropdown controller and
/// the row focus. Layout areas from the last render are kept for mouse hit
/// testing.
#[derive(Debug)]
pub struct ToolbarState {
    items: Vec<Box<dyn ToolbarItem>>,
    layout: LayoutState,
    pub dropdown: DropdownState,
    label: Option<String>,
    /// Focused slot in the row; `split` addresses the overflow trigger.
    focused: usize,
    /// Visible row and overflow ranges, as of the last update.
    indices: PartitionIndices,
    needs_rerender: bool,
    /// Last rendered area of the whole toolbar.
    pub last_area: Rect,
    /// Last rendered area of the button row.
    pub row_area: Rect,
    /// Per-item areas from the last render: row slots for visible items,
    /// dropdown rows for collapsed ones. Empty rects were not drawn.
    pub item_areas: Vec<Rect>,
    pub trigger_area: Option<Rect>,
    pub dropdown_area: Option<Rect>,
}

impl ToolbarState {
    pub fn new(items: Vec<Box<dyn ToolbarItem>>, overflow_trigger_width: u16) -> Self {
        let mut state = Self {
            items,
            layout: LayoutState::new(overflow_trigger_width),
            dropdown: DropdownState::default(),
            label: None,
            focused: 0,
            indices: PartitionIndices::default(),
            needs_rerender: false,
            last_area: Rect::default(),
            row_area: Rect::default(),
            item_areas: Vec::new(),
            trigger_area: None,
            dropdown_area: None,
        };
        state.update_split();
        // Construction is not a change.
        state.needs_rerender = false;
        state
    }

    pub fn from_config(config: &ToolbarConfig) -> Self {
        let items = config.items.iter().map(build_item).collect();
        let mut state = Self::new(items, config.overflow_trigger_width);
        state.set_label(config.label.clone());
        state.set_external_width(config.width);
        state.needs_rerender = false;
        state
    }

    pub fn items(&self) -> &[Box<dyn ToolbarItem>] {
        &self.items
    }

    /// Mutable access for rendering. Callers must not change item ids.
    pub(crate) fn items_mut(&mut self) -> &mut [Box<dyn ToolbarItem>] {
        &mut self.items
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Text drawn before the buttons.
    pub fn label_text(&self) -> Option<String> {
        self.label.as_ref().map(|label| format!(" {label} ▸ "))
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
        let width = self.label_text().map(|text| display_width(&text)).unwrap_or(0);
        self.layout.set_menu_label_width(width);
        self.update_split();
    }

    pub fn set_external_width(&mut self, width: Option<u16>) {
        self.layout.set_external_width(width);
        self.update_split();
    }

    /// Replaces the items wholesale.
    pub fn set_items(&mut self, specs: &[ItemSpec]) {
        self.replace_items(specs.iter().map(build_item).collect());
    }

    pub fn replace_items(&mut self, items: Vec<Box<dyn ToolbarItem>>) {
        self.items = items;
        self.update_split();
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn indices(&self) -> &PartitionIndices {
        &self.indices
    }

    /// Number of leading items in the visible row.
    pub fn split(&self) -> usize {
        self.indices.split()
    }

    pub fn has_overflow(&self) -> bool {
        self.indices.needs_trigger()
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.items[self.indices.visible.clone()].iter().map(|item| item.id()).collect()
    }

    pub fn collapsed_ids(&self) -> Vec<&str> {
        self.items[self.indices.collapsed.clone()].iter().map(|item| item.id()).collect()
    }

    /// Re-derives the partition.
    ///
    /// Identity is synchronised first so a fresh item list is never fitted
    /// against a width measured for the previous list.
    pub fn update_split(&mut self) -> usize {
        if self.layout.sync_ids(self.items.iter().map(|item| item.id())) {
            self.needs_rerender = true;
        }
        let available = self.layout.available_width();
        let trigger = self.layout.overflow_trigger_width();
        let previous = std::mem::replace(&mut self.indices, partition_indices(&self.items, available, trigger));
        if self.layout.is_probing() {
            self.layout.begin_probe();
        }

        let slots = self.slot_count();
        if self.focused >= slots {
            self.focused = slots.saturating_sub(1);
        }
        if self.dropdown.is_open() && !self.has_overflow() {
            debug!("overflow emptied; closing dropdown");
            self.dropdown.close();
            // The items that were in the dropdown have just moved to the row.
            let start = previous.collapsed.start.min(self.items.len());
            for item in &mut self.items[start..] {
                item.dismiss();
            }
        }
        let collapsed = self.indices.collapsed.len();
        self.dropdown.set_highlight(self.dropdown.highlighted(), collapsed);
        if self.item_areas.len() != self.items.len() {
            self.item_areas = vec![Rect::default(); self.items.len()];
        }
        self.split()
    }

    /// Ids of both halves for diagnostics, as a fresh partition.
    pub fn partition_ids(&self) -> (Vec<String>, Vec<String>) {
        let split = partition(&self.items, self.layout.available_width(), self.layout.overflow_trigger_width())
            .map(|item| item.id().to_string());
        (split.visible, split.collapsed)
    }

    /// Feeds the width the button row was drawn into.
    pub fn observe_row_width(&mut self, width: u16) {
        if self.layout.observe_buttons_width(width) {
            self.needs_rerender = true;
            self.update_split();
        }
    }

    /// Feeds a settled terminal width.
    pub fn observe_window_width(&mut self, width: u16) {
        if self.layout.observe_window_width(width) {
            self.needs_rerender = true;
            self.update_split();
        }
    }

    /// Returns and clears the re-render request raised by a layout change.
    pub fn take_needs_rerender(&mut self) -> bool {
        std::mem::take(&mut self.needs_rerender)
    }

    /// Context for the item at `index` given the current partition.
    pub fn context_for(&self, index: usize) -> RenderContext {
        if self.indices.visible.contains(&index) {
            RenderContext::visible()
        } else {
            RenderContext::collapsed(self.dropdown.close_handle())
        }
    }

    fn slot_count(&self) -> usize {
        self.split() + usize::from(self.has_overflow())
    }

    pub fn is_trigger_focused(&self) -> bool {
        self.has_overflow() && self.focused == self.split()
    }

    pub fn focus_next(&mut self) {
        let slots = self.slot_count();
        if slots > 0 {
            self.focused = (self.focused + 1) % slots;
        }
    }

    pub fn focus_prev(&mut self) {
        let slots = self.slot_count();
        if slots > 0 {
            self.focused = (self.focused + slots - 1) % slots;
        }
    }

    pub fn set_focus(&mut self, slot: usize) {
        if slot < self.slot_count() {
            self.focused = slot;
        }
    }

    /// Runs the item at `index` with the context matching its placement.
    pub fn activate(&mut self, index: usize) -> Vec<Effect> {
        let ctx = self.context_for(index);
        let Some(item) = self.items.get_mut(index) else {
            return Vec::new();
        };
        let effects = item.activate(&ctx);
        self.after_item_action(effects)
    }

    /// Runs the focused row slot: an item or the overflow trigger.
    pub fn activate_focused(&mut self) -> Vec<Effect> {
        if self.is_trigger_focused() {
            return self.toggle_dropdown();
        }
        self.activate(self.focused)
    }

    /// Runs the highlighted dropdown row.
    pub fn activate_highlighted(&mut self) -> Vec<Effect> {
        if !self.dropdown.is_open() {
            return Vec::new();
        }
        self.activate(self.split() + self.dropdown.highlighted())
    }

    /// Index of the item currently owning keyboard input.
    pub fn capturing_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.is_capturing_input())
    }

    /// Routes a key to the capturing item, if any. `None` when no item
    /// captures input.
    pub fn route_key_to_item(&mut self, key: crossterm::event::KeyEvent) -> Option<Vec<Effect>> {
        let index = self.capturing_index()?;
        let ctx = self.context_for(index);
        let effects = self.items[index].handle_key_events(key, &ctx);
        Some(self.after_item_action(effects))
    }

    /// Routes a click to the capturing item's overlay. `None` when the click
    /// missed it (the overlay is dismissed in that case).
    pub fn route_click_to_item(&mut self, column: u16, row: u16) -> Option<Vec<Effect>> {
        let index = self.capturing_index()?;
        let ctx = self.context_for(index);
        match self.items[index].handle_overlay_click(column, row, &ctx) {
            Some(effects) => Some(self.after_item_action(effects)),
            None => {
                self.items[index].dismiss();
                None
            }
        }
    }

    pub fn toggle_dropdown(&mut self) -> Vec<Effect> {
        if !self.has_overflow() && !self.dropdown.is_open() {
            return Vec::new();
        }
        let anchor = self.trigger_area.unwrap_or_default();
        let open = self.dropdown.toggle(anchor);
        if !open {
            self.dismiss_items();
        }
        debug!(open, "overflow dropdown toggled");
        vec![Effect::OverflowToggled { open }]
    }

    pub fn close_dropdown(&mut self) -> Vec<Effect> {
        if !self.dropdown.is_open() {
            return Vec::new();
        }
        self.dropdown.close();
        self.dismiss_items();
        vec![Effect::OverflowToggled { open: false }]
    }

    fn after_item_action(&mut self, mut effects: Vec<Effect>) -> Vec<Effect> {
        if self.dropdown.apply_close_requests() {
            self.dismiss_items();
            effects.push(Effect::OverflowToggled { open: false });
        }
        effects
    }

    fn dismiss_items(&mut self) {
        for item in &mut self.items[self.indices.collapsed.clone()] {
            item.dismiss();
        }
    }
}
