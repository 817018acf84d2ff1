//! Toolbar item adapters.
//!
//! Every item renders itself in one of two places, chosen by the
//! `RenderContext` it receives:
//!
//! - the visible button row (`collapsed == false`), as a compact button;
//! - the overflow dropdown (`collapsed == true`), as a full-width list row.
//!
//! Items may use `ctx.close` to dismiss the dropdown once they finish acting.

mod action;
mod options;
mod select;
mod silence;

use std::fmt::Debug;

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use toolstrip_engine::{Measure, RenderContext};
use toolstrip_types::{Effect, ItemSpec};

use crate::ui::theme::Theme;

pub use action::ActionItem;
pub use options::OptionsController;
pub use select::SelectItem;
pub use silence::{SILENCE_DESCRIPTION, SILENCE_ICON, SILENCE_TITLE, silence_item};

/// Blank cells kept after each button in the row.
pub const BUTTON_GAP: u16 = 1;

/// A toolbar entry. `Measure::width` is the width it needs in the button
/// row, including the trailing gap.
pub trait ToolbarItem: Measure + Debug {
    /// Draws the item. `area` is a button slot in the row or one list row in
    /// the dropdown, depending on `ctx.collapsed`.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme, ctx: &RenderContext, focused: bool);

    /// Width the item needs as a dropdown row.
    fn dropdown_width(&self) -> u16;

    /// Runs the item's action (Enter or click).
    fn activate(&mut self, ctx: &RenderContext) -> Vec<Effect>;

    /// Whether the item owns keyboard input (for example an open option list).
    fn is_capturing_input(&self) -> bool {
        false
    }

    /// Key handling while `is_capturing_input` is true.
    fn handle_key_events(&mut self, _key: KeyEvent, _ctx: &RenderContext) -> Vec<Effect> {
        Vec::new()
    }

    /// Draws popups owned by the item next to `anchor`, clipped to `bounds`.
    fn render_overlay(&mut self, _frame: &mut Frame, _anchor: Rect, _bounds: Rect, _theme: &dyn Theme) {}

    /// Mouse click while capturing. `None` when the click missed the overlay.
    fn handle_overlay_click(&mut self, _column: u16, _row: u16, _ctx: &RenderContext) -> Option<Vec<Effect>> {
        None
    }

    /// Closes any popup the item owns without acting.
    fn dismiss(&mut self) {}
}

/// Builds the adapter for a configured item.
pub fn build_item(spec: &ItemSpec) -> Box<dyn ToolbarItem> {
    match spec {
        ItemSpec::Action {
            id,
            label,
            icon,
            description,
            auto_close,
        } => {
            let mut item = ActionItem::new(id.clone(), label.clone()).with_auto_close(*auto_close);
            if let Some(icon) = icon {
                item = item.with_icon(icon.clone());
            }
            if let Some(description) = description {
                item = item.with_description(description.clone());
            }
            Box::new(item)
        }
        ItemSpec::Silence { id, auto_close } => Box::new(silence_item(id.clone()).with_auto_close(*auto_close)),
        ItemSpec::Select {
            id,
            label,
            options,
            auto_close,
        } => Box::new(SelectItem::new(id.clone(), label.clone(), options.clone()).with_auto_close(*auto_close)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolstrip_types::{SelectOptionSpec, default_items};

    #[test]
    fn builds_every_kind_with_its_id() {
        for spec in default_items() {
            let item = build_item(&spec);
            assert_eq!(item.id(), spec.id());
            assert!(item.width() > BUTTON_GAP);
        }
    }

    #[test]
    fn select_spec_builds_a_select() {
        let spec = ItemSpec::Select {
            id: "sort".into(),
            label: "Sort".into(),
            options: vec![SelectOptionSpec::new("newest")],
            auto_close: false,
        };
        let mut item = build_item(&spec);
        item.activate(&RenderContext::visible());
        assert!(item.is_capturing_input(), "activating a select opens its options");
    }
}
