//! Options controller backing select items.
//!
//! Tracks whether the option list is open, which option is highlighted and
//! where the list was last drawn (for mouse hit testing).

use ratatui::layout::Rect;
use toolstrip_types::SelectOptionSpec;

use crate::ui::utils::find_target_index_by_mouse_position;

#[derive(Debug, Clone, Default)]
pub struct OptionsController {
    options: Vec<SelectOptionSpec>,
    open: bool,
    highlighted: usize,
    /// Per-option row areas from the last render.
    pub row_areas: Vec<Rect>,
    /// Outer area of the last rendered list.
    pub last_area: Rect,
}

impl OptionsController {
    pub fn new(options: Vec<SelectOptionSpec>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &[SelectOptionSpec] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Opens the list with the given option highlighted (clamped).
    pub fn open(&mut self, highlighted: usize) {
        if self.options.is_empty() {
            return;
        }
        self.open = true;
        self.highlighted = highlighted.min(self.options.len() - 1);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.row_areas.clear();
        self.last_area = Rect::default();
    }

    /// Moves the highlight, wrapping at both ends.
    pub fn move_highlight(&mut self, forward: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.highlighted = if forward {
            (self.highlighted + 1) % len
        } else {
            (self.highlighted + len - 1) % len
        };
    }

    /// Closes the list and returns the index and option that were chosen.
    pub fn choose(&mut self) -> Option<(usize, SelectOptionSpec)> {
        if !self.open {
            return None;
        }
        let index = self.highlighted;
        let option = self.options.get(index).cloned()?;
        self.close();
        Some((index, option))
    }

    /// Highlights the option under the cell, if any.
    pub fn highlight_at(&mut self, column: u16, row: u16) -> bool {
        match find_target_index_by_mouse_position(&self.row_areas, column, row) {
            Some(index) => {
                self.highlighted = index;
                true
            }
            None => false,
        }
    }
}
