//! Overflow dropdown controller.
//!
//! Tracks whether the dropdown of collapsed items is open and which element
//! it is anchored to. The controller owns a connected [`CloseHandle`]; the
//! toolbar hands clones of it to collapsed items and calls
//! [`DropdownState::apply_close_requests`] after they act.

use ratatui::layout::Rect;
use toolstrip_engine::CloseHandle;

#[derive(Debug, Clone)]
pub struct DropdownState {
    is_open: bool,
    anchor: Option<Rect>,
    highlighted: usize,
    close: CloseHandle,
}

impl Default for DropdownState {
    fn default() -> Self {
        Self {
            is_open: false,
            anchor: None,
            highlighted: 0,
            close: CloseHandle::connected(),
        }
    }
}

impl DropdownState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Opens the dropdown anchored to the trigger area.
    pub fn open(&mut self, anchor: Rect) {
        self.is_open = true;
        self.anchor = Some(anchor);
        self.highlighted = 0;
        // Stale requests from a previous session must not close the new one.
        self.close.take_request();
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Opens or closes; returns the new open state.
    pub fn toggle(&mut self, anchor: Rect) -> bool {
        if self.is_open {
            self.close();
        } else {
            self.open(anchor);
        }
        self.is_open
    }

    /// Handle given to collapsed items.
    pub fn close_handle(&self) -> CloseHandle {
        self.close.clone()
    }

    /// Applies a close requested through the handle. Returns `true` when the
    /// dropdown was open and is now closed.
    pub fn apply_close_requests(&mut self) -> bool {
        if self.close.take_request() && self.is_open {
            self.close();
            return true;
        }
        false
    }

    /// Moves the highlight among `len` rows, wrapping at both ends.
    pub fn move_highlight(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.highlighted = 0;
            return;
        }
        self.highlighted = if forward {
            (self.highlighted + 1) % len
        } else {
            (self.highlighted + len - 1) % len
        };
    }

    pub fn set_highlight(&mut self, index: usize, len: usize) {
        self.highlighted = index.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_sets_anchor_and_close_keeps_it() {
        let mut dropdown = DropdownState::default();
        let trigger = Rect::new(40, 1, 5, 1);
        dropdown.open(trigger);
        assert!(dropdown.is_open());
        assert_eq!(dropdown.anchor(), Some(trigger));

        dropdown.close();
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.anchor(), Some(trigger));
    }

    #[test]
    fn close_handle_closes_through_controller() {
        let mut dropdown = DropdownState::default();
        dropdown.open(Rect::new(0, 0, 5, 1));

        dropdown.close_handle().close();
        assert!(dropdown.is_open(), "requests apply only when the controller runs");
        assert!(dropdown.apply_close_requests());
        assert!(!dropdown.is_open());
        assert!(!dropdown.apply_close_requests());
    }

    #[test]
    fn stale_request_does_not_close_a_new_session() {
        let mut dropdown = DropdownState::default();
        dropdown.close_handle().close();
        dropdown.open(Rect::new(0, 0, 5, 1));
        assert!(!dropdown.apply_close_requests());
        assert!(dropdown.is_open());
    }

    #[test]
    fn toggle_flips_state() {
        let mut dropdown = DropdownState::default();
        assert!(dropdown.toggle(Rect::new(0, 0, 5, 1)));
        assert!(!dropdown.toggle(Rect::new(0, 0, 5, 1)));
    }

    #[test]
    fn highlight_wraps_and_clamps() {
        let mut dropdown = DropdownState::default();
        dropdown.move_highlight(false, 3);
        assert_eq!(dropdown.highlighted(), 2);
        dropdown.move_highlight(true, 3);
        assert_eq!(dropdown.highlighted(), 0);
        dropdown.set_highlight(9, 3);
        assert_eq!(dropdown.highlighted(), 2);
    }
}
