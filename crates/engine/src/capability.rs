//! Render context handed to toolbar items.
//!
//! Items do not look up their surroundings; the toolbar passes a
//! `RenderContext` explicitly. Items in the button row get
//! `collapsed = false` and a no-op close handle. Items inside the overflow
//! dropdown get `collapsed = true` and a handle wired to the dropdown.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Capability to close the dropdown that hosts an item.
///
/// Closing is a request: the owner of the dropdown applies it with
/// [`CloseHandle::take_request`] once the item finished acting.
#[derive(Clone, Default)]
pub struct CloseHandle {
    signal: Option<Rc<Cell<bool>>>,
}

impl CloseHandle {
    /// A handle whose `close` does nothing.
    pub fn noop() -> Self {
        Self { signal: None }
    }

    /// A handle connected to a dropdown.
    pub fn connected() -> Self {
        Self {
            signal: Some(Rc::new(Cell::new(false))),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.signal.is_none()
    }

    /// Requests the hosting dropdown to close.
    pub fn close(&self) {
        if let Some(signal) = &self.signal {
            signal.set(true);
        }
    }

    /// Returns and clears a pending close request.
    pub fn take_request(&self) -> bool {
        self.signal.as_ref().is_some_and(|signal| signal.replace(false))
    }
}

impl fmt::Debug for CloseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.signal {
            None => "noop",
            Some(signal) if signal.get() => "requested",
            Some(_) => "idle",
        };
        f.debug_tuple("CloseHandle").field(&state).finish()
    }
}

/// Per-item rendering context.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// `true` when the item is rendered inside the overflow dropdown.
    pub collapsed: bool,
    pub close: CloseHandle,
}

impl RenderContext {
    /// Context for items in the visible button row.
    pub fn visible() -> Self {
        Self {
            collapsed: false,
            close: CloseHandle::noop(),
        }
    }

    /// Context for items inside the dropdown.
    pub fn collapsed(close: CloseHandle) -> Self {
        Self { collapsed: true, close }
    }
}
