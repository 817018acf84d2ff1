//! Component system for the toolstrip TUI.
//!
//! Components are self-contained UI elements. Their state lives on `App` so
//! several components (and the runtime) can read it; the component itself
//! keeps only what belongs to its own lifetime, such as timers.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use toolstrip_types::{Effect, Msg};

use crate::app::App;

/// A UI component with its own behavior.
///
/// Components handle localized events, update state on `App`, and render
/// themselves into a provided `Rect`, reporting side effects back to the
/// runtime as `Effect`s.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: `handle_key_events()` and `handle_mouse_events()`
///    receive input routed by the main view
/// 2. **Messages**: `handle_message()` receives application messages such as
///    resizes and item replacement
/// 3. **Rendering**: `render()` draws into the provided area and records the
///    areas it needs for hit testing
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components check hit areas recorded during their
    /// last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while the component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Splits `area` into the sub-areas the component renders into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
