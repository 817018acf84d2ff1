use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Span,
    widgets::{Clear, Paragraph},
};
use tokio::sync::mpsc::UnboundedReceiver;
use toolstrip_engine::{Measure, RenderContext};
use toolstrip_types::{Effect, Msg};
use toolstrip_util::{Debouncer, display_width};
use tracing::debug;

use super::ToolbarState;
use crate::app::App;
use crate::ui::{
    components::Component,
    theme::{Theme, theme_helpers as th},
    utils::{anchored_rect, find_target_index_by_mouse_position},
};

/// Text of the overflow trigger; its width matches the default trigger
/// reservation.
pub const OVERFLOW_TRIGGER_TEXT: &str = "[ … ]";

const MIN_DROPDOWN_WIDTH: u16 = 18;

/// Renders the toolbar row, its overflow trigger and the dropdown.
///
/// The component owns the resize debouncer: raw terminal widths are fed in
/// as `Msg::Resize` and come back settled through the receiver returned by
/// [`ToolbarComponent::new`]. Dropping the component cancels a pending
/// timer.
#[derive(Debug)]
pub struct ToolbarComponent {
    resize_debouncer: Option<Debouncer<u16>>,
}

impl ToolbarComponent {
    /// Creates the component. With `listen_for_resize` unset (an imposed
    /// width) no debouncer is created and no receiver is returned.
    pub fn new(debounce: Duration, listen_for_resize: bool) -> (Self, Option<UnboundedReceiver<u16>>) {
        if !listen_for_resize {
            return (Self { resize_debouncer: None }, None);
        }
        let (debouncer, receiver) = Debouncer::new(debounce);
        (
            Self {
                resize_debouncer: Some(debouncer),
            },
            Some(receiver),
        )
    }

    pub fn is_listening_for_resize(&self) -> bool {
        self.resize_debouncer.is_some()
    }

    /// Draws the dropdown and any item popups. Called after every other
    /// component so they paint on top.
    pub fn render_overlays(&mut self, frame: &mut Frame, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &mut app.toolbar;
        state.dropdown_area = None;

        if state.dropdown.is_open() && state.has_overflow() {
            render_dropdown(frame, state, theme);
        }

        if let Some(index) = state.capturing_index() {
            let anchor = state.item_areas.get(index).copied().unwrap_or(state.row_area);
            let bounds = frame.area();
            if let Some(item) = state.items_mut().get_mut(index) {
                item.render_overlay(frame, anchor, bounds, theme);
            }
        }
    }

    fn handle_dropdown_keys(state: &mut ToolbarState, key: KeyEvent) -> Vec<Effect> {
        let collapsed = state.items().len() - state.split();
        match key.code {
            KeyCode::Up | KeyCode::BackTab => state.dropdown.move_highlight(false, collapsed),
            KeyCode::Down | KeyCode::Tab => state.dropdown.move_highlight(true, collapsed),
            KeyCode::Home => state.dropdown.set_highlight(0, collapsed),
            KeyCode::End => state.dropdown.set_highlight(collapsed.saturating_sub(1), collapsed),
            KeyCode::Enter | KeyCode::Char(' ') => return state.activate_highlighted(),
            KeyCode::Esc | KeyCode::Char('o') => return state.close_dropdown(),
            _ => {}
        }
        Vec::new()
    }
}

impl Component for ToolbarComponent {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Resize(width, _) => {
                if let Some(debouncer) = self.resize_debouncer.as_mut() {
                    debouncer.call(width);
                }
            }
            Msg::WindowResized(width) => app.toolbar.observe_window_width(width),
            Msg::SetItems(specs) => app.toolbar.set_items(&specs),
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let state = &mut app.toolbar;
        state.update_split();

        if let Some(effects) = state.route_key_to_item(key) {
            return effects;
        }
        if state.dropdown.is_open() {
            return Self::handle_dropdown_keys(state, key);
        }

        match key.code {
            KeyCode::Left | KeyCode::BackTab => state.focus_prev(),
            KeyCode::Right | KeyCode::Tab => state.focus_next(),
            KeyCode::Home => state.set_focus(0),
            KeyCode::Enter | KeyCode::Char(' ') => return state.activate_focused(),
            KeyCode::Char('o') | KeyCode::Down if state.has_overflow() => {
                state.set_focus(state.split());
                return state.toggle_dropdown();
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let (column, row) = (mouse.column, mouse.row);
        let position = Position::new(column, row);
        let state = &mut app.toolbar;

        if let Some(effects) = state.route_click_to_item(column, row) {
            return effects;
        }

        let on_trigger = state.trigger_area.is_some_and(|area| area.contains(position));
        if on_trigger {
            state.set_focus(state.split());
            return state.toggle_dropdown();
        }

        if state.dropdown.is_open() {
            let split = state.split();
            let rows = &state.item_areas[split..];
            if let Some(offset) = find_target_index_by_mouse_position(rows, column, row) {
                let collapsed = state.items().len() - split;
                state.dropdown.set_highlight(offset, collapsed);
                return state.activate(split + offset);
            }
            let inside = state.dropdown_area.is_some_and(|area| area.contains(position));
            if !inside {
                debug!(column, row, "click outside dropdown");
                let mut effects = state.close_dropdown();
                effects.extend(click_row(state, column, row));
                return effects;
            }
            return Vec::new();
        }

        click_row(state, column, row)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &mut app.toolbar;

        // An imposed width caps the drawn row; borders sit outside it.
        let area = match state.layout().external_width() {
            Some(width) => Rect {
                width: area.width.min(width.saturating_add(2)),
                ..area
            },
            None => area,
        };
        let block = th::block(theme, None, state.dropdown.is_open());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        state.last_area = area;

        let label_width = match state.label_text() {
            Some(text) => {
                let width = display_width(&text).min(inner.width);
                let label_area = Rect { width, height: 1, ..inner };
                frame.render_widget(Paragraph::new(Span::styled(text, theme.accent_emphasis_style())), label_area);
                width
            }
            None => 0,
        };
        let row_area = Rect {
            x: inner.x + label_width,
            width: inner.width - label_width,
            height: inner.height.min(1),
            ..inner
        };
        state.row_area = row_area;

        let split = state.update_split();
        let focused = state.focused();
        let mut x = row_area.x;
        let mut item_areas = vec![Rect::default(); state.items().len()];
        for (index, item) in state.items_mut().iter_mut().enumerate().take(split) {
            if x >= row_area.right() {
                break;
            }
            let width = item.width().min(row_area.right() - x);
            let slot = Rect::new(x, row_area.y, width, row_area.height);
            item.render(frame, slot, theme, &RenderContext::visible(), focused == index);
            item_areas[index] = slot;
            x = x.saturating_add(item.width());
        }

        state.trigger_area = None;
        if state.has_overflow() {
            let trigger_width = display_width(OVERFLOW_TRIGGER_TEXT);
            let trigger_x = x.min(row_area.right().saturating_sub(trigger_width)).max(row_area.x);
            let trigger = Rect::new(trigger_x, row_area.y, trigger_width.min(row_area.width), row_area.height);
            let style = th::trigger_style(theme, state.dropdown.is_open(), state.is_trigger_focused());
            frame.render_widget(Paragraph::new(OVERFLOW_TRIGGER_TEXT).style(style), trigger);
            state.trigger_area = Some(trigger);
        }
        // Keep dropdown rows recorded by the previous overlay pass.
        for (index, area) in item_areas.iter_mut().enumerate().skip(split) {
            *area = state.item_areas.get(index).copied().unwrap_or_default();
        }
        state.item_areas = item_areas;

        if state.layout().external_width().is_none() {
            state.observe_row_width(row_area.width);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        let state = &app.toolbar;
        if state.capturing_index().is_some() {
            return th::build_hint_spans(theme, &[(" ↑/↓", " Option"), (" Enter", " Choose"), (" Esc", " Back")]);
        }
        if state.dropdown.is_open() {
            return th::build_hint_spans(theme, &[(" ↑/↓", " Navigate"), (" Enter", " Run"), (" Esc", " Close")]);
        }
        let mut hints = vec![(" ←/→", " Focus"), (" Enter", " Run")];
        if state.has_overflow() {
            hints.push((" o", " More"));
        }
        th::build_hint_spans(theme, &hints)
    }
}

/// Activates the visible button under the cursor, if any.
fn click_row(state: &mut ToolbarState, column: u16, row: u16) -> Vec<Effect> {
    let split = state.split();
    let Some(index) = find_target_index_by_mouse_position(&state.item_areas[..split], column, row) else {
        return Vec::new();
    };
    state.set_focus(index);
    state.activate(index)
}

fn render_dropdown(frame: &mut Frame, state: &mut ToolbarState, theme: &dyn Theme) {
    let split = state.split();
    let collapsed = state.items().len() - split;
    let widest = state.items()[split..].iter().map(|item| item.dropdown_width()).max().unwrap_or(0);
    let width = widest.saturating_add(2).max(MIN_DROPDOWN_WIDTH);
    let height = u16::try_from(collapsed).unwrap_or(u16::MAX).saturating_add(2);
    let anchor = state.dropdown.anchor().or(state.trigger_area).unwrap_or(state.row_area);
    let area = anchored_rect(anchor, width, height, frame.area());

    frame.render_widget(Clear, area);
    let block = th::block(theme, Some("More"), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ctx = state.context_for(split);
    let highlighted = state.dropdown.highlighted();
    let mut rows = Vec::with_capacity(collapsed);
    for (offset, item) in state.items_mut()[split..].iter_mut().enumerate() {
        let Ok(dy) = u16::try_from(offset) else { break };
        if dy >= inner.height {
            rows.push(Rect::default());
            continue;
        }
        let row = Rect::new(inner.x, inner.y + dy, inner.width, 1);
        item.render(frame, row, theme, &ctx, offset == highlighted);
        rows.push(row);
    }
    for (offset, row) in rows.into_iter().enumerate() {
        if let Some(slot) = state.item_areas.get_mut(split + offset) {
            *slot = row;
        }
    }
    state.dropdown_area = Some(area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::{Terminal, backend::TestBackend};
    use toolstrip_types::{ItemSpec, ToolbarConfig};

    fn config(count: usize) -> ToolbarConfig {
        ToolbarConfig {
            label: None,
            items: (0..count)
                .map(|index| ItemSpec::action(format!("item{index}"), format!("Item{index:03}")))
                .collect(),
            ..ToolbarConfig::default()
        }
    }

    /// Draws until the layout settles, the way the runtime does.
    fn draw(terminal: &mut Terminal<TestBackend>, component: &mut ToolbarComponent, app: &mut App) {
        for _ in 0..4 {
            terminal
                .draw(|frame| {
                    let area = Rect::new(0, 0, frame.area().width, 3);
                    component.render(frame, area, app);
                    component.render_overlays(frame, app);
                })
                .unwrap();
            if !app.toolbar.take_needs_rerender() {
                break;
            }
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn narrow_terminal_collapses_trailing_items() {
        // inner row is 37 cells: budget 32 fits three 10-cell items
        let mut terminal = Terminal::new(TestBackend::new(39, 12)).unwrap();
        let mut app = App::new(config(6));
        let (mut component, _) = ToolbarComponent::new(Duration::from_millis(200), true);

        draw(&mut terminal, &mut component, &mut app);
        assert_eq!(app.toolbar.visible_ids(), ["item0", "item1", "item2"]);
        let text = screen_text(&terminal);
        assert!(text.contains("Item002"));
        assert!(!text.contains("Item003"));
        assert!(text.contains(OVERFLOW_TRIGGER_TEXT));
    }

    #[test]
    fn wide_terminal_shows_everything_without_trigger() {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        let mut app = App::new(config(6));
        let (mut component, _) = ToolbarComponent::new(Duration::from_millis(200), true);

        draw(&mut terminal, &mut component, &mut app);
        assert!(!app.toolbar.has_overflow());
        assert!(!screen_text(&terminal).contains(OVERFLOW_TRIGGER_TEXT));
    }

    #[test]
    fn trigger_click_opens_dropdown_and_row_click_activates() {
        let mut terminal = Terminal::new(TestBackend::new(39, 12)).unwrap();
        let mut app = App::new(config(6));
        let (mut component, _) = ToolbarComponent::new(Duration::from_millis(200), true);
        draw(&mut terminal, &mut component, &mut app);

        let trigger = app.toolbar.trigger_area.unwrap();
        let effects = component.handle_mouse_events(&mut app, click(trigger.x + 1, trigger.y));
        assert_eq!(effects, vec![Effect::OverflowToggled { open: true }]);
        draw(&mut terminal, &mut component, &mut app);
        assert!(screen_text(&terminal).contains("Item004"));

        let row = app.toolbar.item_areas[4];
        let effects = component.handle_mouse_events(&mut app, click(row.x + 1, row.y));
        assert_eq!(
            effects,
            vec![
                Effect::ItemActivated { id: "item4".into() },
                Effect::OverflowToggled { open: false }
            ]
        );
    }

    #[test]
    fn click_outside_closes_dropdown() {
        let mut terminal = Terminal::new(TestBackend::new(39, 12)).unwrap();
        let mut app = App::new(config(6));
        let (mut component, _) = ToolbarComponent::new(Duration::from_millis(200), true);
        draw(&mut terminal, &mut component, &mut app);

        app.toolbar.toggle_dropdown();
        draw(&mut terminal, &mut component, &mut app);
        let effects = component.handle_mouse_events(&mut app, click(0, 11));
        assert_eq!(effects, vec![Effect::OverflowToggled { open: false }]);
        assert!(!app.toolbar.dropdown.is_open());
    }

    #[test]
    fn keyboard_reaches_collapsed_items() {
        let mut terminal = Terminal::new(TestBackend::new(39, 12)).unwrap();
        let mut app = App::new(config(6));
        let (mut component, _) = ToolbarComponent::new(Duration::from_millis(200), true);
        draw(&mut terminal, &mut component, &mut app);

        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            component.handle_key_events(&mut app, key(KeyCode::Char('o'))),
            vec![Effect::OverflowToggled { open: true }]
        );
        component.handle_key_events(&mut app, key(KeyCode::Down));
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects[0], Effect::ItemActivated { id: "item4".into() });
        assert!(!app.toolbar.dropdown.is_open());
    }

    #[test]
    fn imposed_width_needs_no_listener() {
        let (component, receiver) = ToolbarComponent::new(Duration::from_millis(200), false);
        assert!(!component.is_listening_for_resize());
        assert!(receiver.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn resize_messages_settle_through_debouncer() {
        let mut app = App::new(config(6));
        let (mut component, receiver) = ToolbarComponent::new(Duration::from_millis(200), true);
        let mut receiver = receiver.unwrap();

        component.handle_message(&mut app, Msg::Resize(80, 24));
        component.handle_message(&mut app, Msg::Resize(90, 24));
        assert_eq!(receiver.recv().await, Some(90));
        assert!(receiver.try_recv().is_err());
    }
}
