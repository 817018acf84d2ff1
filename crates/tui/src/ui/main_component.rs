use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};
use toolstrip_types::{Effect, Msg};

use super::components::{ActivityComponent, Component, ToolbarComponent};
use super::theme::theme_helpers as th;
use crate::app::App;

/// Height of the toolbar row including its border.
pub const TOOLBAR_HEIGHT: u16 = 3;

/// Root view: toolbar on top, activity pane below, hints at the bottom.
#[derive(Debug)]
pub struct MainView {
    pub toolbar_view: ToolbarComponent,
    pub activity_view: ActivityComponent,
}

impl MainView {
    pub fn new(toolbar_view: ToolbarComponent) -> Self {
        Self {
            toolbar_view,
            activity_view: ActivityComponent,
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        self.toolbar_view.handle_message(app, msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }
        // Global keys apply only while no popup owns the keyboard.
        let popup_open = app.toolbar.dropdown.is_open() || app.toolbar.capturing_index().is_some();
        if !popup_open {
            match key.code {
                KeyCode::Char('q') => return vec![Effect::Quit],
                KeyCode::Char('+') => {
                    let msg = app.add_demo_item();
                    return self.handle_message(app, msg);
                }
                KeyCode::Char('-') => {
                    return match app.remove_last_item() {
                        Some(msg) => self.handle_message(app, msg),
                        None => Vec::new(),
                    };
                }
                _ => {}
            }
        }
        self.toolbar_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        self.toolbar_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(th::background_style(&*app.ctx.theme));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.toolbar_view.render(frame, layout[0], app);
        self.activity_view.render(frame, layout[1], app);

        let hint_spans = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(hints_widget, layout[2]);

        // Popups last so they paint over the activity pane.
        self.toolbar_view.render_overlays(frame, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let mut hint_spans = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        hint_spans.extend(self.toolbar_view.get_hint_spans(app));
        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[(" +/-", " Add/remove item "), (" q", " Quit ")],
        ));
        hint_spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(TOOLBAR_HEIGHT), // Toolbar
            Constraint::Min(1),                 // Activity
            Constraint::Length(1),              // Hints bar
        ])
        .split(area)
        .to_vec()
    }
}
