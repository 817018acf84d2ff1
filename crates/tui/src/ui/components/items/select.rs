use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use toolstrip_engine::{Measure, RenderContext};
use toolstrip_types::{Effect, SelectOptionSpec};
use toolstrip_util::display_width;
use tracing::debug;

use super::{BUTTON_GAP, OptionsController, ToolbarItem};
use crate::ui::{
    theme::{Theme, theme_helpers as th},
    utils::anchored_rect,
};

/// Disclosure button that opens a list of options.
///
/// Choosing an option reports `Effect::OptionSelected` and closes the list.
/// With `auto_close` (the default) the hosting dropdown closes as well, both
/// on a choice and when the list is dismissed.
#[derive(Debug, Clone)]
pub struct SelectItem {
    id: String,
    label: String,
    auto_close: bool,
    selected: Option<usize>,
    controller: OptionsController,
}

impl SelectItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<SelectOptionSpec>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            auto_close: true,
            selected: None,
            controller: OptionsController::new(options),
        }
    }

    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn controller(&self) -> &OptionsController {
        &self.controller
    }

    pub fn selected(&self) -> Option<&SelectOptionSpec> {
        self.selected.and_then(|index| self.controller.options().get(index))
    }

    fn button_text(&self) -> String {
        format!(" {} ▾ ", self.label)
    }

    fn close_host(&self, ctx: &RenderContext) {
        if self.auto_close {
            ctx.close.close();
        }
    }

    fn choose(&mut self, ctx: &RenderContext) -> Vec<Effect> {
        let Some((index, option)) = self.controller.choose() else {
            return Vec::new();
        };
        debug!(id = %self.id, value = %option.value, "toolbar option selected");
        self.selected = Some(index);
        self.close_host(ctx);
        vec![Effect::OptionSelected {
            id: self.id.clone(),
            value: option.value,
        }]
    }

    fn dismiss_options(&mut self, ctx: &RenderContext) {
        self.controller.close();
        self.close_host(ctx);
    }
}

impl Measure for SelectItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn width(&self) -> u16 {
        display_width(&self.button_text()).saturating_add(BUTTON_GAP)
    }
}

impl ToolbarItem for SelectItem {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme, ctx: &RenderContext, focused: bool) {
        if ctx.collapsed {
            let mut spans = vec![Span::raw(format!(" {} ▸", self.label))];
            if let Some(selected) = self.selected() {
                spans.push(Span::styled(format!(" {}", selected.display()), theme.text_muted_style()));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)).style(th::list_row_style(theme, focused)), area);
            return;
        }

        let active = focused || self.controller.is_open();
        let button_area = Rect {
            width: area.width.saturating_sub(BUTTON_GAP),
            ..area
        };
        frame.render_widget(
            Paragraph::new(self.button_text()).style(th::button_style(theme, active)),
            button_area,
        );
    }

    fn dropdown_width(&self) -> u16 {
        let selected = self.selected().map(|option| display_width(option.display()) + 1).unwrap_or(0);
        display_width(&self.label).saturating_add(selected).saturating_add(4)
    }

    fn activate(&mut self, _ctx: &RenderContext) -> Vec<Effect> {
        self.controller.open(self.selected.unwrap_or(0));
        Vec::new()
    }

    fn is_capturing_input(&self) -> bool {
        self.controller.is_open()
    }

    fn handle_key_events(&mut self, key: KeyEvent, ctx: &RenderContext) -> Vec<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.controller.move_highlight(false),
            KeyCode::Down | KeyCode::Tab => self.controller.move_highlight(true),
            KeyCode::Enter => return self.choose(ctx),
            KeyCode::Esc => self.dismiss_options(ctx),
            _ => {}
        }
        Vec::new()
    }

    fn render_overlay(&mut self, frame: &mut Frame, anchor: Rect, bounds: Rect, theme: &dyn Theme) {
        if !self.controller.is_open() {
            return;
        }
        let options = self.controller.options();
        let widest = options.iter().map(|option| display_width(option.display())).max().unwrap_or(0);
        let height = u16::try_from(options.len()).unwrap_or(u16::MAX).saturating_add(2);
        let area = anchored_rect(anchor, widest.saturating_add(4), height, bounds);

        frame.render_widget(Clear, area);
        let block = th::block(theme, Some(self.label.as_str()), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let highlighted = self.controller.highlighted();
        let mut row_areas = Vec::with_capacity(options.len());
        for (index, option) in options.iter().enumerate() {
            let Ok(offset) = u16::try_from(index) else { break };
            if offset >= inner.height {
                break;
            }
            let row = Rect::new(inner.x, inner.y + offset, inner.width, 1);
            let marker = if self.selected == Some(index) { "•" } else { " " };
            frame.render_widget(
                Paragraph::new(format!("{marker}{}", option.display())).style(th::list_row_style(theme, index == highlighted)),
                row,
            );
            row_areas.push(row);
        }
        self.controller.row_areas = row_areas;
        self.controller.last_area = area;
    }

    fn handle_overlay_click(&mut self, column: u16, row: u16, ctx: &RenderContext) -> Option<Vec<Effect>> {
        if !self.controller.is_open() {
            return None;
        }
        if self.controller.highlight_at(column, row) {
            return Some(self.choose(ctx));
        }
        None
    }

    fn dismiss(&mut self) {
        self.controller.close();
    }
}
