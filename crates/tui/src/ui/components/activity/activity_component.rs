//! Activity pane: the toolbar's layout diagnostics above a rolling log of
//! the effects it reported.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};
use toolstrip_engine::MeasurePhase;

use crate::app::App;
use crate::ui::{components::Component, theme::theme_helpers as th};

#[derive(Debug, Default)]
pub struct ActivityComponent;

impl ActivityComponent {
    fn diagnostics_line(app: &App) -> Line<'static> {
        let theme = &*app.ctx.theme;
        let toolbar = &app.toolbar;
        let layout = toolbar.layout();
        let phase = match layout.phase() {
            MeasurePhase::Unmeasured => "unmeasured",
            MeasurePhase::Measuring => "measuring",
            MeasurePhase::Stable => "stable",
        };
        let width = |value: Option<u16>| value.map_or_else(|| "-".to_string(), |w| w.to_string());
        let mut spans = vec![
            Span::styled("layout ", theme.text_muted_style()),
            Span::styled(phase, theme.status_info()),
            Span::styled("  row ", theme.text_muted_style()),
            Span::raw(width(layout.available_width())),
            Span::styled("  window ", theme.text_muted_style()),
            Span::raw(width(layout.container_width())),
            Span::styled("  visible ", theme.text_muted_style()),
            Span::styled(toolbar.split().to_string(), theme.status_success()),
            Span::styled("  collapsed ", theme.text_muted_style()),
            Span::styled((toolbar.items().len() - toolbar.split()).to_string(), theme.status_warning()),
        ];
        if layout.external_width().is_some() {
            spans.push(Span::styled("  fixed", theme.text_secondary_style()));
        }
        Line::from(spans)
    }
}

impl Component for ActivityComponent {
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let block = th::block(&*app.ctx.theme, Some("Activity"), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let areas = self.get_preferred_layout(app, inner);
        frame.render_widget(Paragraph::new(Self::diagnostics_line(app)), areas[0]);

        // Newest first.
        let theme = &*app.ctx.theme;
        let items: Vec<ListItem> = app
            .activity
            .entries()
            .rev()
            .take(usize::from(areas[1].height))
            .map(|entry| ListItem::new(Span::styled(entry.to_string(), theme.text_primary_style())))
            .collect();
        frame.render_widget(List::new(items), areas[1]);
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area).to_vec()
    }
}
