use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use toolstrip_engine::{Measure, RenderContext};
use toolstrip_types::Effect;
use toolstrip_util::{display_width, truncate_to_width};
use tracing::debug;

use super::{BUTTON_GAP, ToolbarItem};
use crate::ui::theme::{Theme, theme_helpers as th};

/// Icon-labeled action button.
///
/// In the row it shows `icon label`; in the dropdown it shows the label
/// followed by the muted description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem {
    id: String,
    label: String,
    icon: Option<String>,
    description: Option<String>,
    auto_close: bool,
}

impl ActionItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            description: None,
            auto_close: true,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    fn button_text(&self) -> String {
        match &self.icon {
            Some(icon) => format!(" {icon} {} ", self.label),
            None => format!(" {} ", self.label),
        }
    }
}

impl Measure for ActionItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn width(&self) -> u16 {
        display_width(&self.button_text()).saturating_add(BUTTON_GAP)
    }
}

impl ToolbarItem for ActionItem {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme, ctx: &RenderContext, focused: bool) {
        if ctx.collapsed {
            let mut spans = vec![Span::raw(format!(" {}", self.label))];
            if let Some(description) = &self.description {
                let used = display_width(&self.label).saturating_add(3);
                let remaining = area.width.saturating_sub(used);
                spans.push(Span::styled(
                    format!("  {}", truncate_to_width(description, remaining)),
                    theme.text_muted_style(),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)).style(th::list_row_style(theme, focused)), area);
            return;
        }

        let button_area = Rect {
            width: area.width.saturating_sub(BUTTON_GAP),
            ..area
        };
        frame.render_widget(
            Paragraph::new(self.button_text()).style(th::button_style(theme, focused)),
            button_area,
        );
    }

    fn dropdown_width(&self) -> u16 {
        let description = self.description.as_deref().map(|d| display_width(d).saturating_add(2)).unwrap_or(0);
        display_width(&self.label).saturating_add(description).saturating_add(2)
    }

    fn activate(&mut self, ctx: &RenderContext) -> Vec<Effect> {
        debug!(id = %self.id, collapsed = ctx.collapsed, "toolbar action activated");
        if self.auto_close {
            ctx.close.close();
        }
        vec![Effect::ItemActivated { id: self.id.clone() }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolstrip_engine::CloseHandle;

    #[test]
    fn width_covers_icon_label_and_gap() {
        let item = ActionItem::new("resolve", "Resolve").with_icon("+");
        // " + Resolve " plus the gap
        assert_eq!(item.width(), 11 + BUTTON_GAP);
        assert_eq!(ActionItem::new("a", "Ack").width(), 5 + BUTTON_GAP);
    }

    #[test]
    fn collapsed_activation_closes_dropdown() {
        let close = CloseHandle::connected();
        let mut item = ActionItem::new("resolve", "Resolve");
        let effects = item.activate(&RenderContext::collapsed(close.clone()));
        assert_eq!(effects, vec![Effect::ItemActivated { id: "resolve".into() }]);
        assert!(close.take_request());
    }

    #[test]
    fn auto_close_can_be_disabled() {
        let close = CloseHandle::connected();
        let mut item = ActionItem::new("resolve", "Resolve").with_auto_close(false);
        item.activate(&RenderContext::collapsed(close.clone()));
        assert!(!close.take_request());
    }
}
