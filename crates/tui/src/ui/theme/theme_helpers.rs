use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the application background behind all panels.
pub fn background_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default().bg(theme.roles().background)
}

/// Toolbar button style; focused buttons use the selection colors.
pub fn button_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    if focused {
        return theme.selection_style().add_modifier(Modifier::BOLD);
    }
    let ThemeRoles {
        surface_muted,
        accent_secondary,
        ..
    } = *theme.roles();
    Style::default().bg(surface_muted).fg(accent_secondary)
}

/// Overflow trigger style; `active` while its dropdown is open.
pub fn trigger_style<T: Theme + ?Sized>(theme: &T, active: bool, focused: bool) -> Style {
    if active {
        let ThemeRoles {
            accent_primary, background, ..
        } = *theme.roles();
        return Style::default().bg(accent_primary).fg(background).add_modifier(Modifier::BOLD);
    }
    button_style(theme, focused)
}

/// Row style inside dropdown lists.
pub fn list_row_style<T: Theme + ?Sized>(theme: &T, highlighted: bool) -> Style {
    if highlighted {
        theme.selection_style()
    } else {
        panel_style(theme)
    }
}

/// Builds key/description hint spans: `[(" Enter", " Activate"), ...]`.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}
