//! Terminal text measurement.
//!
//! Widths are display cells, not bytes or chars, so wide glyphs and icons
//! size buttons correctly.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal cells, saturated to `u16`.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// Truncates `text` so it fits in `max_width` cells, appending `…` when cut.
pub fn truncate_to_width(text: &str, max_width: u16) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = usize::from(max_width - 1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_wide_glyphs() {
        assert_eq!(display_width("Sort"), 4);
        assert_eq!(display_width("表示"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("Resolve", 10), "Resolve");
        assert_eq!(truncate_to_width("Resolve", 4), "Res…");
        assert_eq!(truncate_to_width("Resolve", 0), "");
        assert_eq!(truncate_to_width("表示する", 4), "表…");
    }
}
