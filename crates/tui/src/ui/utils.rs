//! Layout helpers shared by popups.

use ratatui::layout::{Position, Rect};

/// Places a `width` x `height` popup next to `anchor`, inside `bounds`.
///
/// The popup opens below the anchor when there is room, otherwise above it.
/// It is left-aligned with the anchor and shifted left when it would cross
/// the right edge. Dimensions are clamped to `bounds`.
pub fn anchored_rect(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let below = anchor.bottom();
    let y = if below.saturating_add(height) <= bounds.bottom() {
        below
    } else if anchor.y.saturating_sub(bounds.y) >= height {
        anchor.y - height
    } else {
        bounds.bottom().saturating_sub(height)
    };

    let max_x = bounds.right().saturating_sub(width);
    let x = anchor.x.clamp(bounds.x, max_x.max(bounds.x));
    Rect::new(x, y.max(bounds.y), width, height)
}

/// Index of the first rect containing the given cell.
pub fn find_target_index_by_mouse_position(areas: &[Rect], column: u16, row: u16) -> Option<usize> {
    let position = Position::new(column, row);
    areas.iter().position(|area| area.contains(position))
}
