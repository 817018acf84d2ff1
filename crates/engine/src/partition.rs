//! Greedy overflow partitioning.
//!
//! Splits an ordered list of items into the prefix that fits the available
//! width (the visible button row) and the remainder (the overflow menu).
//! When anything overflows, the width of the overflow trigger is reserved
//! before fitting begins, so the trigger always has room at the end of the
//! row.

use std::ops::Range;

use serde::Serialize;
use tracing::trace;

/// An item with a stable identity and an intrinsic width in cells.
pub trait Measure {
    /// Identity used for change detection. Must be unique within a list.
    fn id(&self) -> &str;
    /// Width the item occupies when rendered in the button row.
    fn width(&self) -> u16;
}

impl<T: Measure + ?Sized> Measure for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn width(&self) -> u16 {
        (**self).width()
    }
}

impl<T: Measure + ?Sized> Measure for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn width(&self) -> u16 {
        (**self).width()
    }
}

/// The split of an item sequence into visible and collapsed halves.
///
/// `visible ++ collapsed` always equals the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition<T> {
    pub visible: Vec<T>,
    pub collapsed: Vec<T>,
}

impl<T> Partition<T> {
    /// Whether the overflow trigger must be rendered.
    pub fn needs_trigger(&self) -> bool {
        !self.collapsed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visible.len() + self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.collapsed.is_empty()
    }

    /// Maps both halves, preserving order.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Partition<U> {
        Partition {
            visible: self.visible.into_iter().map(&mut f).collect(),
            collapsed: self.collapsed.into_iter().map(&mut f).collect(),
        }
    }
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            collapsed: Vec::new(),
        }
    }
}

/// A partition expressed as index ranges into the input slice.
///
/// The visible row is always a prefix, so both halves are contiguous and
/// `visible.end == collapsed.start`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionIndices {
    pub visible: Range<usize>,
    pub collapsed: Range<usize>,
}

impl PartitionIndices {
    /// Splits `0..len` at `split`, clamped to `len`.
    pub fn at(split: usize, len: usize) -> Self {
        let split = split.min(len);
        Self {
            visible: 0..split,
            collapsed: split..len,
        }
    }

    /// Number of leading visible items.
    pub fn split(&self) -> usize {
        self.visible.end
    }

    pub fn needs_trigger(&self) -> bool {
        !self.collapsed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.collapsed.end
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.end == 0
    }

    /// Borrows both halves out of `items`, which must be the sliced input.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Partition<&'a T> {
        Partition {
            visible: items[self.visible.clone()].iter().collect(),
            collapsed: items[self.collapsed.clone()].iter().collect(),
        }
    }
}

/// Returns how many leading items belong in the visible row.
///
/// An unknown (`None`) or zero width is the probe case: every item is
/// reported visible so the row can be measured at its natural width. The
/// caller must not treat that result as a final layout.
pub fn partition_point<T: Measure>(items: &[T], available_width: Option<u16>, overflow_trigger_width: u16) -> usize {
    let available = match available_width {
        Some(width) if width > 0 => width,
        _ => return items.len(),
    };

    let total = items.iter().fold(0u16, |sum, item| sum.saturating_add(item.width()));
    if total <= available {
        return items.len();
    }

    let budget = available.saturating_sub(overflow_trigger_width);
    let mut running: u16 = 0;
    let mut fitted = 0;
    for item in items {
        let next = running.saturating_add(item.width());
        if next > budget {
            break;
        }
        running = next;
        fitted += 1;
    }
    trace!(available, budget, fitted, total_items = items.len(), "partitioned toolbar items");
    fitted
}

/// Index ranges of the visible row and the overflow menu.
pub fn partition_indices<T: Measure>(
    items: &[T],
    available_width: Option<u16>,
    overflow_trigger_width: u16,
) -> PartitionIndices {
    PartitionIndices::at(partition_point(items, available_width, overflow_trigger_width), items.len())
}

/// Splits `items` into the visible row and the overflow menu.
pub fn partition<T: Measure>(items: &[T], available_width: Option<u16>, overflow_trigger_width: u16) -> Partition<&T> {
    partition_indices(items, available_width, overflow_trigger_width).apply(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: String,
        width: u16,
    }

    impl Measure for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn width(&self) -> u16 {
            self.width
        }
    }

    fn items(widths: &[u16]) -> Vec<Item> {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| Item {
                id: format!("item{index}"),
                width: *width,
            })
            .collect()
    }

    fn ids<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn reserves_trigger_width_when_items_overflow() {
        let items = items(&[40, 40, 40]);
        let split = partition(&items, Some(100), 20);
        assert_eq!(ids(&split.visible), ["item0", "item1"]);
        assert_eq!(ids(&split.collapsed), ["item2"]);
        assert!(split.needs_trigger());
    }

    #[test]
    fn single_oversized_item_collapses_alone() {
        let items = items(&[150]);
        let split = partition(&items, Some(100), 20);
        assert!(split.visible.is_empty());
        assert_eq!(ids(&split.collapsed), ["item0"]);
        assert!(split.needs_trigger());
    }

    #[test]
    fn everything_fits_without_reservation() {
        let items = items(&[10, 10]);
        let split = partition(&items, Some(100), 20);
        assert_eq!(ids(&split.visible), ["item0", "item1"]);
        assert!(split.collapsed.is_empty());
        assert!(!split.needs_trigger());
    }

    #[test]
    fn unknown_width_shows_everything() {
        let items = items(&[500, 500, 500]);
        let split = partition(&items, None, 20);
        assert_eq!(split.visible.len(), 3);
        assert!(split.collapsed.is_empty());

        let split = partition(&items, Some(0), 20);
        assert_eq!(split.visible.len(), 3);
        assert!(split.collapsed.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        let items = items(&[]);
        let split = partition(&items, Some(100), 20);
        assert!(split.is_empty());
        assert!(!split.needs_trigger());
    }

    #[test]
    fn ties_count_as_fitting() {
        let items = items(&[50, 50]);
        let split = partition(&items, Some(100), 20);
        assert_eq!(split.visible.len(), 2);

        // 30 + 50 == 100 - 20
        let items = self::items(&[30, 50, 40]);
        let split = partition(&items, Some(100), 20);
        assert_eq!(ids(&split.visible), ["item0", "item1"]);
    }

    #[test]
    fn trigger_alone_when_reservation_leaves_no_room() {
        let items = items(&[90, 20]);
        let split = partition(&items, Some(100), 20);
        assert!(split.visible.is_empty());
        assert_eq!(split.collapsed.len(), 2);
    }

    #[test]
    fn stops_at_first_item_that_does_not_fit() {
        // The trailing 10 would fit after the 70 is skipped, but the row
        // must stay a prefix of the input.
        let items = items(&[20, 70, 10]);
        let split = partition(&items, Some(60), 5);
        assert_eq!(ids(&split.visible), ["item0"]);
        assert_eq!(ids(&split.collapsed), ["item1", "item2"]);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let items = items(&[u16::MAX, u16::MAX]);
        let split = partition(&items, Some(u16::MAX), 1);
        assert!(split.visible.is_empty());
        assert_eq!(split.collapsed.len(), 2);
    }

    fn width_sequences() -> Vec<Vec<u16>> {
        let choices = [0u16, 1, 7, 20, 33];
        let mut sequences = vec![Vec::new()];
        for length in 1..=4 {
            let mut next = Vec::new();
            for sequence in sequences.iter().filter(|s| s.len() == length - 1) {
                for width in choices {
                    let mut extended = sequence.clone();
                    extended.push(width);
                    next.push(extended);
                }
            }
            sequences.extend(next);
        }
        sequences
    }

    #[test]
    fn every_item_lands_in_exactly_one_half_in_order() {
        for widths in width_sequences() {
            let items = items(&widths);
            for available in [None, Some(0), Some(1), Some(25), Some(60), Some(100)] {
                let split = partition(&items, available, 6);
                assert_eq!(split.len(), items.len());
                let rejoined: Vec<&Item> = split.visible.iter().chain(split.collapsed.iter()).copied().collect();
                let original: Vec<&Item> = items.iter().collect();
                assert_eq!(rejoined, original, "widths {widths:?} available {available:?}");
            }
        }
    }

    #[test]
    fn visible_row_is_the_longest_fitting_prefix() {
        let trigger = 6;
        for widths in width_sequences() {
            let items = items(&widths);
            for available in 1..=100u16 {
                let split = partition_point(&items, Some(available), trigger);
                let total: u16 = widths.iter().sum();
                if total <= available {
                    assert_eq!(split, items.len());
                    continue;
                }
                let budget = available.saturating_sub(trigger);
                let used: u16 = widths[..split].iter().sum();
                assert!(used <= budget, "widths {widths:?} available {available}");
                assert!(split < items.len());
                assert!(used + widths[split] > budget, "one more item would have fit: {widths:?} {available}");
            }
        }
    }

    #[test]
    fn repartitioning_is_stable() {
        for widths in width_sequences() {
            let items = items(&widths);
            for available in [Some(10), Some(45), Some(80)] {
                let first = partition(&items, available, 6);
                let rejoined: Vec<Item> = first.visible.iter().chain(first.collapsed.iter()).map(|i| (*i).clone()).collect();
                let second = partition(&rejoined, available, 6);
                assert_eq!(ids(&first.visible), ids(&second.visible));
                assert_eq!(ids(&first.collapsed), ids(&second.collapsed));
            }
        }
    }

    #[test]
    fn indices_are_contiguous_and_cover_the_input() {
        let items = items(&[40, 40, 40]);
        let indices = partition_indices(&items, Some(100), 20);
        assert_eq!(indices.visible, 0..2);
        assert_eq!(indices.collapsed, 2..3);
        assert_eq!(indices.split(), 2);
        assert!(indices.needs_trigger());
        assert_eq!(indices.len(), 3);

        let probe = partition_indices(&items, None, 20);
        assert_eq!(probe.visible, 0..3);
        assert!(probe.collapsed.is_empty());
        assert!(!probe.needs_trigger());
    }

    #[test]
    fn indices_clamp_and_borrow() {
        let items = items(&[10, 20]);
        assert_eq!(PartitionIndices::at(5, 2), PartitionIndices { visible: 0..2, collapsed: 2..2 });
        assert!(PartitionIndices::default().is_empty());

        let split = PartitionIndices::at(1, 2).apply(&items);
        assert_eq!(ids(&split.visible), ["item0"]);
        assert_eq!(ids(&split.collapsed), ["item1"]);
    }

    #[test]
    fn map_preserves_halves() {
        let items = items(&[40, 40, 40]);
        let split = partition(&items, Some(100), 20).map(|item| item.width);
        assert_eq!(split.visible, vec![40, 40]);
        assert_eq!(split.collapsed, vec![40]);
    }
}
