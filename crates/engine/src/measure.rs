//! Width-measurement state machine.
//!
//! The toolbar cannot know how much room its buttons have until the button
//! row has been drawn once. `LayoutState` tracks that measurement and decides
//! when it must be thrown away:
//!
//! - when the item identities change (a new item set gets a fresh probe);
//! - when the terminal grows and no width is imposed (more items may fit).
//!
//! Shrinks never force a probe; the next button-row observation reports the
//! smaller width and the partitioner collapses items on its own.

use tracing::debug;

/// Measurement progress of the button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurePhase {
    /// No trusted width; the next pass renders every item to probe.
    #[default]
    Unmeasured,
    /// A probe pass was rendered and its width has not been observed yet.
    Measuring,
    /// The stored width reflects the last rendered row.
    Stable,
}

/// Shallow, order-sensitive comparison of two id sequences.
pub fn same_ids<A, B>(left: &[A], right: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.as_ref() == b.as_ref())
}

/// Layout bookkeeping owned by a single toolbar instance.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    /// Last observed terminal (window) width; `None` until the first report.
    container_width: Option<u16>,
    /// Width the button row occupied on its last render.
    measured_buttons_width: Option<u16>,
    overflow_trigger_width: u16,
    /// Width imposed by the caller; disables self-measurement.
    external_width: Option<u16>,
    /// Cells taken by the leading label when a width is imposed.
    menu_label_width: u16,
    ids: Vec<String>,
    phase: MeasurePhase,
}

impl LayoutState {
    pub fn new(overflow_trigger_width: u16) -> Self {
        Self {
            overflow_trigger_width,
            ..Self::default()
        }
    }

    pub fn with_external_width(mut self, width: Option<u16>) -> Self {
        self.external_width = width;
        self
    }

    pub fn phase(&self) -> MeasurePhase {
        self.phase
    }

    pub fn container_width(&self) -> Option<u16> {
        self.container_width
    }

    pub fn measured_buttons_width(&self) -> Option<u16> {
        self.measured_buttons_width
    }

    pub fn overflow_trigger_width(&self) -> u16 {
        self.overflow_trigger_width
    }

    pub fn external_width(&self) -> Option<u16> {
        self.external_width
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Compares `ids` with the previous sequence and invalidates the
    /// measurement when they differ. Returns `true` on an identity change.
    ///
    /// Call at the top of every update cycle, before `available_width`.
    pub fn sync_ids<I, S>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let next: Vec<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        if same_ids(&next, &self.ids) {
            return false;
        }
        debug!(previous = self.ids.len(), next = next.len(), "toolbar item identities changed; re-probing");
        self.ids = next;
        self.invalidate();
        true
    }

    /// Width the partitioner may fit items into.
    ///
    /// `None` means the row has not been measured and every item should be
    /// rendered to probe its natural width.
    pub fn available_width(&self) -> Option<u16> {
        match self.external_width {
            Some(width) => Some(width.saturating_sub(self.menu_label_width)),
            None => self.measured_buttons_width,
        }
    }

    /// Whether the next render is a probe pass.
    pub fn is_probing(&self) -> bool {
        matches!(self.available_width(), None | Some(0))
    }

    /// Records that a probe pass was rendered.
    pub fn begin_probe(&mut self) {
        if self.phase == MeasurePhase::Unmeasured {
            self.phase = MeasurePhase::Measuring;
        }
    }

    /// Feeds the width of the rendered button row.
    ///
    /// Returns `true` when the stored width changed and the toolbar must be
    /// rendered again with the new budget. Ignored while a width is imposed.
    pub fn observe_buttons_width(&mut self, width: u16) -> bool {
        if self.external_width.is_some() {
            return false;
        }
        self.phase = MeasurePhase::Stable;
        if self.measured_buttons_width == Some(width) {
            return false;
        }
        debug!(previous = ?self.measured_buttons_width, width, "button row width changed");
        self.measured_buttons_width = Some(width);
        true
    }

    /// Feeds a settled (debounced) terminal width.
    ///
    /// Growth without an imposed width discards the measurement so the next
    /// pass probes for more room. Returns `true` when that happened.
    pub fn observe_window_width(&mut self, width: u16) -> bool {
        let previous = self.container_width.unwrap_or(0);
        self.container_width = Some(width);
        if self.external_width.is_none() && width > previous {
            debug!(previous, width, "window grew; re-probing toolbar width");
            self.invalidate();
            return true;
        }
        false
    }

    /// Imposes (or lifts) an external width. Lifting it forces a probe.
    pub fn set_external_width(&mut self, width: Option<u16>) {
        if self.external_width == width {
            return;
        }
        self.external_width = width;
        self.invalidate();
    }

    pub fn set_menu_label_width(&mut self, width: u16) {
        self.menu_label_width = width;
    }

    fn invalidate(&mut self) {
        self.measured_buttons_width = None;
        self.phase = MeasurePhase::Unmeasured;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(width: u16) -> LayoutState {
        let mut state = LayoutState::new(5);
        state.sync_ids(["a", "b", "c"]);
        state.begin_probe();
        state.observe_buttons_width(width);
        state
    }

    #[test]
    fn starts_unmeasured_and_probes() {
        let mut state = LayoutState::new(5);
        assert_eq!(state.phase(), MeasurePhase::Unmeasured);
        assert_eq!(state.available_width(), None);
        assert!(state.is_probing());

        state.begin_probe();
        assert_eq!(state.phase(), MeasurePhase::Measuring);

        assert!(state.observe_buttons_width(80));
        assert_eq!(state.phase(), MeasurePhase::Stable);
        assert_eq!(state.available_width(), Some(80));
    }

    #[test]
    fn repeated_observation_of_same_width_is_quiet() {
        let mut state = measured(80);
        assert!(!state.observe_buttons_width(80));
        assert!(state.observe_buttons_width(60));
        assert_eq!(state.available_width(), Some(60));
    }

    #[test]
    fn identity_change_discards_measurement() {
        let mut state = measured(80);
        assert!(!state.sync_ids(["a", "b", "c"]));
        assert_eq!(state.available_width(), Some(80));

        assert!(state.sync_ids(["a", "c", "b"]));
        assert_eq!(state.available_width(), None);
        assert_eq!(state.phase(), MeasurePhase::Unmeasured);
    }

    #[test]
    fn shorter_id_list_is_an_identity_change() {
        let mut state = measured(80);
        assert!(state.sync_ids(["a", "b"]));
        assert_eq!(state.ids(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn window_growth_forces_probe() {
        let mut state = measured(80);
        state.observe_window_width(800);
        state.observe_buttons_width(80);

        assert!(state.observe_window_width(1000));
        assert_eq!(state.available_width(), None);
        assert_eq!(state.container_width(), Some(1000));
    }

    #[test]
    fn window_shrink_keeps_measurement() {
        let mut state = measured(80);
        state.observe_window_width(1000);
        state.observe_buttons_width(80);

        assert!(!state.observe_window_width(800));
        assert_eq!(state.available_width(), Some(80));
        assert_eq!(state.container_width(), Some(800));
    }

    #[test]
    fn external_width_ignores_observations() {
        let mut state = LayoutState::new(5).with_external_width(Some(60));
        state.set_menu_label_width(8);
        assert_eq!(state.available_width(), Some(52));

        assert!(!state.observe_buttons_width(10));
        assert!(!state.observe_window_width(2000));
        assert_eq!(state.available_width(), Some(52));
    }

    #[test]
    fn label_wider_than_external_width_probes_instead_of_collapsing() {
        let mut state = LayoutState::new(5).with_external_width(Some(6));
        state.set_menu_label_width(8);
        assert_eq!(state.available_width(), Some(0));
        assert!(state.is_probing());
    }

    #[test]
    fn lifting_external_width_reprobes() {
        let mut state = LayoutState::new(5).with_external_width(Some(60));
        state.set_external_width(None);
        assert_eq!(state.available_width(), None);
        assert_eq!(state.phase(), MeasurePhase::Unmeasured);
    }

    #[test]
    fn same_ids_compares_order() {
        assert!(same_ids(&["a", "b"], &["a".to_string(), "b".to_string()]));
        assert!(!same_ids(&["a", "b"], &["b", "a"]));
        assert!(!same_ids::<&str, &str>(&[], &["a"]));
        assert!(same_ids::<&str, &str>(&[], &[]));
    }
}
