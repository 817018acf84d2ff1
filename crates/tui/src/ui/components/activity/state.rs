use std::collections::VecDeque;

use toolstrip_types::Effect;

/// Entries kept before the oldest are dropped.
pub const MAX_ACTIVITY_ENTRIES: usize = 200;

/// Rolling log of what the toolbar reported.
#[derive(Debug)]
pub struct ActivityState {
    entries: VecDeque<String>,
}

impl Default for ActivityState {
    fn default() -> Self {
        let mut state = Self {
            entries: VecDeque::with_capacity(MAX_ACTIVITY_ENTRIES),
        };
        state.push_message("Welcome to toolstrip");
        state
    }
}

impl ActivityState {
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        if self.entries.len() == MAX_ACTIVITY_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    /// Records a toolbar effect. `Quit` is not logged.
    pub fn record(&mut self, effect: &Effect) {
        let message = match effect {
            Effect::ItemActivated { id } => format!("activated {id}"),
            Effect::OptionSelected { id, value } => format!("{id} = {value}"),
            Effect::OverflowToggled { open: true } => "overflow opened".to_string(),
            Effect::OverflowToggled { open: false } => "overflow closed".to_string(),
            Effect::Quit => return,
        };
        self.push_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_effects_in_order() {
        let mut state = ActivityState::default();
        state.record(&Effect::ItemActivated { id: "resolve".into() });
        state.record(&Effect::OptionSelected {
            id: "sort".into(),
            value: "newest".into(),
        });
        state.record(&Effect::Quit);
        let entries: Vec<&str> = state.entries().skip(1).collect();
        assert_eq!(entries, ["activated resolve", "sort = newest"]);
    }

    #[test]
    fn drops_oldest_entries_past_capacity() {
        let mut state = ActivityState::default();
        for index in 0..MAX_ACTIVITY_ENTRIES + 5 {
            state.push_message(format!("entry {index}"));
        }
        assert_eq!(state.len(), MAX_ACTIVITY_ENTRIES);
        assert_eq!(state.entries().next(), Some("entry 5"));
    }
}
