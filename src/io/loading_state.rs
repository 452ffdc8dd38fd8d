//! Shared bookkeeping of which widget fetches are in flight.

use std::collections::HashSet;

/// Widgets that fetch in the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Weather,
    News,
    Quote,
    Apod,
    Pokemon,
    Chat,
}

/// Holds the kinds with a request in flight.
///
/// Wrapped in an `Arc<Mutex<>>` and shared with the worker threads; results
/// themselves come through a channel.
#[derive(Debug, Default)]
pub struct LoadingState {
    in_progress: HashSet<WidgetKind>,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self, kind: WidgetKind) -> bool {
        self.in_progress.contains(&kind)
    }

    pub fn any_loading(&self) -> bool {
        !self.in_progress.is_empty()
    }

    /// Marks `kind` as started. Returns `false` if it already was.
    pub fn begin(&mut self, kind: WidgetKind) -> bool {
        self.in_progress.insert(kind)
    }

    pub fn finish(&mut self, kind: WidgetKind) {
        self.in_progress.remove(&kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_exclusive_per_kind() {
        let mut state = LoadingState::new();
        assert!(state.begin(WidgetKind::Quote));
        assert!(!state.begin(WidgetKind::Quote));
        assert!(state.begin(WidgetKind::News));
        state.finish(WidgetKind::Quote);
        assert!(!state.is_loading(WidgetKind::Quote));
        assert!(state.any_loading());
    }
}
