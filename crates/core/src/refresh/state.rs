use serde::Serialize;

/// Phase of a board's refresh cycle.
///
/// ```text
/// Idle --start--> Loading --loaded--> Success --settle--> Idle
///                    |
///                    +--fell back--> Fallback --settle--> Idle
/// ```
///
/// A new refresh may start from any phase; the older one is superseded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    #[default]
    Idle,
    Loading,
    Success,
    Fallback,
}

/// Input to the refresh state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshEvent {
    Start,
    Loaded,
    FellBack,
    Settle,
}

impl RefreshState {
    /// Next phase for `event`, or `None` if the transition is not allowed.
    pub fn on(self, event: RefreshEvent) -> Option<Self> {
        use RefreshEvent::*;
        use RefreshState::*;

        match (self, event) {
            (_, Start) => Some(Loading),
            (Loading, Loaded) => Some(Success),
            (Loading, FellBack) => Some(Fallback),
            (Success | Fallback, Settle) => Some(Idle),
            _ => None,
        }
    }

    /// Whether a refresh request is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Fallback => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = RefreshState::Idle;
        let state = state.on(RefreshEvent::Start).unwrap();
        assert_eq!(state, RefreshState::Loading);
        let state = state.on(RefreshEvent::Loaded).unwrap();
        assert_eq!(state, RefreshState::Success);
        assert_eq!(state.on(RefreshEvent::Settle), Some(RefreshState::Idle));
    }

    #[test]
    fn test_fallback_path() {
        let state = RefreshState::Loading.on(RefreshEvent::FellBack).unwrap();
        assert_eq!(state, RefreshState::Fallback);
        assert_eq!(state.on(RefreshEvent::Settle), Some(RefreshState::Idle));
    }

    #[test]
    fn test_illegal_transitions() {
        assert_eq!(RefreshState::Idle.on(RefreshEvent::Loaded), None);
        assert_eq!(RefreshState::Idle.on(RefreshEvent::Settle), None);
        assert_eq!(RefreshState::Success.on(RefreshEvent::FellBack), None);
    }

    #[test]
    fn test_restart_while_loading() {
        assert_eq!(
            RefreshState::Loading.on(RefreshEvent::Start),
            Some(RefreshState::Loading)
        );
    }
}
