/// Where a single reading request is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadingState {
    Idle,
    Selected,
    InterpretationPending,
    InterpretationDone,
    Rendered,
    Complete,
    Failed,
}

impl ReadingState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    pub fn can_advance_to(self, next: Self) -> bool {
        use ReadingState::*;
        match (self, next) {
            (Idle, Selected)
            | (Selected, InterpretationPending)
            | (Selected, InterpretationDone)
            | (InterpretationPending, InterpretationDone)
            | (InterpretationDone, Rendered)
            | (Rendered, Complete) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// Tracks one request's state and logs each transition.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: ReadingState,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: ReadingState::Idle,
        }
    }

    pub(crate) fn state(&self) -> ReadingState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: ReadingState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal reading transition {:?} -> {next:?}",
            self.state
        );
        tracing::debug!(from = ?self.state, to = ?next, "reading state");
        self.state = next;
    }
}
