#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TransitionState {
    Idle(usize),                                   // Showing this index, nothing pending
    Transitioning { from: usize, to: usize },      // Fade out started, swap still deferred
}

impl TransitionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionState::Idle(_))
    }
}
