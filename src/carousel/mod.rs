//! Pieces shared by the image and persona slideshows.

pub mod index_cycle;
pub mod state;
pub mod timer;

pub use index_cycle::IndexCycle;
pub use state::TransitionState;
pub use timer::AutoAdvanceTimer;
