//! The request lifecycle: select, prompt, interpret, render.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{PendingReading, Reader, Reading};
pub use state::ReadingState;
