//! Experiment stage machine
//!
//! Defines the lifecycle of one experiment run. The machine is explicit,
//! finite, and deterministic: the engine feeds it events and performs the
//! side effects of whatever stage comes back.

pub mod events;
pub mod machine;

pub use events::{classify_command, StageEvent};
pub use machine::Stage;
