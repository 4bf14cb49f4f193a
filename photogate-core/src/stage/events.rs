//! Events that trigger stage transitions

use crate::input::ExperimentCommand;

/// Events that can trigger stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StageEvent {
    /// User confirmed the parameter; `obstructed` is the beam state sampled
    /// at that moment
    Start { obstructed: bool },
    /// Beam stayed clear for the settle window
    SensorCleared,
    /// A watch-point pulse arrived
    Pulse,
    /// User left the run (confirm/abort outside the configuration stage)
    Abort,
}

/// Shared abort classification for every stage after configuration
///
/// Error, Waiting, Timing and Done all treat a command the same way: a
/// click (or a forced interrupt) leaves the run, rotation is ignored.
/// Keeping this in one place is what guarantees every stage leaves through
/// the same teardown.
pub fn classify_command(command: ExperimentCommand) -> Option<StageEvent> {
    match command {
        ExperimentCommand::Confirm | ExperimentCommand::Interrupt => Some(StageEvent::Abort),
        ExperimentCommand::Adjust(_) => None,
    }
}
