//! Stage machine definition
//!
//! Counter, display and indicator behavior is a function of the current
//! stage and an event.

use super::events::StageEvent;

/// Experiment stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// User adjusting the parameter; counter idle
    #[default]
    Config,
    /// Beam obstructed; waiting for it to clear
    Error,
    /// Counter armed, waiting for the start pulse
    Waiting,
    /// Start pulse seen, waiting for the stop pulse
    Timing,
    /// Result recorded; idle until the user returns to configuration
    Done,
}

impl Stage {
    /// Status line shown on the bottom row
    pub fn status_text(&self) -> &'static str {
        match self {
            Stage::Config => "     !!Config!!     ",
            Stage::Error => "!Obstructed  Sensor!",
            Stage::Waiting => "     !!Waiting!!    ",
            Stage::Timing => "     !!Timing!!     ",
            Stage::Done => "      !!Done!!      ",
        }
    }

    /// Process an event and return the next stage
    ///
    /// This is the core transition logic.
    pub fn transition(self, event: StageEvent) -> Self {
        use Stage::*;
        use StageEvent::*;

        match (self, event) {
            // Config transitions
            (Config, Start { obstructed: true }) => Error,
            (Config, Start { obstructed: false }) => Waiting,

            // Error transitions
            (Error, SensorCleared) => Waiting,

            // Waiting transitions
            (Waiting, Pulse) => Timing,

            // Timing transitions
            (Timing, Pulse) => Done,

            // Abort from every stage past configuration
            (Error | Waiting | Timing | Done, Abort) => Config,

            // Default: stay in current stage
            _ => self,
        }
    }
}
