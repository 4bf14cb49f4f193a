//! Hardware edge counter trait

use crate::timing::EdgeAction;

/// Errors reported by the edge counter peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterError {
    /// Operation not allowed in the current unit state (e.g. enabled vs. disabled)
    InvalidState,
    /// Watch point or filter value outside what the unit supports
    InvalidArgument,
    /// Removing a watch point that was never added
    NotFound,
    /// Peripheral/driver level failure
    Hardware,
}

/// Trait for a single-channel pulse counting unit
///
/// Modeled after counters with per-edge actions and watch points: each
/// detected edge mutates an internal count according to its [`EdgeAction`],
/// and reaching an armed watch point raises an interrupt. The interrupt
/// handler is wired by the board and is expected to call
/// `PulseSender::on_watch_point` with a timestamp.
///
/// Edge actions and the glitch filter may only be changed while the unit
/// is disabled.
pub trait PulseCounter {
    /// Enable the unit (power up, make it ready to start)
    fn enable(&mut self) -> Result<(), CounterError>;

    /// Disable the unit
    fn disable(&mut self) -> Result<(), CounterError>;

    /// Set how rising and falling edges change the count
    fn set_edge_actions(
        &mut self,
        rising: EdgeAction,
        falling: EdgeAction,
    ) -> Result<(), CounterError>;

    /// Ignore pulses narrower than `max_glitch_ns`
    fn set_glitch_filter(&mut self, max_glitch_ns: u32) -> Result<(), CounterError>;

    /// Arm a watch point at the given count
    fn add_watch_point(&mut self, count: i32) -> Result<(), CounterError>;

    /// Disarm a previously armed watch point
    fn remove_watch_point(&mut self, count: i32) -> Result<(), CounterError>;

    /// Reset the count to zero
    fn clear_count(&mut self) -> Result<(), CounterError>;

    /// Start counting edges
    fn start(&mut self) -> Result<(), CounterError>;

    /// Stop counting edges (count is held)
    ///
    /// Must succeed on a unit that is already stopped.
    fn stop(&mut self) -> Result<(), CounterError>;

    /// Current raw count
    fn count(&self) -> i32;
}
