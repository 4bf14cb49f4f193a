//! Edge-timing descriptors
//!
//! Describes how the edge counter must be configured for one experiment
//! run and what the counter reports back.

pub mod format;
pub mod profile;

pub use format::{format_elapsed, format_periods, ElapsedString, PeriodsString};
pub use profile::{ResultLabel, Shape, TimingProfile, MAX_PERIODS, MIN_PERIODS};

/// Default glitch filter width
pub const DEFAULT_GLITCH_FILTER_NS: u32 = 100;

/// Number of watch points armed per run (start and stop)
pub const WATCH_POINT_COUNT: usize = 2;

/// How a detected edge changes the pulse count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeAction {
    /// Edge is not counted and does not affect the count
    Ignore,
    /// Count is held
    Hold,
    /// Count is incremented
    Increase,
}

/// Complete counter configuration for one experiment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeTimingConfig {
    /// Action on rising edges (beam blocked)
    pub rising: EdgeAction,
    /// Action on falling edges (beam restored)
    pub falling: EdgeAction,
    /// Minimum pulse width in nanoseconds; narrower pulses are ignored
    pub glitch_filter_ns: u32,
    /// Counts at which the counter emits a timestamped event.
    /// The first ends the waiting stage, the second ends the run.
    pub watch_points: [i32; WATCH_POINT_COUNT],
}

impl EdgeTimingConfig {
    /// Count that starts the measurement
    pub fn start_point(&self) -> i32 {
        self.watch_points[0]
    }

    /// Count that stops the measurement
    pub fn stop_point(&self) -> i32 {
        self.watch_points[1]
    }

    /// Check that watch points are positive and strictly ascending
    ///
    /// The counter reports watch points in the order they are reached,
    /// so ascending thresholds are what keep start before stop.
    pub fn is_valid(&self) -> bool {
        self.start_point() > 0 && self.stop_point() > self.start_point()
    }
}

/// Timestamp captured by the watch-point interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseEvent {
    /// Monotonic time of the watch-point hit in microseconds
    pub timestamp_us: u64,
}

impl PulseEvent {
    /// Create an event at the given time
    pub const fn at(timestamp_us: u64) -> Self {
        Self { timestamp_us }
    }

    /// Microseconds from `start` to this event, saturating at zero
    pub fn elapsed_since(&self, start: PulseEvent) -> u64 {
        self.timestamp_us.saturating_sub(start.timestamp_us)
    }
}
