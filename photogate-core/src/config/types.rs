//! Configuration type definitions

use crate::timing::{Shape, TimingProfile, MAX_PERIODS, MIN_PERIODS};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timing interval is zero
    ZeroInterval,
    /// Clear streak must be at least one read
    ZeroClearPolls,
    /// Default period count outside [1, 99]
    PeriodsOutOfRange,
}

/// Experiment type selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExperimentKind {
    Pendulum,
    Spring,
    Energy,
}

/// Timing and polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Counter glitch filter width in nanoseconds
    pub glitch_filter_ns: u32,
    /// Pulse channel timeout while Waiting/Timing
    pub pulse_poll_ms: u32,
    /// Sensor poll interval while obstructed
    pub sensor_poll_ms: u32,
    /// Consecutive clear reads needed to leave the Error stage
    pub sensor_clear_polls: u8,
    /// Hourglass frame time
    pub animation_frame_ms: u32,
    /// Window for the second click that confirms a history removal
    pub remove_confirm_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            glitch_filter_ns: 100,
            pulse_poll_ms: 40,
            sensor_poll_ms: 20,
            sensor_clear_polls: 5,
            animation_frame_ms: 500,
            remove_confirm_ms: 3_000,
        }
    }
}

/// Initial parameter for each experiment type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExperimentDefaults {
    pub pendulum_periods: u8,
    pub spring_periods: u8,
    pub energy_shape: Shape,
}

impl Default for ExperimentDefaults {
    fn default() -> Self {
        Self {
            pendulum_periods: 10,
            spring_periods: 10,
            energy_shape: Shape::Solid,
        }
    }
}

/// Obstruction sensor wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Pin reads high while the beam is blocked
    pub active_high: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { active_high: true }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhotogateConfig {
    pub timing: TimingConfig,
    pub defaults: ExperimentDefaults,
    pub sensor: SensorConfig,
}

impl PhotogateConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        let intervals = [
            timing.pulse_poll_ms,
            timing.sensor_poll_ms,
            timing.animation_frame_ms,
            timing.remove_confirm_ms,
        ];
        if intervals.contains(&0) {
            return Err(ConfigError::ZeroInterval);
        }
        if timing.sensor_clear_polls == 0 {
            return Err(ConfigError::ZeroClearPolls);
        }

        let periods_ok = |p: u8| (MIN_PERIODS..=MAX_PERIODS).contains(&p);
        if !periods_ok(self.defaults.pendulum_periods) || !periods_ok(self.defaults.spring_periods)
        {
            return Err(ConfigError::PeriodsOutOfRange);
        }

        Ok(())
    }

    /// Initial profile for an experiment type
    pub fn profile(&self, kind: ExperimentKind) -> TimingProfile {
        match kind {
            ExperimentKind::Pendulum => TimingProfile::pendulum(self.defaults.pendulum_periods),
            ExperimentKind::Spring => TimingProfile::spring(self.defaults.spring_periods),
            ExperimentKind::Energy => TimingProfile::energy(self.defaults.energy_shape),
        }
    }
}
