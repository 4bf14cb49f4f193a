//! Obstruction sensing
//!
//! [`BeamSensor`] adapts a digital input pin to [`ObstructionSensor`];
//! [`ObstructionMonitor`] debounces the recovery from an obstructed beam.

use embedded_hal::digital::InputPin;

use crate::config::SensorConfig;
use crate::traits::ObstructionSensor;

/// Beam sensor on a digital input
pub struct BeamSensor<P> {
    pin: P,
    active_high: bool,
}

impl<P: InputPin> BeamSensor<P> {
    /// Create a sensor with the given active level
    pub fn new(pin: P, config: SensorConfig) -> Self {
        Self {
            pin,
            active_high: config.active_high,
        }
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ObstructionSensor for BeamSensor<P> {
    fn is_obstructed(&mut self) -> bool {
        let level = if self.active_high {
            self.pin.is_high()
        } else {
            self.pin.is_low()
        };
        // A sensor we cannot read is not a clear beam
        level.unwrap_or(true)
    }
}

/// Counts consecutive clear reads
///
/// Any obstructed read restarts the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstructionMonitor {
    clear_streak: u8,
    required: u8,
}

impl ObstructionMonitor {
    pub const fn new(required: u8) -> Self {
        Self {
            clear_streak: 0,
            required,
        }
    }

    /// Record one read; returns true once the streak reaches the threshold
    pub fn update(&mut self, obstructed: bool) -> bool {
        if obstructed {
            self.clear_streak = 0;
        } else {
            self.clear_streak = self.clear_streak.saturating_add(1);
        }
        self.is_cleared()
    }

    pub fn is_cleared(&self) -> bool {
        self.clear_streak >= self.required
    }

    pub fn reset(&mut self) {
        self.clear_streak = 0;
    }
}
