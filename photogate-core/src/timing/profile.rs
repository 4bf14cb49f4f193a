//! Per-experiment timing profiles
//!
//! Each experiment type is one variant carrying its user parameter. The
//! variant decides the counter's edge actions, where the two watch points
//! sit, and how a raw count maps back to completed periods.

use core::fmt::Write;

use heapless::String;

use super::{EdgeAction, EdgeTimingConfig};

/// Smallest selectable period count
pub const MIN_PERIODS: u8 = 1;

/// Largest selectable period count
pub const MAX_PERIODS: u8 = 99;

/// Short result label, e.g. `Pen05`
pub type ResultLabel = String<8>;

/// Body shape for the mechanical energy experiment
///
/// Selects which edges of the body crossing the beam start and stop the
/// measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    /// Solid body: blocked then restored
    #[default]
    Solid,
    /// Ring, inner radius to outer radius
    InnerOuter,
    /// Ring, twice the inner radius
    DoubleInner,
    /// Ring, twice the outer radius
    DoubleOuter,
}

impl Shape {
    /// All shapes in selection order
    pub const ALL: [Shape; 4] = [
        Shape::Solid,
        Shape::InnerOuter,
        Shape::DoubleInner,
        Shape::DoubleOuter,
    ];

    /// Position in [`Shape::ALL`]
    pub fn index(self) -> usize {
        match self {
            Shape::Solid => 0,
            Shape::InnerOuter => 1,
            Shape::DoubleInner => 2,
            Shape::DoubleOuter => 3,
        }
    }

    /// Step through the selection, clamped at both ends
    pub fn step(self, delta: i8) -> Self {
        let index = self.index();
        let next = if delta > 0 {
            (index + 1).min(Self::ALL.len() - 1)
        } else if delta < 0 {
            index.saturating_sub(1)
        } else {
            index
        };
        Self::ALL[next]
    }

    /// Display label using the subscript glyphs (`\x02` = i, `\x01` = e)
    pub fn label(self) -> &'static str {
        match self {
            Shape::Solid => "Solid",
            Shape::InnerOuter => "R\x02+R\x01",
            Shape::DoubleInner => "2R\x02",
            Shape::DoubleOuter => "2R\x01",
        }
    }
}

/// Timing profile of one experiment type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingProfile {
    /// Full periods: one count per rising edge, two edges per period
    Pendulum { periods: u8 },
    /// Half-period sensing: one count per falling edge
    Spring { periods: u8 },
    /// Transit time of a body, edges selected by shape
    Energy { shape: Shape },
}

impl TimingProfile {
    /// Pendulum profile with the period count clamped to [1, 99]
    pub fn pendulum(periods: u8) -> Self {
        TimingProfile::Pendulum {
            periods: clamp_periods(periods),
        }
    }

    /// Spring profile with the period count clamped to [1, 99]
    pub fn spring(periods: u8) -> Self {
        TimingProfile::Spring {
            periods: clamp_periods(periods),
        }
    }

    /// Mechanical energy profile
    pub fn energy(shape: Shape) -> Self {
        TimingProfile::Energy { shape }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            TimingProfile::Pendulum { .. } => "Pendulum",
            TimingProfile::Spring { .. } => "Spring",
            TimingProfile::Energy { .. } => "Mechanical  Energy",
        }
    }

    /// Rising and falling edge actions
    pub fn edge_actions(&self) -> (EdgeAction, EdgeAction) {
        use EdgeAction::*;

        match self {
            TimingProfile::Pendulum { .. } => (Increase, Hold),
            TimingProfile::Spring { .. } => (Hold, Increase),
            TimingProfile::Energy { shape } => match shape {
                Shape::InnerOuter => (Increase, Hold),
                Shape::Solid | Shape::DoubleInner | Shape::DoubleOuter => (Increase, Increase),
            },
        }
    }

    /// Start and stop watch points
    pub fn watch_points(&self) -> [i32; 2] {
        match *self {
            TimingProfile::Pendulum { periods } => [1, 2 * periods as i32 + 1],
            TimingProfile::Spring { periods } => [1, periods as i32 + 1],
            TimingProfile::Energy { shape } => match shape {
                Shape::Solid | Shape::InnerOuter => [1, 2],
                Shape::DoubleInner => [2, 3],
                Shape::DoubleOuter => [1, 4],
            },
        }
    }

    /// Counter descriptor for a run of this profile
    pub fn edge_config(&self, glitch_filter_ns: u32) -> EdgeTimingConfig {
        let (rising, falling) = self.edge_actions();
        EdgeTimingConfig {
            rising,
            falling,
            glitch_filter_ns,
            watch_points: self.watch_points(),
        }
    }

    /// Completed periods for a raw count, or `None` if the profile does
    /// not count periods
    ///
    /// The start watch point contributes the first count, so it is
    /// subtracted before conversion. At the stop watch point the result
    /// equals the configured period count.
    pub fn count_to_periods(&self, raw_count: i32) -> Option<u8> {
        let counted = raw_count.saturating_sub(1).max(0);
        let periods = match self {
            TimingProfile::Pendulum { .. } => counted / 2,
            TimingProfile::Spring { .. } => counted,
            TimingProfile::Energy { .. } => return None,
        };
        Some(periods.min(MAX_PERIODS as i32) as u8)
    }

    /// Configured period count, if the profile counts periods
    pub fn target_periods(&self) -> Option<u8> {
        match *self {
            TimingProfile::Pendulum { periods } | TimingProfile::Spring { periods } => {
                Some(periods)
            }
            TimingProfile::Energy { .. } => None,
        }
    }

    /// Apply one encoder detent to the user parameter
    pub fn adjust(&mut self, delta: i8) {
        match self {
            TimingProfile::Pendulum { periods } | TimingProfile::Spring { periods } => {
                *periods = step_periods(*periods, delta);
            }
            TimingProfile::Energy { shape } => {
                *shape = shape.step(delta);
            }
        }
    }

    /// Label recorded with each result
    pub fn label(&self) -> ResultLabel {
        let mut label = ResultLabel::new();
        // Every label fits in 8 bytes
        match *self {
            TimingProfile::Pendulum { periods } => {
                let _ = write!(label, "Pen{:02}", periods);
            }
            TimingProfile::Spring { periods } => {
                let _ = write!(label, "Spr{:02}", periods);
            }
            TimingProfile::Energy { shape } => {
                let _ = label.push_str(shape.label());
            }
        }
        label
    }
}

fn clamp_periods(periods: u8) -> u8 {
    periods.clamp(MIN_PERIODS, MAX_PERIODS)
}

fn step_periods(periods: u8, delta: i8) -> u8 {
    if delta > 0 {
        periods.saturating_add(1).min(MAX_PERIODS)
    } else if delta < 0 {
        periods.saturating_sub(1).max(MIN_PERIODS)
    } else {
        periods
    }
}
