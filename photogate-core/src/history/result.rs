//! Single measurement result

use crate::timing::{format_elapsed, ElapsedString, ResultLabel};

/// Result of one completed run
///
/// Immutable once produced: the formatted string is derived from
/// `elapsed_us` at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementResult {
    label: ResultLabel,
    elapsed: ElapsedString,
    elapsed_us: u64,
}

impl MeasurementResult {
    /// Create a result from its label and exact elapsed time
    pub fn new(label: ResultLabel, elapsed_us: u64) -> Self {
        Self {
            label,
            elapsed: format_elapsed(elapsed_us),
            elapsed_us,
        }
    }

    /// Experiment type and parameter, e.g. `Pen05`
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Elapsed time formatted as `SSS,mmm uuu`
    pub fn elapsed(&self) -> &str {
        self.elapsed.as_str()
    }

    /// Elapsed time in microseconds
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_formats_elapsed() {
        let mut label = ResultLabel::new();
        label.push_str("Pen05").unwrap();

        let result = MeasurementResult::new(label, 2_500_000);
        assert_eq!(result.label(), "Pen05");
        assert_eq!(result.elapsed(), "002,500 000");
        assert_eq!(result.elapsed_us(), 2_500_000);
    }
}
