//! Bounded measurement history
//!
//! Completed results are kept in insertion order in a fixed-capacity log.
//! When the log is full the oldest entry is evicted.

mod log;
mod result;

pub use log::{HistoryLog, HistoryRow, HISTORY_CAPACITY};
pub use result::MeasurementResult;
