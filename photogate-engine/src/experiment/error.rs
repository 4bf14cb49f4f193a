//! Engine error type

use photogate_core::traits::{CounterError, DisplayError};

/// Errors that end an experiment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Edge counter rejected a configuration or teardown step
    Counter(CounterError),
    /// Display write failed
    Display(DisplayError),
}

impl From<CounterError> for EngineError {
    fn from(e: CounterError) -> Self {
        EngineError::Counter(e)
    }
}

impl From<DisplayError> for EngineError {
    fn from(e: DisplayError) -> Self {
        EngineError::Display(e)
    }
}
