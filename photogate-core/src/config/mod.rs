//! Engine configuration
//!
//! Typed configuration with defaults matching the reference hardware.
//! Board bring-up builds a [`PhotogateConfig`], validates it once, and
//! hands it to the engine context.

mod types;

pub use types::{
    ConfigError, ExperimentDefaults, ExperimentKind, PhotogateConfig, SensorConfig, TimingConfig,
};
