//! Board-agnostic core logic for the photogate timer
//!
//! This crate contains all measurement logic that does not depend on
//! specific hardware implementations or on an async runtime:
//!
//! - Hardware abstraction traits (edge counter, character display, sensor, clock)
//! - Edge-timing descriptors and per-experiment timing profiles
//! - Experiment stage machine
//! - Bounded measurement history
//! - Input classification (navigation vs. experiment commands)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod history;
pub mod input;
pub mod sensor;
pub mod stage;
pub mod timing;
pub mod traits;
