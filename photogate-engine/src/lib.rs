//! Async measurement engine for the photogate timer
//!
//! Runs on top of `photogate-core` and embassy primitives:
//!
//! - [`edge_timer`]: arms the hardware edge counter and receives watch-point
//!   timestamps from interrupt context
//! - [`experiment`]: the stage loop shared by every experiment type
//! - [`history`]: browsing and removing stored results
//! - [`arbiter`]: the single lock around the character display
//! - [`progress`]: the hourglass animation task
//! - [`router`]: splits encoder input between menu and experiment
//! - [`screen`]: display layout and custom glyphs
//!
//! Everything is generic over [`RawMutex`](embassy_sync::blocking_mutex::raw::RawMutex)
//! so the same code runs with `CriticalSectionRawMutex` on target and
//! `NoopRawMutex` in host tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod arbiter;
pub mod channels;
pub mod edge_timer;
pub mod experiment;
pub mod history;
pub mod progress;
pub mod router;
pub mod screen;

#[cfg(test)]
mod testing;

pub use arbiter::OutputArbiter;
pub use edge_timer::{EdgeTimer, PulseSender};
pub use experiment::{EngineContext, EngineError, Experiment};
pub use history::HistoryBrowser;
pub use progress::ProgressIndicator;
pub use router::InputRouter;
