//! Inter-task communication channels
//!
//! Channel types shared between interrupt context, the input task, the
//! experiment task and the progress task. Bring-up declares them as
//! statics with `CriticalSectionRawMutex`.

use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use photogate_core::input::{ExperimentCommand, InputEvent, NavigationCommand};
use photogate_core::timing::PulseEvent;

/// Watch-point timestamps per run (start and stop)
pub const PULSE_CHANNEL_SIZE: usize = 2;

/// Pending experiment commands
pub const COMMAND_CHANNEL_SIZE: usize = 5;

/// Pending menu commands
pub const NAVIGATION_CHANNEL_SIZE: usize = 5;

/// Raw encoder events waiting for routing
pub const INPUT_CHANNEL_SIZE: usize = 8;

/// Timestamps pushed from the watch-point interrupt
pub type PulseChannel<M> = Channel<M, PulseEvent, PULSE_CHANNEL_SIZE>;

/// Commands for the running experiment
pub type CommandChannel<M> = Channel<M, ExperimentCommand, COMMAND_CHANNEL_SIZE>;

/// Commands for the menu layer
pub type NavigationChannel<M> = Channel<M, NavigationCommand, NAVIGATION_CHANNEL_SIZE>;

/// Raw events from the encoder driver
pub type InputChannel<M> = Channel<M, InputEvent, INPUT_CHANNEL_SIZE>;

/// Forced exit of the running experiment
pub type InterruptSignal<M> = Signal<M, ()>;
