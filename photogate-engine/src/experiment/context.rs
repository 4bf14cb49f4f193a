//! Engine context

use embassy_sync::blocking_mutex::raw::RawMutex;

use photogate_core::config::PhotogateConfig;
use photogate_core::history::HistoryLog;

use crate::arbiter::OutputArbiter;
use crate::channels::CommandChannel;
use crate::edge_timer::EdgeTimer;
use crate::progress::ProgressIndicator;

/// Everything an experiment run needs, built once at bring-up
///
/// Passed by `&mut` into each [`Experiment`](super::Experiment), so at most
/// one run can use the counter at a time. The history outlives the runs.
pub struct EngineContext<'a, M: RawMutex, C, S, K, D> {
    pub timer: EdgeTimer<'a, M, C>,
    pub sensor: S,
    pub clock: K,
    pub arbiter: &'a OutputArbiter<M, D>,
    pub commands: &'a CommandChannel<M>,
    pub progress: &'a ProgressIndicator<M>,
    pub history: HistoryLog,
    pub config: PhotogateConfig,
}

impl<'a, M: RawMutex, C, S, K, D> EngineContext<'a, M, C, S, K, D> {
    pub fn new(
        timer: EdgeTimer<'a, M, C>,
        sensor: S,
        clock: K,
        arbiter: &'a OutputArbiter<M, D>,
        commands: &'a CommandChannel<M>,
        progress: &'a ProgressIndicator<M>,
        config: PhotogateConfig,
    ) -> Self {
        Self {
            timer,
            sensor,
            clock,
            arbiter,
            commands,
            progress,
            history: HistoryLog::new(),
            config,
        }
    }
}
