//! Experiment runner
//!
//! One generic engine serves every experiment type; the
//! [`TimingProfile`] decides how the counter is armed and how counts map
//! to periods. Each call to [`Experiment::step`] runs one poll of the
//! current stage, feeds the resulting event to [`Stage::transition`], and
//! performs the entry actions of the stage it lands in.
//!
//! Config and Done wait on the command channel without a timeout. Error,
//! Waiting and Timing poll with short timeouts so an abort is seen within
//! one cycle. Every way out of a run goes through the same teardown: abort
//! to Config, interrupt, error, or dropping the experiment.

mod context;
mod error;

pub use context::EngineContext;
pub use error::EngineError;

use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use photogate_core::history::{HistoryLog, MeasurementResult};
use photogate_core::input::ExperimentCommand;
use photogate_core::sensor::ObstructionMonitor;
use photogate_core::stage::{classify_command, Stage, StageEvent};
use photogate_core::timing::{EdgeTimingConfig, PulseEvent, ResultLabel, TimingProfile};
use photogate_core::traits::{CharDisplay, Clock, ObstructionSensor, PulseCounter};

use crate::channels::InterruptSignal;
use crate::screen;

/// One experiment session on the engine context
pub struct Experiment<'c, 'a, M, C, S, K, D, Dl>
where
    M: RawMutex,
    C: PulseCounter,
    S: ObstructionSensor,
    K: Clock,
    D: CharDisplay,
    Dl: DelayNs,
{
    ctx: &'c mut EngineContext<'a, M, C, S, K, D>,
    profile: TimingProfile,
    stage: Stage,
    /// Counter descriptor computed at confirm
    descriptor: EdgeTimingConfig,
    /// Start pulse of the current run
    start: PulseEvent,
    label: ResultLabel,
    monitor: ObstructionMonitor,
    delay: Dl,
    started: bool,
}

impl<'c, 'a, M, C, S, K, D, Dl> Experiment<'c, 'a, M, C, S, K, D, Dl>
where
    M: RawMutex,
    C: PulseCounter,
    S: ObstructionSensor,
    K: Clock,
    D: CharDisplay,
    Dl: DelayNs,
{
    pub fn new(
        ctx: &'c mut EngineContext<'a, M, C, S, K, D>,
        profile: TimingProfile,
        delay: Dl,
    ) -> Self {
        let timing = ctx.config.timing;
        Self {
            ctx,
            profile,
            stage: Stage::Config,
            descriptor: profile.edge_config(timing.glitch_filter_ns),
            start: PulseEvent::at(0),
            label: profile.label(),
            monitor: ObstructionMonitor::new(timing.sensor_clear_polls),
            delay,
            started: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    pub fn history(&self) -> &HistoryLog {
        &self.ctx.history
    }

    pub fn context(&self) -> &EngineContext<'a, M, C, S, K, D> {
        &*self.ctx
    }

    /// Run one poll of the current stage and return the resulting stage
    ///
    /// The first call draws the screen and enters Config.
    pub async fn step(&mut self) -> Result<Stage, EngineError> {
        if !self.started {
            self.started = true;
            let profile = self.profile;
            self.ctx
                .arbiter
                .with_lock(|display| screen::draw_layout(display, &profile))
                .await?;
            self.enter().await?;
        }

        let event = match self.stage {
            Stage::Config => self.poll_config().await?,
            Stage::Error => self.poll_error().await,
            Stage::Waiting => self.poll_waiting().await,
            Stage::Timing => self.poll_timing().await?,
            Stage::Done => self.poll_done().await,
        };

        if let Some(event) = event {
            self.apply(event).await?;
        }
        Ok(self.stage)
    }

    /// Step until an error occurs
    pub async fn run(&mut self) -> Result<Infallible, EngineError> {
        loop {
            self.step().await?;
        }
    }

    /// Run until the interrupt signal fires, then tear down and hide the cursor
    ///
    /// A pending interrupt ends the run at its first poll. Stale ones are
    /// cleared by [`InputRouter::claim`](crate::router::InputRouter::claim)
    /// when input is handed over.
    pub async fn run_until_interrupted(
        &mut self,
        interrupt: &InterruptSignal<M>,
    ) -> Result<(), EngineError> {
        let outcome = select(self.run(), interrupt.wait()).await;
        match outcome {
            Either::First(Ok(never)) => match never {},
            Either::First(Err(e)) => {
                error!("Experiment failed in {:?}: {:?}", self.stage, e);
                Err(e)
            }
            Either::Second(()) => {
                info!("Experiment interrupted in {:?}", self.stage);
                self.shutdown().await
            }
        }
    }

    async fn apply(&mut self, event: StageEvent) -> Result<(), EngineError> {
        let next = self.stage.transition(event);
        if next == self.stage {
            return Ok(());
        }

        debug!("Stage {:?} -> {:?} on {:?}", self.stage, next, event);
        if event == StageEvent::Abort {
            self.back_to_config().await?;
        }
        self.stage = next;
        self.enter().await
    }

    /// Entry actions of the current stage
    async fn enter(&mut self) -> Result<(), EngineError> {
        match self.stage {
            Stage::Config => {
                self.ctx.timer.drain();
                self.monitor.reset();
                let profile = self.profile;
                self.ctx
                    .arbiter
                    .with_lock(|display| {
                        screen::draw_status(display, Stage::Config)?;
                        if profile.target_periods().is_some() {
                            screen::draw_periods(display, 0)?;
                        }
                        screen::draw_parameter(display, &profile)?;
                        display.set_cursor_visible(true)
                    })
                    .await?;
            }
            Stage::Error => {
                warn!("Sensor obstructed, waiting for it to clear");
                self.monitor.reset();
                self.draw_status().await?;
            }
            Stage::Waiting => {
                self.draw_status().await?;
                self.ctx.timer.configure(&self.descriptor)?;
            }
            Stage::Timing => self.draw_status().await?,
            Stage::Done => {
                self.ctx.timer.teardown()?;
                self.draw_status().await?;
            }
        }
        Ok(())
    }

    async fn poll_config(&mut self) -> Result<Option<StageEvent>, EngineError> {
        match self.ctx.commands.receive().await {
            ExperimentCommand::Adjust(delta) => {
                self.profile.adjust(delta);
                let profile = self.profile;
                self.ctx
                    .arbiter
                    .with_lock(|display| screen::draw_parameter(display, &profile))
                    .await?;
                Ok(None)
            }
            ExperimentCommand::Confirm => {
                self.ctx
                    .arbiter
                    .with_lock(|display| display.set_cursor_visible(false))
                    .await?;
                self.descriptor = self
                    .profile
                    .edge_config(self.ctx.config.timing.glitch_filter_ns);
                self.label = self.profile.label();
                self.ctx.progress.start();

                let obstructed = self.ctx.sensor.is_obstructed();
                info!("Run confirmed: {:?}", self.profile);
                Ok(Some(StageEvent::Start { obstructed }))
            }
            // Handled through the interrupt signal
            ExperimentCommand::Interrupt => Ok(None),
        }
    }

    async fn poll_error(&mut self) -> Option<StageEvent> {
        let commands = self.ctx.commands;
        let poll_ms = self.ctx.config.timing.sensor_poll_ms;

        if let Either::First(command) = select(commands.receive(), self.delay.delay_ms(poll_ms)).await
        {
            if let Some(event) = classify_command(command) {
                return Some(event);
            }
        }

        let obstructed = self.ctx.sensor.is_obstructed();
        if self.monitor.update(obstructed) {
            info!("Sensor clear");
            Some(StageEvent::SensorCleared)
        } else {
            None
        }
    }

    async fn poll_waiting(&mut self) -> Option<StageEvent> {
        let timeout = self.ctx.config.timing.pulse_poll_ms;
        if let Some(event) = self.ctx.timer.next_event(&mut self.delay, timeout).await {
            debug!("Start pulse at {} us", event.timestamp_us);
            self.start = event;
            return Some(StageEvent::Pulse);
        }
        self.poll_abort()
    }

    async fn poll_timing(&mut self) -> Result<Option<StageEvent>, EngineError> {
        let periods = self.profile.count_to_periods(self.ctx.timer.read_count());
        let estimate = self
            .ctx
            .clock
            .now_us()
            .saturating_sub(self.start.timestamp_us);
        self.ctx
            .arbiter
            .with_lock(|display| {
                if let Some(periods) = periods {
                    screen::draw_periods(display, periods)?;
                }
                screen::draw_elapsed(display, estimate, true)
            })
            .await?;

        let timeout = self.ctx.config.timing.pulse_poll_ms;
        if let Some(stop) = self.ctx.timer.next_event(&mut self.delay, timeout).await {
            self.record(stop).await?;
            return Ok(Some(StageEvent::Pulse));
        }
        Ok(self.poll_abort())
    }

    async fn poll_done(&mut self) -> Option<StageEvent> {
        classify_command(self.ctx.commands.receive().await)
    }

    /// Non-blocking abort check for the polling stages
    fn poll_abort(&self) -> Option<StageEvent> {
        self.ctx
            .commands
            .try_receive()
            .ok()
            .and_then(classify_command)
    }

    /// Store and show the result of a completed run
    async fn record(&mut self, stop: PulseEvent) -> Result<(), EngineError> {
        let elapsed_us = stop.elapsed_since(self.start);
        let result = MeasurementResult::new(self.label.clone(), elapsed_us);
        info!("Result {}: {}", result.label(), result.elapsed());
        self.ctx.history.append(result);

        let target = self.profile.target_periods();
        self.ctx
            .arbiter
            .with_lock(|display| {
                screen::draw_elapsed(display, elapsed_us, false)?;
                match target {
                    Some(periods) => screen::draw_periods(display, periods),
                    None => Ok(()),
                }
            })
            .await?;
        Ok(())
    }

    async fn draw_status(&self) -> Result<(), EngineError> {
        let stage = self.stage;
        self.ctx
            .arbiter
            .with_lock(|display| screen::draw_status(display, stage))
            .await?;
        Ok(())
    }

    /// Shared teardown for every abort
    ///
    /// The indicator is stopped before the lock is taken here so its next
    /// frame cannot overwrite the idle glyph.
    async fn back_to_config(&mut self) -> Result<(), EngineError> {
        info!("Return to config");
        self.ctx.progress.stop();
        self.ctx.timer.teardown()?;
        self.ctx
            .arbiter
            .with_lock(|display| {
                screen::draw_elapsed(display, 0, false)?;
                screen::draw_idle_glyph(display)
            })
            .await?;
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), EngineError> {
        self.back_to_config().await?;
        self.stage = Stage::Config;
        self.ctx
            .arbiter
            .with_lock(|display| display.set_cursor_visible(false))
            .await?;
        Ok(())
    }
}

impl<M, C, S, K, D, Dl> Drop for Experiment<'_, '_, M, C, S, K, D, Dl>
where
    M: RawMutex,
    C: PulseCounter,
    S: ObstructionSensor,
    K: Clock,
    D: CharDisplay,
    Dl: DelayNs,
{
    fn drop(&mut self) {
        self.ctx.progress.stop();
        if let Err(e) = self.ctx.timer.teardown() {
            warn!("Counter teardown failed: {:?}", e);
        }
    }
}
