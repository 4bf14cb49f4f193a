//! Hourglass progress indicator
//!
//! A long-lived task animates the hourglass while a run is armed. The
//! experiment controls it through [`ProgressIndicator::start`] and
//! [`ProgressIndicator::stop`]; both are synchronous and idempotent, so
//! they can be called from `Drop`.

use core::cell::Cell;
use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;

use photogate_core::traits::{glyph, CharDisplay};

use crate::arbiter::OutputArbiter;
use crate::screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Start,
    Stop,
}

/// Start/stop handle shared by the experiment and the animation task
pub struct ProgressIndicator<M: RawMutex> {
    control: Signal<M, Control>,
    running: BlockingMutex<M, Cell<bool>>,
}

impl<M: RawMutex> ProgressIndicator<M> {
    pub const fn new() -> Self {
        Self {
            control: Signal::new(),
            running: BlockingMutex::new(Cell::new(false)),
        }
    }

    /// Begin animating
    pub fn start(&self) {
        self.running.lock(|running| running.set(true));
        self.control.signal(Control::Start);
    }

    /// Stop animating
    ///
    /// The task checks for stop before each lock acquisition, so no frame
    /// is drawn once this returns and the task is next polled.
    pub fn stop(&self) {
        self.running.lock(|running| running.set(false));
        self.control.signal(Control::Stop);
    }

    pub fn is_running(&self) -> bool {
        self.running.lock(|running| running.get())
    }

    /// Animation task body; never returns
    pub async fn run<D, Dl>(&self, arbiter: &OutputArbiter<M, D>, delay: &mut Dl, frame_ms: u32)
    where
        D: CharDisplay,
        Dl: DelayNs,
    {
        loop {
            while self.control.wait().await != Control::Start {}
            debug!("Progress indicator started");

            match select(self.wait_stop(), self.animate(arbiter, delay, frame_ms)).await {
                Either::First(()) => debug!("Progress indicator stopped"),
                Either::Second(never) => match never {},
            }
        }
    }

    async fn wait_stop(&self) {
        while self.control.wait().await != Control::Stop {}
    }

    async fn animate<D, Dl>(
        &self,
        arbiter: &OutputArbiter<M, D>,
        delay: &mut Dl,
        frame_ms: u32,
    ) -> Infallible
    where
        D: CharDisplay,
        Dl: DelayNs,
    {
        loop {
            for frame in 0..glyph::HOURGLASS.len() {
                if let Err(e) = arbiter
                    .with_lock(|display| screen::draw_hourglass(display, frame))
                    .await
                {
                    warn!("Hourglass frame failed: {:?}", e);
                }
                delay.delay_ms(frame_ms).await;
            }
        }
    }
}

impl<M: RawMutex> Default for ProgressIndicator<M> {
    fn default() -> Self {
        Self::new()
    }
}
