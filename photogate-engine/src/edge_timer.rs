//! Edge-timing engine
//!
//! Owns the pulse counter and the consumer side of the pulse channel. The
//! watch-point interrupt only ever touches [`PulseSender`].

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use photogate_core::timing::{EdgeTimingConfig, PulseEvent, WATCH_POINT_COUNT};
use photogate_core::traits::{CounterError, PulseCounter};

use crate::channels::PulseChannel;

/// Interrupt-side handle of the pulse channel
///
/// Copyable so the board can move one into the counter's interrupt
/// handler while the timer keeps the receiving side.
#[derive(Clone, Copy)]
pub struct PulseSender<'a, M: RawMutex> {
    events: &'a PulseChannel<M>,
}

impl<'a, M: RawMutex> PulseSender<'a, M> {
    pub const fn new(events: &'a PulseChannel<M>) -> Self {
        Self { events }
    }

    /// Watch-point interrupt entry
    ///
    /// Never blocks and does no device I/O. Returns false if the channel
    /// was full and the event was dropped.
    pub fn on_watch_point(&self, timestamp_us: u64) -> bool {
        self.events.try_send(PulseEvent::at(timestamp_us)).is_ok()
    }
}

/// Hardware edge counter with its armed watch points
pub struct EdgeTimer<'a, M: RawMutex, C> {
    counter: C,
    events: &'a PulseChannel<M>,
    armed: Vec<i32, WATCH_POINT_COUNT>,
}

impl<'a, M: RawMutex, C: PulseCounter> EdgeTimer<'a, M, C> {
    /// Wrap a counter that has been enabled by board bring-up
    pub fn new(counter: C, events: &'a PulseChannel<M>) -> Self {
        Self {
            counter,
            events,
            armed: Vec::new(),
        }
    }

    /// Arm the counter for one run
    ///
    /// Edge actions and filter are applied with the unit disabled. Any
    /// previously armed watch points are removed and stale events dropped
    /// before the new pair is armed, so the run starts from a zero count
    /// and an empty channel.
    pub fn configure(&mut self, config: &EdgeTimingConfig) -> Result<(), CounterError> {
        if !config.is_valid() {
            warn!("Rejecting watch points {:?}", config.watch_points);
            return Err(CounterError::InvalidArgument);
        }

        self.counter.disable()?;
        self.counter
            .set_edge_actions(config.rising, config.falling)?;
        self.counter.set_glitch_filter(config.glitch_filter_ns)?;

        self.disarm()?;
        self.drain();

        for point in config.watch_points {
            self.counter.add_watch_point(point)?;
            // Just emptied; capacity matches the pair
            let _ = self.armed.push(point);
            debug!("Set watch point: {}", point);
        }

        self.counter.clear_count()?;
        self.counter.enable()?;
        self.counter.start()?;

        info!(
            "Edge timer armed: rising={:?} falling={:?} points={:?}",
            config.rising,
            config.falling,
            config.watch_points
        );
        Ok(())
    }

    /// Raw count, for progress display only
    pub fn read_count(&self) -> i32 {
        self.counter.count()
    }

    /// Next watch-point event, or `None` after `timeout_ms`
    ///
    /// An already queued event is returned without waiting.
    pub async fn next_event<Dl: DelayNs>(
        &self,
        delay: &mut Dl,
        timeout_ms: u32,
    ) -> Option<PulseEvent> {
        if let Ok(event) = self.events.try_receive() {
            return Some(event);
        }

        match select(self.events.receive(), delay.delay_ms(timeout_ms)).await {
            Either::First(event) => Some(event),
            Either::Second(()) => None,
        }
    }

    /// Stop counting and disarm
    ///
    /// Safe to call any number of times.
    pub fn teardown(&mut self) -> Result<(), CounterError> {
        self.counter.stop()?;
        self.disarm()?;
        self.counter.clear_count()?;
        self.drain();
        Ok(())
    }

    /// Drop every queued pulse event
    pub fn drain(&self) -> usize {
        let mut dropped = 0;
        while self.events.try_receive().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            trace!("Dropped {} stale pulse events", dropped);
        }
        dropped
    }

    /// Watch points currently armed on the counter
    pub fn armed_watch_points(&self) -> &[i32] {
        &self.armed
    }

    /// Interrupt-side handle for this timer's channel
    pub fn sender(&self) -> PulseSender<'a, M> {
        PulseSender::new(self.events)
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    fn disarm(&mut self) -> Result<(), CounterError> {
        while let Some(&point) = self.armed.last() {
            self.counter.remove_watch_point(point)?;
            self.armed.pop();
            debug!("Remove watch point: {}", point);
        }
        Ok(())
    }
}
