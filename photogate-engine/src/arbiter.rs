//! Shared output arbiter
//!
//! The character display is shared by the experiment task and the
//! progress task. Every draw goes through [`OutputArbiter::with_lock`];
//! the guard is released on every exit path, including when the drawing
//! future is dropped.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

/// Exclusive access to the display
pub struct OutputArbiter<M: RawMutex, D> {
    display: Mutex<M, D>,
}

impl<M: RawMutex, D> OutputArbiter<M, D> {
    pub const fn new(display: D) -> Self {
        Self {
            display: Mutex::new(display),
        }
    }

    /// Wait for the lock, then run `draw` against the display
    ///
    /// `draw` must not call back into the arbiter.
    pub async fn with_lock<R>(&self, draw: impl FnOnce(&mut D) -> R) -> R {
        let mut guard = self.display.lock().await;
        draw(&mut *guard)
    }

    /// Run `draw` only if the lock is free right now
    pub fn try_with_lock<R>(&self, draw: impl FnOnce(&mut D) -> R) -> Option<R> {
        let mut guard = self.display.try_lock().ok()?;
        Some(draw(&mut *guard))
    }

    pub fn into_inner(self) -> D {
        self.display.into_inner()
    }
}
