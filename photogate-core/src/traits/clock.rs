//! Monotonic time source

/// Monotonic microsecond clock
///
/// Must be the same time base the watch-point interrupt uses to
/// timestamp pulse events.
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;
}
