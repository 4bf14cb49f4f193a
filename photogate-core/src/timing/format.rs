//! Fixed-width text for elapsed times and period counts

use core::fmt::Write;

use heapless::String;

/// Formatted elapsed time, `SSS,mmm uuu`
pub type ElapsedString = String<16>;

/// Two-digit period count
pub type PeriodsString = String<2>;

/// Largest elapsed time that still fits the field (9 999 999 s)
pub const MAX_ELAPSED_US: u64 = 9_999_999_999_999;

/// Format microseconds as `SSS,mmm uuu`
///
/// Pure integer arithmetic: the digits are the exact value, nothing is
/// rounded. Seconds are zero-padded to three digits and widen beyond that;
/// values above [`MAX_ELAPSED_US`] saturate.
pub fn format_elapsed(elapsed_us: u64) -> ElapsedString {
    let elapsed_us = elapsed_us.min(MAX_ELAPSED_US);
    let seconds = elapsed_us / 1_000_000;
    let millis = (elapsed_us / 1_000) % 1_000;
    let micros = elapsed_us % 1_000;

    let mut out = String::new();
    // Cannot overflow: 7 + 1 + 3 + 1 + 3 characters at most
    let _ = write!(out, "{:03},{:03} {:03}", seconds, millis, micros);
    out
}

/// Format a period count as two digits (`00`-`99`)
pub fn format_periods(periods: u8) -> PeriodsString {
    let periods = periods.min(99);
    let mut out = String::new();
    let _ = out.push((b'0' + periods / 10) as char);
    let _ = out.push((b'0' + periods % 10) as char);
    out
}
