//! # Timestamp Formatting
//!
//! Pure functions that turn epoch timestamps into the short display strings
//! shown on the watch face: an absolute clock time, a relative "time since"
//! phrase, and a sleep range. Every function returns a freshly allocated
//! `String` (at most ~20 characters), so there is no aliasing between the
//! text currently displayed and the buffer being formatted.
//!
//! A timestamp of 0 means "unset" throughout and always formats as the
//! empty string.

use chrono::{Local, TimeZone};

/// Placeholder for the open end of an in-progress sleep range.
const OPEN_RANGE: &str = "...";

/// Format an epoch timestamp as a local hour:minute clock time.
///
/// Returns `""` for the unset timestamp (0). The 24-hour/12-hour choice is
/// a display preference resolved once at startup (see
/// [`crate::config::ClockConfig`]), not a compile-time switch.
///
/// # Example
/// ```
/// use baby_watch_lib::format::clock_time;
///
/// assert_eq!(clock_time(0, true), "");
/// assert_eq!(clock_time(1_700_000_000, true).len(), 5); // "HH:MM"
/// ```
pub fn clock_time(ts: i64, use_24h: bool) -> String {
    if ts == 0 {
        return String::new();
    }
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt
            .format(if use_24h { "%H:%M" } else { "%I:%M" })
            .to_string(),
        None => String::new(),
    }
}

/// Format the time elapsed since `ts` as a short relative phrase.
///
/// - `""` if `ts` is unset
/// - `"just now"` under a minute
/// - `"(N min ago)"` under an hour, N rounded up
/// - `"(N h ago)"` otherwise, N truncated down
///
/// The exact 60-second boundary falls into the minutes branch. The mixed
/// rounding (ceil for minutes, floor for hours) matches the behavior users
/// already know from the watch face.
pub fn elapsed_since(ts: i64, now: i64) -> String {
    if ts == 0 {
        return String::new();
    }
    let elapsed = now - ts;
    if elapsed < 60 {
        "just now".to_string()
    } else if elapsed < 3600 {
        format!("({} min ago)", elapsed.div_ceil(60))
    } else {
        format!("({} h ago)", elapsed / 3600)
    }
}

/// Format a sleep range as `"<start> - <end>"`.
///
/// Returns `""` when both ends are unset. An unset end renders as `"..."`,
/// marking the sleep as still in progress.
pub fn time_range(start: i64, end: i64, use_24h: bool) -> String {
    if start == 0 && end == 0 {
        return String::new();
    }
    let end_text = if end == 0 {
        OPEN_RANGE.to_string()
    } else {
        clock_time(end, use_24h)
    };
    format!("{} - {}", clock_time(start, use_24h), end_text)
}
