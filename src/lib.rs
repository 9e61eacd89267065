//! # Baby Tracker Core Library
//!
//! This library implements the event-state logic for a single-screen baby
//! tracker running on a wrist-worn device. A caregiver logs three event
//! types with the three physical buttons: feeding ("bottle"), diaper change,
//! and sleep start/end. The app persists the last timestamp of each event,
//! renders them as three labeled rows on the watch face, and forwards each
//! event to a paired phone over a small outbound message channel.
//!
//! ## Design Philosophy
//!
//! ### Single-threaded by construction
//! All input arrives through the host's cooperative event loop: button
//! callbacks, the once-per-minute tick, and inbound phone messages all run
//! to completion on one thread. The [`app::App`] struct is the single owner
//! of all mutable state, so no synchronization primitives are needed -
//! only a documented single-owner contract.
//!
//! ### Pure formatting
//! The timestamp formatter ([`format`]) is a set of pure functions from
//! epoch seconds to freshly allocated strings. This replaces the fixed
//! mutable text buffers a C watch app would reuse across calls, and makes
//! every display string independently testable.
//!
//! ### Write-through persistence
//! Four integer slots (bottle time, diaper time, sleep start, sleep end)
//! are written to durable storage synchronously on every mutation. A
//! missing slot is not an error - it reads as 0, meaning "unset".
//!
//! ### Best-effort delivery
//! Outbound events are fire-and-forget. A delivery timeout triggers exactly
//! one identical resend; every other failure is logged and dropped. The
//! input handler never blocks on or observes the outcome.
//!
//! ## Control Flow
//!
//! 1. **Button press**: input handler mutates the event store, re-renders
//!    the affected display text, persists the changed slots, and queues one
//!    outbound event - in that order, synchronously.
//! 2. **Minute tick**: re-renders the three "time since" strings only.
//! 3. **Inbound `"reset"`**: clears the store, zeroes all persisted slots,
//!    and blanks every display string. Any other message is ignored.

// This toolchain gates signed-integer `div_ceil` behind `int_roundings`,
// so the crate builds with the nightly channel.
#![feature(int_roundings)]

// Module declarations
pub mod app;
pub mod config;
pub mod format;
pub mod notify;
pub mod renderer;
pub mod store;

/// The three loggable event types, split into four wire-level events
/// because sleep is reported as separate start and end edges.
///
/// The numeric codes are part of the phone protocol and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Feeding logged (up button)
    Bottle,
    /// Diaper change logged (select button)
    Diaper,
    /// Sleep began (down button while awake)
    SleepStart,
    /// Sleep ended (down button while sleeping)
    SleepEnd,
}

impl EventKind {
    /// Wire code for the EVENT_TYPE field of an outbound message.
    pub fn code(self) -> u8 {
        match self {
            EventKind::Bottle => 1,
            EventKind::Diaper => 2,
            EventKind::SleepStart => 3,
            EventKind::SleepEnd => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_codes_match_phone_protocol() {
        assert_eq!(EventKind::Bottle.code(), 1);
        assert_eq!(EventKind::Diaper.code(), 2);
        assert_eq!(EventKind::SleepStart.code(), 3);
        assert_eq!(EventKind::SleepEnd.code(), 4);
    }
}
