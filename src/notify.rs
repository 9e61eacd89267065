//! # Outbound Event Notification
//!
//! Every logged event is forwarded to the paired phone as a two-field
//! record {EVENT_TYPE, EVENT_TIME} over a bounded 64-byte channel. Delivery
//! is best-effort and fire-and-forget: the input handler queues the event
//! and moves on without observing the outcome.
//!
//! The one concession to reliability mirrors the host messaging contract:
//! a delivery failure classified as a timeout triggers exactly one resend
//! of the identical payload. Any other failure - and a second timeout - is
//! logged to stderr and dropped. No error ever reaches the display.

use crate::EventKind;
use thiserror::Error;

/// Delivery failure reasons reported by the phone link.
///
/// Only [`SendError::Timeout`] is retryable; everything else means the
/// message is gone for good.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The phone did not acknowledge in time
    #[error("send timed out")]
    Timeout,

    /// The outbound queue is occupied by an in-flight message
    #[error("outbox busy")]
    Busy,

    /// The link rejected the message outright
    #[error("send rejected: {0}")]
    Rejected(String),
}

impl SendError {
    /// Whether this failure is worth the single best-effort resend.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SendError::Timeout)
    }
}

/// One (event type, timestamp) pair bound for the phone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutboundEvent {
    pub kind: EventKind,
    pub time: i64,
}

impl OutboundEvent {
    /// Size of the outbound channel; an encoded event must fit.
    pub const MAX_WIRE_BYTES: usize = 64;

    pub fn new(kind: EventKind, time: i64) -> Self {
        OutboundEvent { kind, time }
    }

    /// Encode as the two key=value fields the phone side expects.
    pub fn encode(&self) -> String {
        format!("EVENT_TYPE={} EVENT_TIME={}", self.kind.code(), self.time)
    }
}

/// The phone-link capability consumed by the outbox.
///
/// `send` returning `Ok` means "queued", not "delivered" - a failure may
/// still arrive later through [`Outbox::on_send_failed`].
pub trait Notifier {
    fn send(&mut self, event: &OutboundEvent) -> Result<(), SendError>;
}

/// Fire-and-forget wrapper around a [`Notifier`] implementing the single
/// timeout retry.
///
/// The outbox remembers the last queued payload so a host-reported timeout
/// can resend it verbatim. `retried` is reset on every fresh send, which
/// caps resends at one per payload.
pub struct Outbox<N: Notifier> {
    link: N,
    last: Option<OutboundEvent>,
    retried: bool,
}

impl<N: Notifier> Outbox<N> {
    pub fn new(link: N) -> Self {
        Outbox {
            link,
            last: None,
            retried: false,
        }
    }

    /// Queue one event for the phone. Synchronous failures are classified
    /// the same way as host delivery callbacks.
    pub fn send(&mut self, event: OutboundEvent) {
        self.last = Some(event);
        self.retried = false;
        if let Err(reason) = self.link.send(&event) {
            self.on_send_failed(reason);
        }
    }

    /// Host callback: the last queued message failed with `reason`.
    pub fn on_send_failed(&mut self, reason: SendError) {
        if !reason.is_retryable() {
            eprintln!("Outbound event dropped: {}", reason);
            return;
        }
        if self.retried {
            eprintln!("Outbound event dropped: resend timed out");
            return;
        }
        self.retried = true;
        let Some(event) = self.last else { return };
        eprintln!("Outbound send timed out, retrying once");
        if let Err(again) = self.link.send(&event) {
            self.on_send_failed(again);
        }
    }

    /// Host callback: the last queued message was delivered.
    pub fn on_sent(&mut self) {
        self.last = None;
    }

    /// The underlying phone link, mainly for inspection in tests.
    pub fn link(&self) -> &N {
        &self.link
    }
}
