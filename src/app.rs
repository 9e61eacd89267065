//! # Input Handler & Application State
//!
//! [`App`] is the single owner of all mutable state: the event store, the
//! persistence backend, the outbox, and the six display strings. It exposes
//! the event-sink surface the host loop drives - button presses, the
//! once-per-minute tick, and inbound phone messages - and runs each to
//! completion synchronously.
//!
//! Every button press follows the same fixed order: mutate the store,
//! re-render the affected display text, persist the changed slots, then
//! queue one outbound event. The tick only refreshes the relative "time
//! since" strings; it never changes state.

use crate::format::{clock_time, elapsed_since, time_range};
use crate::notify::{Notifier, Outbox, OutboundEvent, SendError};
use crate::store::{EventStore, Persist, PersistKey};
use crate::EventKind;

/// The three physical buttons, top to bottom on the action bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Bottle icon
    Up,
    /// Diaper icon
    Select,
    /// Moon icon (sleep toggle)
    Down,
}

/// The six strings shown on the watch face: an absolute time (or range,
/// for sleep) plus a relative "time since" per row. Unset rows are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayStrings {
    pub bottle_time: String,
    pub bottle_since: String,
    pub diaper_time: String,
    pub diaper_since: String,
    pub sleep_range: String,
    pub sleep_since: String,
}

/// Application state and event sink.
///
/// Generic over the persistence backend and the phone link so the host
/// wires real storage and messaging while tests wire in-memory fakes.
pub struct App<P: Persist, N: Notifier> {
    store: EventStore,
    persist: P,
    outbox: Outbox<N>,
    display: DisplayStrings,
    use_24h: bool,
}

impl<P: Persist, N: Notifier> App<P, N> {
    /// Build the app from persisted state and render the initial face.
    pub fn new(persist: P, link: N, use_24h: bool, now: i64) -> Self {
        let store = EventStore::load(&persist);
        let mut app = App {
            store,
            persist,
            outbox: Outbox::new(link),
            display: DisplayStrings::default(),
            use_24h,
        };
        app.render_all(now);
        app
    }

    /// Handle a single button press at time `now`.
    pub fn on_button(&mut self, button: Button, now: i64) {
        let kind = match button {
            Button::Up => {
                let kind = self.store.record_bottle(now);
                self.display.bottle_time = clock_time(now, self.use_24h);
                self.display.bottle_since = elapsed_since(now, now);
                self.persist.write(PersistKey::BottleTime, now);
                kind
            }
            Button::Select => {
                let kind = self.store.record_diaper(now);
                self.display.diaper_time = clock_time(now, self.use_24h);
                self.display.diaper_since = elapsed_since(now, now);
                self.persist.write(PersistKey::DiaperTime, now);
                kind
            }
            Button::Down => {
                let kind = self.store.toggle_sleep(now);
                self.render_sleep_row(now);
                match kind {
                    EventKind::SleepStart => {
                        self.persist.write(PersistKey::SleepStart, now);
                        self.persist.write(PersistKey::SleepEnd, 0);
                    }
                    _ => self.persist.write(PersistKey::SleepEnd, now),
                }
                kind
            }
        };
        self.outbox.send(OutboundEvent::new(kind, now));
    }

    /// Minute tick: refresh the relative strings only, no state change.
    pub fn on_tick(&mut self, now: i64) {
        self.display.bottle_since = elapsed_since(self.store.bottle_time, now);
        self.display.diaper_since = elapsed_since(self.store.diaper_time, now);
        self.display.sleep_since = elapsed_since(self.store.last_sleep_edge(), now);
    }

    /// Handle one inbound phone message. Only `"reset"` is recognized;
    /// anything else is silently ignored.
    pub fn on_message(&mut self, text: &str) {
        if text == "reset" {
            self.reset();
        }
    }

    /// Host callback passthrough for outbound delivery failures.
    pub fn on_send_failed(&mut self, reason: SendError) {
        self.outbox.on_send_failed(reason);
    }

    /// Host callback passthrough for outbound delivery confirmations.
    pub fn on_sent(&mut self) {
        self.outbox.on_sent();
    }

    pub fn display(&self) -> &DisplayStrings {
        &self.display
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn persist(&self) -> &P {
        &self.persist
    }

    pub fn outbox(&self) -> &Outbox<N> {
        &self.outbox
    }

    /// Clear everything: store, persisted slots, and display strings.
    fn reset(&mut self) {
        self.store.reset();
        self.display = DisplayStrings::default();
        self.persist.clear();
    }

    fn render_sleep_row(&mut self, now: i64) {
        self.display.sleep_range =
            time_range(self.store.sleep_start, self.store.sleep_end, self.use_24h);
        self.display.sleep_since = elapsed_since(self.store.last_sleep_edge(), now);
    }

    fn render_all(&mut self, now: i64) {
        self.display.bottle_time = clock_time(self.store.bottle_time, self.use_24h);
        self.display.bottle_since = elapsed_since(self.store.bottle_time, now);
        self.display.diaper_time = clock_time(self.store.diaper_time, self.use_24h);
        self.display.diaper_since = elapsed_since(self.store.diaper_time, now);
        self.render_sleep_row(now);
    }
}
