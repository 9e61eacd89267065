//! # Event Store & Persistence
//!
//! The event store holds the last timestamp of each loggable event: bottle,
//! diaper, and the sleep start/end pair. "Currently sleeping" is derived,
//! never stored: sleeping ⇔ (sleep_start ≠ 0 ∧ sleep_end = 0).
//!
//! Durable storage is four integer slots behind the [`Persist`] trait.
//! Every mutation writes the affected slots synchronously (no batching);
//! a missing slot reads as 0, meaning "unset". [`FilePersist`] backs the
//! slots with a small JSON state file; [`MemPersist`] backs tests.
//!
//! ## Error Handling
//!
//! Slot writes are best-effort: a failed state-file write is logged to
//! stderr and dropped, and the in-memory store stays authoritative - the
//! watch keeps working without its state surviving a restart. An unreadable
//! or corrupt state file at startup falls back to an empty store.

use crate::EventKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing the state file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// State file operations failed (permissions, disk space)
    #[error("state IO: {0}")]
    Io(#[from] io::Error),

    /// State file contents could not be encoded or decoded
    #[error("state encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// The four durable integer slots, each an epoch-second timestamp with
/// 0 meaning absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistKey {
    BottleTime,
    DiaperTime,
    SleepStart,
    SleepEnd,
}

/// Durable key-value storage for the four timestamp slots.
///
/// Writes are infallible at this seam: implementations handle (and log)
/// their own failures so callers in the button path never block on storage
/// errors.
pub trait Persist {
    /// Read a slot; missing slots read as 0.
    fn read(&self, key: PersistKey) -> i64;
    /// Write a slot durably, best-effort.
    fn write(&mut self, key: PersistKey, value: i64);
    /// Zero all four slots.
    fn clear(&mut self);
}

/// On-disk shape of the persisted slots.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct Slots {
    #[serde(default)]
    bottle_time: i64,
    #[serde(default)]
    diaper_time: i64,
    #[serde(default)]
    sleep_start: i64,
    #[serde(default)]
    sleep_end: i64,
}

impl Slots {
    fn get(&self, key: PersistKey) -> i64 {
        match key {
            PersistKey::BottleTime => self.bottle_time,
            PersistKey::DiaperTime => self.diaper_time,
            PersistKey::SleepStart => self.sleep_start,
            PersistKey::SleepEnd => self.sleep_end,
        }
    }

    fn set(&mut self, key: PersistKey, value: i64) {
        match key {
            PersistKey::BottleTime => self.bottle_time = value,
            PersistKey::DiaperTime => self.diaper_time = value,
            PersistKey::SleepStart => self.sleep_start = value,
            PersistKey::SleepEnd => self.sleep_end = value,
        }
    }
}

/// JSON-file-backed persistence with write-through semantics.
///
/// The whole slot table is tiny (four integers), so every write rewrites
/// the file. Failure to write is non-fatal - the application continues
/// with its in-memory state.
pub struct FilePersist {
    path: PathBuf,
    slots: Slots,
}

impl FilePersist {
    /// Open the state file at `path`, falling back to empty slots if the
    /// file is missing, unreadable, or corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let slots = match Self::load_slots(&path) {
            Ok(slots) => slots,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Slots::default(),
            Err(e) => {
                eprintln!("Warning: unreadable state file {}: {}", path.display(), e);
                eprintln!("Starting with empty event state");
                Slots::default()
            }
        };
        FilePersist { path, slots }
    }

    fn load_slots(path: &Path) -> Result<Slots, StoreError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let data = serde_json::to_vec(&self.slots)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl Persist for FilePersist {
    fn read(&self, key: PersistKey) -> i64 {
        self.slots.get(key)
    }

    fn write(&mut self, key: PersistKey, value: i64) {
        self.slots.set(key, value);
        if let Err(e) = self.flush() {
            eprintln!("Warning: state write failed: {}", e);
        }
    }

    fn clear(&mut self) {
        self.slots = Slots::default();
        if let Err(e) = self.flush() {
            eprintln!("Warning: state write failed: {}", e);
        }
    }
}

/// In-memory persistence for tests and the simulator.
#[derive(Debug, Default)]
pub struct MemPersist {
    slots: Slots,
}

impl Persist for MemPersist {
    fn read(&self, key: PersistKey) -> i64 {
        self.slots.get(key)
    }

    fn write(&mut self, key: PersistKey, value: i64) {
        self.slots.set(key, value);
    }

    fn clear(&mut self) {
        self.slots = Slots::default();
    }
}

/// Last-seen timestamps for the three event types.
///
/// All fields are epoch seconds with 0 meaning "unset". The store is plain
/// data: persistence and notification happen in the input handler so the
/// mutate → render → persist → notify order stays explicit in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventStore {
    pub bottle_time: i64,
    pub diaper_time: i64,
    pub sleep_start: i64,
    pub sleep_end: i64,
}

impl EventStore {
    /// Initialize the store from persisted slots. Missing slots read as 0,
    /// so first launch yields an empty store.
    pub fn load(persist: &impl Persist) -> Self {
        EventStore {
            bottle_time: persist.read(PersistKey::BottleTime),
            diaper_time: persist.read(PersistKey::DiaperTime),
            sleep_start: persist.read(PersistKey::SleepStart),
            sleep_end: persist.read(PersistKey::SleepEnd),
        }
    }

    /// Derived sleeping flag: a sleep has started and not yet ended.
    pub fn sleeping(&self) -> bool {
        self.sleep_start != 0 && self.sleep_end == 0
    }

    /// The most recent sleep edge, used for the sleep row's "time since"
    /// text: the start while sleeping, the end once awake.
    pub fn last_sleep_edge(&self) -> i64 {
        self.sleep_start.max(self.sleep_end)
    }

    /// Stamp a feeding at `now`.
    pub fn record_bottle(&mut self, now: i64) -> EventKind {
        self.bottle_time = now;
        EventKind::Bottle
    }

    /// Stamp a diaper change at `now`.
    pub fn record_diaper(&mut self, now: i64) -> EventKind {
        self.diaper_time = now;
        EventKind::Diaper
    }

    /// Flip the sleeping state. Entering sleep sets start=now and clears
    /// the end; leaving sets end=now. Returns which edge was emitted.
    pub fn toggle_sleep(&mut self, now: i64) -> EventKind {
        if self.sleeping() {
            self.sleep_end = now;
            EventKind::SleepEnd
        } else {
            self.sleep_start = now;
            self.sleep_end = 0;
            EventKind::SleepStart
        }
    }

    /// Clear all three records.
    pub fn reset(&mut self) {
        *self = EventStore::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_store_reads_all_zero() {
        let persist = MemPersist::default();
        let store = EventStore::load(&persist);
        assert_eq!(store, EventStore::default());
        assert!(!store.sleeping());
    }

    #[test]
    fn sleep_toggle_alternates_states() {
        let mut store = EventStore::default();

        assert_eq!(store.toggle_sleep(100), EventKind::SleepStart);
        assert!(store.sleeping());
        assert_eq!(store.sleep_start, 100);
        assert_eq!(store.sleep_end, 0);

        assert_eq!(store.toggle_sleep(200), EventKind::SleepEnd);
        assert!(!store.sleeping());
        assert_eq!(store.sleep_end, 200);

        // A new sleep clears the previous end
        assert_eq!(store.toggle_sleep(300), EventKind::SleepStart);
        assert!(store.sleeping());
        assert_eq!(store.sleep_start, 300);
        assert_eq!(store.sleep_end, 0);
    }

    #[test]
    fn odd_and_even_press_counts_match_invariant() {
        let mut store = EventStore::default();
        for press in 1..=6 {
            let t = press * 100;
            store.toggle_sleep(t);
            if press % 2 == 1 {
                assert!(store.sleeping());
                assert_eq!(store.sleep_end, 0);
            } else {
                assert!(!store.sleeping());
                assert_eq!(store.sleep_end, t);
            }
        }
    }

    #[test]
    fn last_sleep_edge_tracks_latest_timestamp() {
        let mut store = EventStore::default();
        assert_eq!(store.last_sleep_edge(), 0);
        store.toggle_sleep(100);
        assert_eq!(store.last_sleep_edge(), 100);
        store.toggle_sleep(250);
        assert_eq!(store.last_sleep_edge(), 250);
    }

    #[test]
    fn file_persist_survives_reopen() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut persist = FilePersist::open(path);
        persist.write(PersistKey::BottleTime, 100);
        persist.write(PersistKey::SleepStart, 250);
        drop(persist);

        let reopened = FilePersist::open(path);
        assert_eq!(reopened.read(PersistKey::BottleTime), 100);
        assert_eq!(reopened.read(PersistKey::SleepStart), 250);
        assert_eq!(reopened.read(PersistKey::DiaperTime), 0);
        assert_eq!(reopened.read(PersistKey::SleepEnd), 0);
    }

    #[test]
    fn file_persist_clear_zeroes_every_slot() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut persist = FilePersist::open(path);
        persist.write(PersistKey::BottleTime, 1);
        persist.write(PersistKey::DiaperTime, 2);
        persist.write(PersistKey::SleepStart, 3);
        persist.write(PersistKey::SleepEnd, 4);
        persist.clear();
        drop(persist);

        let reopened = FilePersist::open(path);
        for key in [
            PersistKey::BottleTime,
            PersistKey::DiaperTime,
            PersistKey::SleepStart,
            PersistKey::SleepEnd,
        ] {
            assert_eq!(reopened.read(key), 0);
        }
    }

    #[test]
    fn corrupt_state_file_falls_back_to_empty() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), b"not json at all").unwrap();

        let persist = FilePersist::open(temp_file.path());
        assert_eq!(persist.read(PersistKey::BottleTime), 0);
    }

    #[test]
    fn partial_state_file_defaults_missing_slots() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), br#"{"bottle_time": 42}"#).unwrap();

        let persist = FilePersist::open(temp_file.path());
        assert_eq!(persist.read(PersistKey::BottleTime), 42);
        assert_eq!(persist.read(PersistKey::SleepEnd), 0);
    }
}
