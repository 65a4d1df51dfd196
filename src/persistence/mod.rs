//! Best-effort persistence of timer options and progress.
//!
//! Two records live under fixed keys of a [`KeyValueStore`]:
//!
//! | Key                     | Value                                               |
//! |-------------------------|-----------------------------------------------------|
//! | `online-timer-options`  | `{"initialTime","enableTickSound","enableSuccessSound"}` |
//! | `online-timer-state`    | `{"remainingTime","state","timestamp"}`             |
//!
//! Nothing here returns an error. Storage failures and corrupt records are
//! logged and replaced by a safe fallback: the default options, `None`, or a
//! no-op. The store itself is optional; without one every save does nothing
//! and every load returns its fallback.

use serde::de::Error as _;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};
use crate::types::{SavedTimerState, TimerOptions, TimerSnapshot, TimerState, DEFAULT_TIMER_OPTIONS};

/// Key holding the serialized [`TimerOptions`].
pub const TIMER_OPTIONS_KEY: &str = "online-timer-options";

/// Key holding the serialized [`TimerSnapshot`].
pub const TIMER_STATE_KEY: &str = "online-timer-state";

/// Reads and writes timer records through an optional store.
#[derive(Debug, Clone)]
pub struct TimerPersistence<S> {
    store: Option<S>,
}

impl<S: KeyValueStore> TimerPersistence<S> {
    /// Creates a persistence layer over `store`.
    pub fn new(store: S) -> Self {
        Self { store: Some(store) }
    }

    /// Creates a persistence layer with no store behind it.
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    /// Creates a persistence layer over a store that may be absent.
    pub fn from_option(store: Option<S>) -> Self {
        Self { store }
    }

    /// Returns true if a store is present.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the underlying store, if any.
    #[must_use]
    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Saves the full options record. Failures are logged, never returned.
    pub fn save_timer_options(&self, options: &TimerOptions) {
        let Some(store) = self.available_store("save timer options") else {
            return;
        };
        if let Err(e) = write_json(store, TIMER_OPTIONS_KEY, options) {
            warn!("Failed to save timer options: {}", e);
        }
    }

    /// Loads the options, filling any missing field from the defaults.
    ///
    /// Returns [`DEFAULT_TIMER_OPTIONS`] when nothing is stored, the store is
    /// absent or unreadable, or the stored record is corrupt.
    pub fn load_timer_options(&self) -> TimerOptions {
        let Some(store) = self.available_store("load timer options") else {
            return DEFAULT_TIMER_OPTIONS;
        };

        let raw = match store.get_item(TIMER_OPTIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return DEFAULT_TIMER_OPTIONS,
            Err(e) => {
                warn!("Failed to read timer options: {}", e);
                return DEFAULT_TIMER_OPTIONS;
            }
        };

        match merge_over_defaults(&raw) {
            Ok(options) => options,
            Err(e) => {
                warn!("Ignoring corrupt timer options: {}", e);
                DEFAULT_TIMER_OPTIONS
            }
        }
    }

    /// Saves the timer progress stamped with the current time.
    pub fn save_timer_state(&self, remaining_time: u64, state: TimerState) {
        let Some(store) = self.available_store("save timer state") else {
            return;
        };
        let snapshot = TimerSnapshot {
            remaining_time,
            state,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        if let Err(e) = write_json(store, TIMER_STATE_KEY, &snapshot) {
            warn!("Failed to save timer state: {}", e);
        }
    }

    /// Loads the saved progress without its timestamp.
    ///
    /// Returns `None` when nothing is stored or the record cannot be read.
    pub fn load_timer_state(&self) -> Option<SavedTimerState> {
        self.load_timer_snapshot().map(SavedTimerState::from)
    }

    /// Loads the full saved snapshot, timestamp included.
    pub fn load_timer_snapshot(&self) -> Option<TimerSnapshot> {
        let store = self.available_store("load timer state")?;

        let raw = match store.get_item(TIMER_STATE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read timer state: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Ignoring corrupt timer state: {}", e);
                None
            }
        }
    }

    /// Removes the saved progress. Failures are logged, never returned.
    pub fn clear_timer_state(&self) {
        let Some(store) = self.available_store("clear timer state") else {
            return;
        };
        if let Err(e) = store.remove_item(TIMER_STATE_KEY) {
            warn!("Failed to clear timer state: {}", e);
        }
    }

    fn available_store(&self, operation: &str) -> Option<&S> {
        if self.store.is_none() {
            debug!("Storage unavailable, skipping {}", operation);
        }
        self.store.as_ref()
    }
}

fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize,
{
    let json = serde_json::to_string(value)?;
    store.set_item(key, &json)
}

/// Overlays the top-level fields of a stored options object on the defaults.
fn merge_over_defaults(raw: &str) -> Result<TimerOptions, serde_json::Error> {
    let stored: Value = serde_json::from_str(raw)?;
    let Value::Object(overrides) = stored else {
        return Err(serde_json::Error::custom("timer options must be a JSON object"));
    };

    let mut merged = serde_json::to_value(DEFAULT_TIMER_OPTIONS)?;
    if let Value::Object(base) = &mut merged {
        base.extend(overrides);
    }
    serde_json::from_value(merged)
}
