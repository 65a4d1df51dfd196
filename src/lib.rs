//! Online Timer Library
//!
//! This library provides the core functionality for the online countdown
//! timer. It includes:
//! - Duration formatting, parsing and validation
//! - Type definitions for options, presets and saved progress
//! - A key-value store abstraction with file and in-memory backends
//! - Best-effort persistence of options and progress
//! - Sound cue playback
//! - A countdown engine and the CLI built on it

pub mod cli;
pub mod engine;
pub mod persistence;
pub mod sound;
pub mod storage;
pub mod time;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    SavedTimerState, TimerOptions, TimerPreset, TimerSnapshot, TimerState,
    DEFAULT_TIMER_OPTIONS, MAX_TIMER_SECONDS,
};

pub use time::{format_timer_time, parse_time_string, validate_timer_time, TimeParseError};

pub use persistence::{TimerPersistence, TIMER_OPTIONS_KEY, TIMER_STATE_KEY};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

pub use sound::{
    play_sound, try_create_player, MockSoundPlayer, RodioSoundPlayer, SoundCue, SoundError,
    SoundPlayer,
};

pub use engine::{Countdown, CountdownEvent};
