//! Core data types for the online timer.
//!
//! This module defines the data structures used for:
//! - Timer state tags
//! - Duration presets
//! - Timer options with validation
//! - The persisted progress snapshot

use serde::{Deserialize, Serialize};

/// Longest duration a user may set, in seconds (99 hours).
pub const MAX_TIMER_SECONDS: u64 = 99 * 3600;

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Timer is stopped
    #[default]
    Stopped,
    /// Timer is counting down
    Running,
    /// Timer is paused with time remaining
    Paused,
    /// Countdown reached zero
    Finished,
}

impl TimerState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Stopped => "stopped",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Finished => "finished",
        }
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_active(&self) -> bool {
        matches!(self, TimerState::Running)
    }
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stopped" => Ok(TimerState::Stopped),
            "running" => Ok(TimerState::Running),
            "paused" => Ok(TimerState::Paused),
            "finished" => Ok(TimerState::Finished),
            other => Err(format!(
                "unknown timer state '{}' (expected stopped, running, paused or finished)",
                other
            )),
        }
    }
}

// ============================================================================
// TimerPreset
// ============================================================================

/// Named convenience durations, in seconds.
pub struct TimerPreset;

impl TimerPreset {
    pub const ONE_MINUTE: u64 = 60;
    pub const TEN_MINUTES: u64 = 600;
    pub const TWENTY_FIVE_MINUTES: u64 = 1500;
    pub const SIXTY_MINUTES: u64 = 3600;

    /// All presets with a display label, shortest first.
    pub const ALL: [(&'static str, u64); 4] = [
        ("1 minute", Self::ONE_MINUTE),
        ("10 minutes", Self::TEN_MINUTES),
        ("25 minutes", Self::TWENTY_FIVE_MINUTES),
        ("60 minutes", Self::SIXTY_MINUTES),
    ];
}

// ============================================================================
// TimerOptions
// ============================================================================

/// Default options: a sixty minute countdown with both sounds on.
pub const DEFAULT_TIMER_OPTIONS: TimerOptions = TimerOptions {
    initial_time: TimerPreset::SIXTY_MINUTES,
    enable_tick_sound: true,
    enable_success_sound: true,
};

/// User configuration for the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerOptions {
    /// Countdown length in seconds (1-356400)
    pub initial_time: u64,
    /// Whether to play a sound on every tick
    pub enable_tick_sound: bool,
    /// Whether to play a sound when the countdown finishes
    pub enable_success_sound: bool,
}

impl Default for TimerOptions {
    fn default() -> Self {
        DEFAULT_TIMER_OPTIONS
    }
}

impl TimerOptions {
    /// Returns a copy with the specified initial time.
    pub fn with_initial_time(mut self, seconds: u64) -> Self {
        self.initial_time = seconds;
        self
    }

    /// Returns a copy with the tick sound toggled.
    pub fn with_tick_sound(mut self, enabled: bool) -> Self {
        self.enable_tick_sound = enabled;
        self
    }

    /// Returns a copy with the success sound toggled.
    pub fn with_success_sound(mut self, enabled: bool) -> Self {
        self.enable_success_sound = enabled;
        self
    }

    /// Validates the options.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_time < 1 || self.initial_time > MAX_TIMER_SECONDS {
            return Err(format!(
                "initial time must be between 1 and {} seconds",
                MAX_TIMER_SECONDS
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Timer progress as written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Seconds left on the countdown
    pub remaining_time: u64,
    /// State tag at the time of saving
    pub state: TimerState,
    /// Milliseconds since the Unix epoch when the snapshot was written
    pub timestamp: i64,
}

/// Timer progress as returned by a load; the timestamp is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTimerState {
    pub remaining_time: u64,
    pub state: TimerState,
}

impl From<TimerSnapshot> for SavedTimerState {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            remaining_time: snapshot.remaining_time,
            state: snapshot.state,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
