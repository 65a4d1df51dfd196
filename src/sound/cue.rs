//! Sound cues played by the timer.

use std::path::{Path, PathBuf};

use crate::types::TimerOptions;

/// Name of the cue directory inside the application data directory.
pub const DEFAULT_SOUNDS_DIR: &str = "sounds";

/// Directory searched for cue files when none is configured.
///
/// This is `<data dir>/online-timer/sounds`, or `./sounds` when the platform
/// has no data directory.
#[must_use]
pub fn default_sounds_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("online-timer").join(DEFAULT_SOUNDS_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOUNDS_DIR))
}

/// The sounds the timer can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Played once per elapsed second.
    Tick,
    /// Played when the countdown reaches zero.
    Success,
}

impl SoundCue {
    /// File name of the cue inside a sounds directory.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Tick => "tick.mp3",
            Self::Success => "success.mp3",
        }
    }

    /// Full path of the cue inside `dir`.
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    /// Returns true if `options` allow this cue to play.
    #[must_use]
    pub fn is_enabled(&self, options: &TimerOptions) -> bool {
        match self {
            Self::Tick => options.enable_tick_sound,
            Self::Success => options.enable_success_sound,
        }
    }
}
