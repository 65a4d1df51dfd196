//! Sound playback for the online timer.
//!
//! This module provides:
//!
//! - [`play_sound`]: plays a file and completes when playback ends
//! - [`SoundPlayer`]: the audio capability, with rodio and mock implementations
//! - [`SoundCue`]: the tick and success cues and where their files live
//!
//! Audio is optional. Callers pass `None` as the player when no output
//! device exists, and `play_sound` then succeeds without playing anything.
//! With a player present, any failure to open, decode or play the file is
//! returned as a [`SoundError`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use online_timer::sound::{play_sound, try_create_player, SoundCue, SoundPlayer};
//!
//! # async fn demo() {
//! let player = try_create_player(false).map(|p| p as Arc<dyn SoundPlayer>);
//! let path = SoundCue::Success.path_in("sounds".as_ref());
//! if let Err(e) = play_sound(player, &path).await {
//!     eprintln!("Could not play sound: {}", e);
//! }
//! # }
//! ```

mod cue;
mod error;
mod player;

pub use cue::{default_sounds_dir, SoundCue, DEFAULT_SOUNDS_DIR};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer: Send + Sync {
    /// Plays the sound file at `path`, returning once playback has ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or played.
    fn play_to_end(&self, path: &Path) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_to_end(&self, path: &Path) -> Result<(), SoundError> {
        self.play_file(path)
    }
}

/// Plays the sound at `path`, completing when playback ends.
///
/// Without a player this returns `Ok(())` immediately. Playback itself runs
/// on a blocking worker so the caller's runtime keeps ticking.
///
/// # Errors
///
/// Returns the player's error, or `SoundError::PlaybackError` if the worker
/// panicked or was cancelled.
pub async fn play_sound(
    player: Option<Arc<dyn SoundPlayer>>,
    path: impl AsRef<Path>,
) -> Result<(), SoundError> {
    let path = path.as_ref().to_path_buf();
    let Some(player) = player else {
        debug!("No audio capability, skipping {}", path.display());
        return Ok(());
    };

    tokio::task::spawn_blocking(move || player.play_to_end(&path))
        .await
        .map_err(|e| SoundError::PlaybackError(format!("playback task failed: {}", e)))?
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<PathBuf>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.calls().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<PathBuf> {
        self.calls().clone()
    }

    pub fn clear_calls(&self) {
        self.calls().clear();
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Vec<PathBuf>> {
        self.play_calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_to_end(&self, path: &Path) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.calls().push(path.to_path_buf());
        Ok(())
    }
}
