//! Terminal countdown for the `run` command.
//!
//! Wires a [`Countdown`] to the display, the persistence layer and the
//! sound cues. Progress is saved on every tick so an interrupted run can be
//! resumed; Ctrl-C pauses and saves before exiting.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::commands::RunArgs;
use super::display::Display;
use crate::engine::{Countdown, CountdownEvent};
use crate::persistence::TimerPersistence;
use crate::sound::{
    default_sounds_dir, play_sound, try_create_player, SoundCue, SoundError, SoundPlayer,
};
use crate::storage::KeyValueStore;
use crate::types::{TimerOptions, TimerState, DEFAULT_TIMER_OPTIONS};

/// Runs a countdown to completion or until Ctrl-C.
pub async fn run_countdown<S>(args: &RunArgs, persistence: TimerPersistence<S>) -> Result<()>
where
    S: KeyValueStore + Send + 'static,
{
    let player = if args.no_sound {
        None
    } else {
        try_create_player(false).map(|p| p as Arc<dyn SoundPlayer>)
    };
    run_countdown_with_player(args, persistence, player, tokio::signal::ctrl_c()).await
}

/// Runs a countdown with an explicit player and interrupt signal.
///
/// `interrupt` completing pauses the countdown and saves its progress.
pub async fn run_countdown_with_player<S, F>(
    args: &RunArgs,
    persistence: TimerPersistence<S>,
    player: Option<Arc<dyn SoundPlayer>>,
    interrupt: F,
) -> Result<()>
where
    S: KeyValueStore + Send + 'static,
    F: std::future::Future,
{
    let mut options = persistence.load_timer_options();
    if let Err(reason) = options.validate() {
        warn!("Ignoring saved initial time: {}", reason);
        options.initial_time = DEFAULT_TIMER_OPTIONS.initial_time;
    }
    let sounds_dir = args.sounds_dir.clone().unwrap_or_else(default_sounds_dir);
    let (tx, rx) = mpsc::unbounded_channel();

    let saved = match args.time {
        Some(_) => None,
        None => persistence.load_timer_state(),
    };
    let mut countdown = match saved {
        Some(saved) => Countdown::restore(saved, tx),
        None => Countdown::new(tx),
    };

    let handler = tokio::spawn(handle_events(
        rx,
        persistence,
        options,
        player,
        sounds_dir,
    ));

    if countdown.state() == TimerState::Paused {
        Display::show_run_start(countdown.remaining(), true);
        countdown.resume()?;
    } else {
        let duration = args.time.unwrap_or(options.initial_time);
        Display::show_run_start(duration, false);
        countdown.start(duration)?;
    }

    let outcome = tokio::select! {
        result = countdown.run() => Some(result),
        _ = interrupt => None,
    };
    match outcome {
        Some(result) => result?,
        None => {
            debug!("Interrupted, pausing countdown");
            countdown.pause()?;
        }
    }

    // Dropping the countdown closes the channel so the handler can finish.
    drop(countdown);
    handler.await.context("Countdown event handler failed")?;
    Ok(())
}

/// Applies countdown events to the display, the store and the speakers.
async fn handle_events<S: KeyValueStore>(
    mut rx: mpsc::UnboundedReceiver<CountdownEvent>,
    persistence: TimerPersistence<S>,
    options: TimerOptions,
    player: Option<Arc<dyn SoundPlayer>>,
    sounds_dir: PathBuf,
) {
    // At most one tick cue plays at a time; ticks arriving meanwhile are silent.
    let mut tick_task: Option<JoinHandle<()>> = None;

    while let Some(event) = rx.recv().await {
        match event {
            CountdownEvent::Started { duration: remaining }
            | CountdownEvent::Resumed { remaining } => {
                Display::show_tick(remaining);
                persistence.save_timer_state(remaining, TimerState::Running);
            }
            CountdownEvent::Tick { remaining } => {
                Display::show_tick(remaining);
                if remaining == 0 {
                    continue;
                }
                persistence.save_timer_state(remaining, TimerState::Running);
                if SoundCue::Tick.is_enabled(&options) && !is_playing(tick_task.as_ref()) {
                    let player = player.clone();
                    let path = SoundCue::Tick.path_in(&sounds_dir);
                    tick_task = Some(tokio::spawn(async move {
                        if let Err(e) = play_sound(player, &path).await {
                            debug!("Tick sound failed: {}", e);
                        }
                    }));
                }
            }
            CountdownEvent::Paused { remaining } => {
                persistence.save_timer_state(remaining, TimerState::Paused);
                Display::show_paused(remaining);
            }
            CountdownEvent::Stopped => {
                persistence.clear_timer_state();
            }
            CountdownEvent::Finished => {
                persistence.clear_timer_state();
                Display::show_finished();
                if SoundCue::Success.is_enabled(&options) {
                    let path = SoundCue::Success.path_in(&sounds_dir);
                    match play_sound(player.clone(), &path).await {
                        Ok(()) => {}
                        Err(e @ SoundError::FileNotFound(_)) => {
                            debug!("Success sound skipped: {}", e);
                        }
                        Err(e) => warn!("Success sound failed: {} ({})", e, e.suggestion()),
                    }
                }
            }
        }
    }

    if let Some(task) = tick_task {
        if let Err(e) = task.await {
            debug!("Tick sound task failed: {}", e);
        }
    }
}

/// Returns true while a spawned cue is still playing.
fn is_playing(task: Option<&JoinHandle<()>>) -> bool {
    task.is_some_and(|task| !task.is_finished())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;
    use crate::storage::MemoryStore;
    use crate::types::SavedTimerState;

    fn run_args(time: Option<u64>) -> RunArgs {
        RunArgs {
            time,
            sounds_dir: Some(PathBuf::from("sounds")),
            ..RunArgs::default()
        }
    }

    fn shared_persistence() -> (Arc<MemoryStore>, TimerPersistence<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), TimerPersistence::new(store))
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_to_finish_clears_state_and_plays_success() {
        let (store, persistence) = shared_persistence();
        let reader = TimerPersistence::new(store.clone());
        reader.save_timer_options(&TimerOptions::default().with_tick_sound(false));

        let mock = Arc::new(MockSoundPlayer::new());
        run_countdown_with_player(
            &run_args(Some(2)),
            persistence,
            Some(mock.clone() as Arc<dyn SoundPlayer>),
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert_eq!(reader.load_timer_state(), None);
        assert_eq!(
            mock.get_play_calls(),
            vec![PathBuf::from("sounds/success.mp3")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_sound_respects_options() {
        let (store, persistence) = shared_persistence();
        TimerPersistence::new(store.clone()).save_timer_options(
            &TimerOptions::default()
                .with_tick_sound(false)
                .with_success_sound(false),
        );

        let mock = Arc::new(MockSoundPlayer::new());
        run_countdown_with_player(
            &run_args(Some(1)),
            persistence,
            Some(mock.clone() as Arc<dyn SoundPlayer>),
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert_eq!(mock.play_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_saves_paused_state() {
        let (store, persistence) = shared_persistence();
        let reader = TimerPersistence::new(store.clone());

        let interrupt = tokio::time::sleep(std::time::Duration::from_millis(2500));
        run_countdown_with_player(&run_args(Some(60)), persistence, None, interrupt)
            .await
            .unwrap();

        assert_eq!(
            reader.load_timer_state(),
            Some(SavedTimerState {
                remaining_time: 58,
                state: TimerState::Paused
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resumes_saved_paused_state() {
        let (store, persistence) = shared_persistence();
        let reader = TimerPersistence::new(store.clone());
        reader.save_timer_state(30, TimerState::Paused);

        let interrupt = tokio::time::sleep(std::time::Duration::from_millis(1500));
        run_countdown_with_player(&run_args(None), persistence, None, interrupt)
            .await
            .unwrap();

        assert_eq!(reader.load_timer_state().unwrap().remaining_time, 29);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_time_ignores_saved_state() {
        let (store, persistence) = shared_persistence();
        let reader = TimerPersistence::new(store.clone());
        reader.save_timer_state(30, TimerState::Paused);

        let interrupt = tokio::time::sleep(std::time::Duration::from_millis(500));
        run_countdown_with_player(&run_args(Some(600)), persistence, None, interrupt)
            .await
            .unwrap();

        assert_eq!(reader.load_timer_state().unwrap().remaining_time, 600);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_saved_initial_time_uses_default() {
        for record in [r#"{"initialTime":0}"#, r#"{"initialTime":356401}"#] {
            let (store, persistence) = shared_persistence();
            let reader = TimerPersistence::new(store.clone());
            store
                .set_item(crate::persistence::TIMER_OPTIONS_KEY, record)
                .unwrap();

            let interrupt = tokio::time::sleep(std::time::Duration::from_millis(500));
            run_countdown_with_player(&run_args(None), persistence, None, interrupt)
                .await
                .unwrap();

            assert_eq!(
                reader.load_timer_state(),
                Some(SavedTimerState {
                    remaining_time: DEFAULT_TIMER_OPTIONS.initial_time,
                    state: TimerState::Paused
                })
            );
        }
    }

    #[tokio::test]
    async fn test_tick_sound_skipped_while_previous_plays() {
        let (_store, persistence) = shared_persistence();
        let mock = Arc::new(MockSoundPlayer::new());
        let options = TimerOptions::default().with_success_sound(false);

        let (tx, rx) = mpsc::unbounded_channel();
        for remaining in [3, 2, 1] {
            tx.send(CountdownEvent::Tick { remaining }).unwrap();
        }
        drop(tx);

        // The queued ticks arrive before the first cue task gets to run.
        handle_events(
            rx,
            persistence,
            options,
            Some(mock.clone() as Arc<dyn SoundPlayer>),
            PathBuf::from("sounds"),
        )
        .await;

        assert_eq!(mock.get_play_calls(), vec![PathBuf::from("sounds/tick.mp3")]);
    }

    #[tokio::test]
    async fn test_is_playing_tracks_task() {
        assert!(!is_playing(None));

        let pending = tokio::spawn(std::future::pending::<()>());
        assert!(is_playing(Some(&pending)));
        pending.abort();

        let done = tokio::spawn(async {});
        while !done.is_finished() {
            tokio::task::yield_now().await;
        }
        assert!(!is_playing(Some(&done)));
    }
}
