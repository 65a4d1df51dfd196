//! Countdown engine for the online timer.
//!
//! This module provides the countdown state machine:
//! - State transitions (Stopped → Running ⇄ Paused → Finished)
//! - Countdown with tokio::time::interval
//! - Event firing for display, persistence and sounds

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::time::validate_timer_time;
use crate::types::{SavedTimerState, TimerState};

// ============================================================================
// CountdownEvent
// ============================================================================

/// Countdown events for display, persistence and sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Countdown started from a full duration
    Started {
        /// Duration in seconds
        duration: u64,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining: u64,
    },
    /// Countdown paused
    Paused {
        /// Remaining seconds
        remaining: u64,
    },
    /// Countdown resumed
    Resumed {
        /// Remaining seconds
        remaining: u64,
    },
    /// Countdown stopped before reaching zero
    Stopped,
    /// Countdown reached zero
    Finished,
}

// ============================================================================
// Countdown
// ============================================================================

/// Countdown that ticks once per second while running.
pub struct Countdown {
    state: TimerState,
    remaining: u64,
    event_tx: mpsc::UnboundedSender<CountdownEvent>,
}

impl Countdown {
    /// Creates a stopped countdown reporting to `event_tx`.
    pub fn new(event_tx: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        Self {
            state: TimerState::Stopped,
            remaining: 0,
            event_tx,
        }
    }

    /// Recreates a countdown from saved progress.
    ///
    /// A running or paused snapshot with time left comes back paused, since
    /// the time spent away is unknown. Anything else comes back stopped.
    pub fn restore(
        saved: SavedTimerState,
        event_tx: mpsc::UnboundedSender<CountdownEvent>,
    ) -> Self {
        let mut countdown = Self::new(event_tx);
        let resumable = matches!(saved.state, TimerState::Running | TimerState::Paused)
            && saved.remaining_time > 0;
        if resumable {
            countdown.state = TimerState::Paused;
            countdown.remaining = saved.remaining_time;
        }
        countdown
    }

    /// Runs the countdown until it finishes or stops.
    ///
    /// The first tick lands one second after the call. Returns immediately
    /// if the countdown is not running.
    pub async fn run(&mut self) -> Result<()> {
        let period = Duration::from_secs(1);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.state.is_active() {
            ticker.tick().await;
            self.tick()?;
        }

        Ok(())
    }

    /// Starts a countdown of `duration` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is already running or paused, or if
    /// `duration` is not a valid timer length.
    pub fn start(&mut self, duration: u64) -> Result<()> {
        if matches!(self.state, TimerState::Running | TimerState::Paused) {
            anyhow::bail!("countdown is already in progress");
        }
        if !validate_timer_time(duration) {
            anyhow::bail!("invalid countdown length: {} seconds", duration);
        }

        self.state = TimerState::Running;
        self.remaining = duration;

        self.event_tx
            .send(CountdownEvent::Started { duration })
            .context("Failed to send started event")?;

        Ok(())
    }

    /// Pauses the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is not running.
    pub fn pause(&mut self) -> Result<()> {
        if self.state != TimerState::Running {
            anyhow::bail!("countdown is not running");
        }

        self.state = TimerState::Paused;

        self.event_tx
            .send(CountdownEvent::Paused {
                remaining: self.remaining,
            })
            .context("Failed to send paused event")?;

        Ok(())
    }

    /// Resumes a paused countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is not paused.
    pub fn resume(&mut self) -> Result<()> {
        if self.state != TimerState::Paused {
            anyhow::bail!("countdown is not paused");
        }

        self.state = TimerState::Running;

        self.event_tx
            .send(CountdownEvent::Resumed {
                remaining: self.remaining,
            })
            .context("Failed to send resumed event")?;

        Ok(())
    }

    /// Stops the countdown and clears the remaining time.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is neither running nor paused.
    pub fn stop(&mut self) -> Result<()> {
        if !matches!(self.state, TimerState::Running | TimerState::Paused) {
            anyhow::bail!("countdown is not in progress");
        }

        self.state = TimerState::Stopped;
        self.remaining = 0;

        self.event_tx
            .send(CountdownEvent::Stopped)
            .context("Failed to send stopped event")?;

        Ok(())
    }

    /// Advances a running countdown by one second.
    ///
    /// Returns true if this tick finished the countdown. Does nothing unless
    /// running.
    pub fn tick(&mut self) -> Result<bool> {
        if self.state != TimerState::Running {
            return Ok(false);
        }

        self.remaining = self.remaining.saturating_sub(1);

        self.event_tx
            .send(CountdownEvent::Tick {
                remaining: self.remaining,
            })
            .context("Failed to send tick event")?;

        if self.remaining > 0 {
            return Ok(false);
        }

        self.state = TimerState::Finished;
        self.event_tx
            .send(CountdownEvent::Finished)
            .context("Failed to send finished event")?;

        Ok(true)
    }

    /// Returns the current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the remaining seconds.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_countdown() -> (Countdown, mpsc::UnboundedReceiver<CountdownEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Countdown::new(tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<CountdownEvent>) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // Transition Tests
    // ------------------------------------------------------------------------

    mod transition_tests {
        use super::*;

        #[test]
        fn test_new_countdown() {
            let (countdown, _rx) = create_countdown();
            assert_eq!(countdown.state(), TimerState::Stopped);
            assert_eq!(countdown.remaining(), 0);
        }

        #[test]
        fn test_start() {
            let (mut countdown, mut rx) = create_countdown();
            countdown.start(60).unwrap();

            assert_eq!(countdown.state(), TimerState::Running);
            assert_eq!(countdown.remaining(), 60);
            assert_eq!(drain(&mut rx), vec![CountdownEvent::Started { duration: 60 }]);
        }

        #[test]
        fn test_start_rejects_invalid_duration() {
            let (mut countdown, _rx) = create_countdown();
            assert!(countdown.start(0).is_err());
            assert!(countdown.start(356_401).is_err());
            assert_eq!(countdown.state(), TimerState::Stopped);
        }

        #[test]
        fn test_start_while_in_progress_fails() {
            let (mut countdown, _rx) = create_countdown();
            countdown.start(60).unwrap();
            assert!(countdown.start(30).is_err());

            countdown.pause().unwrap();
            assert!(countdown.start(30).is_err());
        }

        #[test]
        fn test_pause_and_resume() {
            let (mut countdown, mut rx) = create_countdown();
            countdown.start(60).unwrap();
            countdown.tick().unwrap();
            countdown.pause().unwrap();
            assert_eq!(countdown.state(), TimerState::Paused);

            // Paused countdowns do not tick.
            assert!(!countdown.tick().unwrap());
            assert_eq!(countdown.remaining(), 59);

            countdown.resume().unwrap();
            assert_eq!(countdown.state(), TimerState::Running);

            assert_eq!(
                drain(&mut rx),
                vec![
                    CountdownEvent::Started { duration: 60 },
                    CountdownEvent::Tick { remaining: 59 },
                    CountdownEvent::Paused { remaining: 59 },
                    CountdownEvent::Resumed { remaining: 59 },
                ]
            );
        }

        #[test]
        fn test_invalid_transitions() {
            let (mut countdown, _rx) = create_countdown();
            assert!(countdown.pause().is_err());
            assert!(countdown.resume().is_err());
            assert!(countdown.stop().is_err());

            countdown.start(60).unwrap();
            assert!(countdown.resume().is_err());
        }

        #[test]
        fn test_stop() {
            let (mut countdown, mut rx) = create_countdown();
            countdown.start(60).unwrap();
            countdown.stop().unwrap();

            assert_eq!(countdown.state(), TimerState::Stopped);
            assert_eq!(countdown.remaining(), 0);
            assert_eq!(drain(&mut rx).last(), Some(&CountdownEvent::Stopped));
        }

        #[test]
        fn test_tick_to_finish() {
            let (mut countdown, mut rx) = create_countdown();
            countdown.start(2).unwrap();

            assert!(!countdown.tick().unwrap());
            assert!(countdown.tick().unwrap());
            assert_eq!(countdown.state(), TimerState::Finished);
            assert_eq!(countdown.remaining(), 0);

            assert_eq!(
                drain(&mut rx),
                vec![
                    CountdownEvent::Started { duration: 2 },
                    CountdownEvent::Tick { remaining: 1 },
                    CountdownEvent::Tick { remaining: 0 },
                    CountdownEvent::Finished,
                ]
            );

            // A finished countdown can start again.
            countdown.start(5).unwrap();
            assert_eq!(countdown.state(), TimerState::Running);
        }

        #[test]
        fn test_tick_with_dropped_receiver_fails() {
            let (mut countdown, rx) = create_countdown();
            countdown.start(5).ok();
            drop(rx);
            assert!(countdown.tick().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Restore Tests
    // ------------------------------------------------------------------------

    mod restore_tests {
        use super::*;

        fn restore(remaining_time: u64, state: TimerState) -> Countdown {
            let (tx, _rx) = mpsc::unbounded_channel();
            Countdown::restore(
                SavedTimerState {
                    remaining_time,
                    state,
                },
                tx,
            )
        }

        #[test]
        fn test_restore_paused() {
            let countdown = restore(90, TimerState::Paused);
            assert_eq!(countdown.state(), TimerState::Paused);
            assert_eq!(countdown.remaining(), 90);
        }

        #[test]
        fn test_restore_running_comes_back_paused() {
            let countdown = restore(90, TimerState::Running);
            assert_eq!(countdown.state(), TimerState::Paused);
        }

        #[test]
        fn test_restore_finished_or_empty_is_stopped() {
            assert_eq!(restore(0, TimerState::Finished).state(), TimerState::Stopped);
            assert_eq!(restore(0, TimerState::Paused).state(), TimerState::Stopped);
            assert_eq!(restore(30, TimerState::Stopped).remaining(), 0);
        }
    }

    // ------------------------------------------------------------------------
    // Run Loop Tests
    // ------------------------------------------------------------------------

    mod run_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_run_counts_down_to_finish() {
            let (mut countdown, mut rx) = create_countdown();
            countdown.start(3).unwrap();

            countdown.run().await.unwrap();

            assert_eq!(countdown.state(), TimerState::Finished);
            let ticks: Vec<_> = drain(&mut rx)
                .into_iter()
                .filter(|e| matches!(e, CountdownEvent::Tick { .. }))
                .collect();
            assert_eq!(ticks.len(), 3);
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_returns_when_not_running() {
            let (mut countdown, mut rx) = create_countdown();
            countdown.run().await.unwrap();
            assert!(drain(&mut rx).is_empty());
        }
    }
}
