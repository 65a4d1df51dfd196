//! Display utilities for the online timer CLI.
//!
//! This module provides formatted output for:
//! - Conversion results
//! - Saved options and progress
//! - The running countdown
//! - Error messages

use std::io::Write;

use chrono::DateTime;

use crate::time::format_timer_time;
use crate::types::{TimerOptions, TimerPreset, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a single result value on its own line.
    pub fn show_value(value: impl std::fmt::Display) {
        println!("{}", value);
    }

    /// Shows the result of a validity check.
    pub fn show_validation(valid: bool) {
        println!("{}", if valid { "valid" } else { "invalid" });
    }

    /// Shows all presets.
    pub fn show_presets() {
        for (label, seconds) in TimerPreset::ALL {
            println!("{:<12} {:>8}  ({}s)", label, format_timer_time(seconds), seconds);
        }
    }

    /// Shows the timer options.
    pub fn show_options(options: &TimerOptions) {
        println!("Timer options");
        println!("─────────────────────────────");
        println!(
            "Initial time:  {} ({}s)",
            format_timer_time(options.initial_time),
            options.initial_time
        );
        println!("Tick sound:    {}", Self::on_off(options.enable_tick_sound));
        println!("Success sound: {}", Self::on_off(options.enable_success_sound));
    }

    /// Shows the saved progress, if any.
    pub fn show_snapshot(snapshot: Option<&TimerSnapshot>) {
        let Some(snapshot) = snapshot else {
            println!("No saved timer state");
            return;
        };

        println!("Saved timer state");
        println!("─────────────────────────────");
        println!("State:     {}", snapshot.state);
        println!(
            "Remaining: {} ({}s)",
            format_timer_time(snapshot.remaining_time),
            snapshot.remaining_time
        );
        if let Some(saved_at) = DateTime::from_timestamp_millis(snapshot.timestamp) {
            println!("Saved at:  {}", saved_at.to_rfc3339());
        }
    }

    /// Shows a confirmation line.
    pub fn show_success(message: &str) {
        println!("* {}", message);
    }

    /// Shows the countdown starting or resuming.
    pub fn show_run_start(remaining: u64, resumed: bool) {
        let verb = if resumed { "Resuming" } else { "Starting" };
        println!("> {} countdown from {}", verb, format_timer_time(remaining));
    }

    /// Redraws the remaining time in place.
    pub fn show_tick(remaining: u64) {
        print!("\r  {}   ", format_timer_time(remaining));
        let _ = std::io::stdout().flush();
    }

    /// Shows the countdown pausing.
    pub fn show_paused(remaining: u64) {
        println!();
        println!(
            "|| Paused with {} left; run again to resume",
            format_timer_time(remaining)
        );
    }

    /// Shows the countdown finishing.
    pub fn show_finished() {
        println!();
        println!("* Time's up!");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    fn on_off(enabled: bool) -> &'static str {
        if enabled {
            "on"
        } else {
            "off"
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
