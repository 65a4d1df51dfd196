//! Command definitions for the online timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::time::{parse_time_string, validate_timer_time};
use crate::types::{TimerState, MAX_TIMER_SECONDS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Online Timer CLI - countdown timer utilities
#[derive(Parser, Debug)]
#[command(
    name = "online-timer",
    version,
    about = "Countdown timer with saved options and progress",
    long_about = "Formats, parses and validates countdown durations, keeps timer options and \n\
                  progress in a small JSON store, and runs a countdown in the terminal.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path of the storage file (defaults to the user data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Run without any storage; nothing is saved or loaded
    #[arg(long, global = true, conflicts_with = "store")]
    pub no_store: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Format a number of seconds as MM:SS or HH:MM:SS
    Format {
        /// Seconds to format (may be fractional or negative)
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Parse MM:SS or HH:MM:SS into seconds
    Parse {
        /// Time text to parse
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Check whether a number of seconds is a valid timer length
    Validate {
        /// Seconds to check
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },

    /// List the preset durations
    Presets,

    /// Show or change the saved timer options
    Options {
        #[command(subcommand)]
        action: OptionsCommand,
    },

    /// Show, save or clear the saved timer progress
    State {
        #[command(subcommand)]
        action: StateCommand,
    },

    /// Run a countdown in the terminal
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Actions on the saved options
#[derive(Subcommand, Debug, Clone)]
pub enum OptionsCommand {
    /// Print the current options
    Show,
    /// Change one or more options
    Set(SetOptionsArgs),
    /// Restore the default options
    Reset,
}

/// Arguments for `options set`
#[derive(Args, Debug, Clone, Default)]
pub struct SetOptionsArgs {
    /// Countdown length as seconds, MM:SS or HH:MM:SS
    #[arg(short, long, value_parser = parse_timer_length)]
    pub initial_time: Option<u64>,

    /// Play a sound every second (true/false)
    #[arg(long, value_name = "BOOL")]
    pub tick_sound: Option<bool>,

    /// Play a sound when the countdown finishes (true/false)
    #[arg(long, value_name = "BOOL")]
    pub success_sound: Option<bool>,
}

impl SetOptionsArgs {
    /// Returns true if no option was given.
    pub fn is_empty(&self) -> bool {
        self.initial_time.is_none() && self.tick_sound.is_none() && self.success_sound.is_none()
    }
}

/// Actions on the saved progress
#[derive(Subcommand, Debug, Clone)]
pub enum StateCommand {
    /// Print the saved progress
    Show,
    /// Save progress directly
    Save {
        /// Remaining time as seconds, MM:SS or HH:MM:SS
        #[arg(value_parser = parse_time_value)]
        remaining: u64,

        /// State tag to save
        #[arg(short, long, default_value = "paused")]
        state: TimerState,
    },
    /// Remove the saved progress
    Clear,
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Countdown length as seconds, MM:SS or HH:MM:SS. Without it a saved
    /// paused countdown is resumed, or the saved initial time is used.
    #[arg(value_parser = parse_timer_length)]
    pub time: Option<u64>,

    /// Disable tick and success sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Directory holding tick.mp3 and success.mp3
    /// [default: <data dir>/online-timer/sounds]
    #[arg(long, value_name = "DIR")]
    pub sounds_dir: Option<PathBuf>,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses seconds, `MM:SS` or `HH:MM:SS` without range checks.
fn parse_time_value(s: &str) -> Result<u64, String> {
    if s.contains(':') {
        return parse_time_string(s).map_err(|e| e.to_string());
    }
    s.trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid time '{}': expected seconds, MM:SS or HH:MM:SS", s))
}

/// Parses a countdown length and checks it is between 1 second and 99 hours.
fn parse_timer_length(s: &str) -> Result<u64, String> {
    let seconds = parse_time_value(s)?;
    if !validate_timer_time(seconds) {
        return Err(format!(
            "timer length must be between 1 and {} seconds",
            MAX_TIMER_SECONDS
        ));
    }
    Ok(seconds)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["online-timer"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.store.is_none());
            assert!(!cli.no_store);
        }

        #[test]
        fn test_parse_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["online-timer", "presets", "-v", "--store", "/tmp/s.json"]);
            assert!(cli.verbose);
            assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        }

        #[test]
        fn test_store_conflicts_with_no_store() {
            let result =
                Cli::try_parse_from(["online-timer", "--store", "x.json", "--no-store", "presets"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_format_negative() {
            let cli = Cli::parse_from(["online-timer", "format", "-5"]);
            match cli.command {
                Some(Commands::Format { seconds }) => assert_eq!(seconds, -5.0),
                _ => panic!("Expected Format command"),
            }
        }

        #[test]
        fn test_parse_parse_keeps_raw_text() {
            let cli = Cli::parse_from(["online-timer", "parse", "-1:00"]);
            match cli.command {
                Some(Commands::Parse { text }) => assert_eq!(text, "-1:00"),
                _ => panic!("Expected Parse command"),
            }
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["online-timer", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Options and State Command Tests
    // ------------------------------------------------------------------------

    mod store_command_tests {
        use super::*;

        #[test]
        fn test_parse_options_set() {
            let cli = Cli::parse_from([
                "online-timer",
                "options",
                "set",
                "--initial-time",
                "25:00",
                "--tick-sound",
                "false",
            ]);
            match cli.command {
                Some(Commands::Options {
                    action: OptionsCommand::Set(args),
                }) => {
                    assert_eq!(args.initial_time, Some(1500));
                    assert_eq!(args.tick_sound, Some(false));
                    assert_eq!(args.success_sound, None);
                    assert!(!args.is_empty());
                }
                _ => panic!("Expected Options Set command"),
            }
        }

        #[test]
        fn test_options_set_rejects_zero_length() {
            let result =
                Cli::try_parse_from(["online-timer", "options", "set", "--initial-time", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_state_save_defaults_to_paused() {
            let cli = Cli::parse_from(["online-timer", "state", "save", "30:00"]);
            match cli.command {
                Some(Commands::State {
                    action: StateCommand::Save { remaining, state },
                }) => {
                    assert_eq!(remaining, 1800);
                    assert_eq!(state, TimerState::Paused);
                }
                _ => panic!("Expected State Save command"),
            }
        }

        #[test]
        fn test_parse_state_save_with_state() {
            let cli =
                Cli::parse_from(["online-timer", "state", "save", "0", "--state", "finished"]);
            match cli.command {
                Some(Commands::State {
                    action: StateCommand::Save { remaining, state },
                }) => {
                    assert_eq!(remaining, 0);
                    assert_eq!(state, TimerState::Finished);
                }
                _ => panic!("Expected State Save command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_run_defaults() {
            let cli = Cli::parse_from(["online-timer", "run"]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert_eq!(args.time, None);
                    assert!(!args.no_sound);
                    assert_eq!(args.sounds_dir, None);
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_with_time_forms() {
            for (text, expected) in [("90", 90), ("01:30", 90), ("01:00:00", 3600)] {
                let cli = Cli::parse_from(["online-timer", "run", text, "--no-sound"]);
                match cli.command {
                    Some(Commands::Run(args)) => {
                        assert_eq!(args.time, Some(expected));
                        assert!(args.no_sound);
                    }
                    _ => panic!("Expected Run command"),
                }
            }
        }

        #[test]
        fn test_parse_run_rejects_out_of_range() {
            assert!(Cli::try_parse_from(["online-timer", "run", "356401"]).is_err());
            assert!(Cli::try_parse_from(["online-timer", "run", "01:60"]).is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Validation Function Tests
    // ------------------------------------------------------------------------

    mod validation_tests {
        use super::*;

        #[test]
        fn test_parse_time_value() {
            assert_eq!(parse_time_value("0"), Ok(0));
            assert_eq!(parse_time_value("10:00"), Ok(600));
            assert!(parse_time_value("ten").is_err());
            assert!(parse_time_value("-3").is_err());
        }

        #[test]
        fn test_parse_timer_length() {
            assert_eq!(parse_timer_length("1"), Ok(1));
            assert_eq!(parse_timer_length("356400"), Ok(356_400));
            assert!(parse_timer_length("0").unwrap_err().contains("between 1 and 356400"));
        }
    }
}
