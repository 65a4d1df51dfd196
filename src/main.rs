//! Online Timer CLI
//!
//! Converts and checks countdown durations, manages the saved timer
//! options and progress, and runs a countdown in the terminal.

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use online_timer::cli::{
    open_persistence, run_countdown, Cli, Commands, Display, OptionsCommand, StateCommand,
};
use online_timer::persistence::TimerPersistence;
use online_timer::storage::FileStore;
use online_timer::{format_timer_time, parse_time_string, validate_timer_time, TimerOptions};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            Display::show_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Executes the CLI command and returns the process exit code.
///
/// A failed `validate` is not an error but still exits non-zero.
async fn execute(cli: Cli) -> Result<ExitCode> {
    let persistence = open_persistence(&cli);

    match cli.command {
        Some(Commands::Format { seconds }) => {
            Display::show_value(format_timer_time(seconds));
        }
        Some(Commands::Parse { text }) => {
            let seconds = parse_time_string(&text)?;
            Display::show_value(seconds);
        }
        Some(Commands::Validate { value }) => {
            let valid = validate_timer_time(value);
            Display::show_validation(valid);
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Presets) => {
            Display::show_presets();
        }
        Some(Commands::Options { action }) => {
            execute_options(action, &persistence)?;
        }
        Some(Commands::State { action }) => {
            execute_state(action, &persistence);
        }
        Some(Commands::Run(args)) => {
            run_countdown(&args, persistence).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Executes an `options` subcommand.
fn execute_options(
    action: OptionsCommand,
    persistence: &TimerPersistence<FileStore>,
) -> Result<()> {
    match action {
        OptionsCommand::Show => {
            Display::show_options(&persistence.load_timer_options());
        }
        OptionsCommand::Set(args) => {
            if args.is_empty() {
                anyhow::bail!(
                    "nothing to set; pass --initial-time, --tick-sound or --success-sound"
                );
            }
            let mut options = persistence.load_timer_options();
            if let Some(seconds) = args.initial_time {
                options = options.with_initial_time(seconds);
            }
            if let Some(enabled) = args.tick_sound {
                options = options.with_tick_sound(enabled);
            }
            if let Some(enabled) = args.success_sound {
                options = options.with_success_sound(enabled);
            }
            options.validate().map_err(anyhow::Error::msg)?;

            persistence.save_timer_options(&options);
            Display::show_success("Timer options saved");
            Display::show_options(&options);
        }
        OptionsCommand::Reset => {
            persistence.save_timer_options(&TimerOptions::default());
            Display::show_success("Timer options reset to defaults");
        }
    }
    Ok(())
}

/// Executes a `state` subcommand.
fn execute_state(action: StateCommand, persistence: &TimerPersistence<FileStore>) {
    match action {
        StateCommand::Show => {
            Display::show_snapshot(persistence.load_timer_snapshot().as_ref());
        }
        StateCommand::Save { remaining, state } => {
            persistence.save_timer_state(remaining, state);
            Display::show_success("Timer state saved");
        }
        StateCommand::Clear => {
            persistence.clear_timer_state();
            Display::show_success("Timer state cleared");
        }
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
