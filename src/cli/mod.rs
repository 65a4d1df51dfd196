//! CLI module for the online timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `run`: The terminal countdown

pub mod commands;
pub mod display;
pub mod run;

pub use commands::{Cli, Commands, OptionsCommand, RunArgs, SetOptionsArgs, StateCommand};
pub use display::Display;
pub use run::run_countdown;

use tracing::debug;

use crate::persistence::TimerPersistence;
use crate::storage::{default_store_path, FileStore};

/// Opens the store selected on the command line.
///
/// `--no-store` and a platform without a data directory both yield a
/// persistence layer with no store behind it.
pub fn open_persistence(cli: &Cli) -> TimerPersistence<FileStore> {
    if cli.no_store {
        debug!("Storage disabled by --no-store");
        return TimerPersistence::unavailable();
    }

    let path = cli.store.clone().or_else(default_store_path);
    match &path {
        Some(path) => debug!("Using store at {}", path.display()),
        None => debug!("No data directory found, running without storage"),
    }
    TimerPersistence::from_option(path.map(FileStore::new))
}
