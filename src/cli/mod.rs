//! Command-line interface.
//!
//! `clockface run` paints a clock into the terminal, the other commands
//! inspect how options and skins resolve without running a clock.

mod commands;
pub mod formatting;
pub mod terminal;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::{
    config::{Config, ConfigOverrides},
    core::ClockError,
};

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading or serializing configuration failed.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ClockError),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Output of a command, printed by the caller, or the reason it failed.
pub type CommandResult = Result<String, CliError>;

/// Analog/digital clock for the terminal.
#[derive(Parser, Debug)]
#[command(name = "clockface", version)]
#[command(about = "Analog/digital clock with skins and offset time")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    clock: ClockArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the clock in the terminal. Type start, stop or quit.
    Run,
    /// Print the time the clock would show right now.
    Time,
    /// Print the resolved options of a skin as JSON.
    Resolve {
        /// Skin to resolve; defaults to the active skin.
        #[arg(short, long)]
        skin: Option<String>,
    },
    /// Print the JSON schema of the clock options.
    Schema,
}

/// Options shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct ClockArgs {
    /// Config file to load instead of the default location.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skin to activate.
    #[arg(long, global = true)]
    pub skin_name: Option<String>,

    /// Show the digital block.
    #[arg(long, global = true)]
    pub digital: bool,

    /// Show seconds in the digital block.
    #[arg(long, global = true)]
    pub seconds: bool,

    /// Hide the analog second hand.
    #[arg(long, global = true)]
    pub no_second_hand: bool,

    /// Show UTC plus this many minutes instead of local time.
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub offset: Option<i32>,

    /// Keep the displayed time fixed.
    #[arg(long, global = true)]
    pub frozen: bool,
}

impl ClockArgs {
    /// Overrides expressed by the flags. Unset flags leave options alone.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            active_skin: self.skin_name.clone(),
            show_digital_block: self.digital.then_some(true),
            show_seconds_text: self.seconds.then_some(true),
            show_second_hand: self.no_second_hand.then_some(false),
            use_offset: self.offset.map(|_| true),
            offset_minutes: self.offset,
            frozen: self.frozen.then_some(true),
            ..Default::default()
        }
    }

    /// Loads the config file named by `--config`, or the default one.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load_config(&self) -> Result<Config, ClockError> {
        match &self.config {
            Some(path) => Config::load_with_imports(path),
            None => Config::load_default(),
        }
    }
}

impl Cli {
    /// Options shared by every command.
    pub fn clock_args(&self) -> &ClockArgs {
        &self.clock
    }

    /// Whether the command keeps running until the user quits.
    pub fn is_long_running(&self) -> bool {
        matches!(self.command, Commands::Run)
    }

    /// Runs the parsed command against `config`.
    ///
    /// # Errors
    /// Returns error if the command fails
    pub async fn execute(self, config: Config) -> CommandResult {
        let overrides = config.clock.merge(self.clock.overrides());

        match self.command {
            Commands::Run => commands::run(overrides).await,
            Commands::Time => Ok(commands::time(overrides)),
            Commands::Resolve { skin } => commands::resolve(overrides, skin.as_deref()),
            Commands::Schema => commands::schema(),
        }
    }
}
