//! Clockface command-line entry point.

use std::{error::Error, process};

use clap::Parser;
use clockface::{
    cli::{Cli, formatting::format_error},
    tracing_config,
};
use tracing::{Level, info, span};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match cli.clock_args().load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };

    if cli.is_long_running() {
        tracing_config::init_with_file(config.general.log_level)?;
        let _span = span!(Level::INFO, "clockface_run").entered();
        info!("Starting terminal clock");
    } else {
        tracing_config::init(config.general.log_level)?;
    }

    match cli.execute(config).await {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
