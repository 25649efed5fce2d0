use newsdesk::cli::Cli;
use newsdesk::commands::dispatch;
use newsdesk::error::ConsoleError;
use newsdesk::logger::{initialize as LoggerInitialize, level_for};
use newsdesk::state::AppState;

use client_core::storage::{StoragePaths, detect_storage_paths};

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if json {
                match serde_json::to_string_pretty(&e) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(_) => eprintln!("{e}"),
                }
            } else {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, ConsoleError> {
    let paths = match cli.data_dir {
        Some(dir) => StoragePaths::in_dir(dir),
        None => detect_storage_paths()?,
    };

    create_dir_all(&paths.data_dir).map_err(|e| {
        ConsoleError::console(format!(
            "Failed to create data directory {}: {e}",
            paths.data_dir.display()
        ))
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&paths.data_dir, level_for(cli.verbose))?;

    info!("Newsdesk console starting");
    info!("Data directory: {} ({})", paths.data_dir.display(), paths.source);

    let state = AppState::initialize(paths)?;
    dispatch(&state, cli.command, cli.json).await
}
