//! `quill`: bookstore inventory and sales console.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use quill_console::config::{Cli, ConsoleConfig};
use quill_console::prompt::LinePrompt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConsoleConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    quill_console::init_tracing(&config.log_filter);
    info!("Starting Quill console");

    let stdin = io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());

    match quill_console::run(&config, &mut prompt).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
