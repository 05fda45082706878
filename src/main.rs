use clap::Parser;
use crate::errors::ErrorHandler;
use crate::structs::cli::Cli;
use crate::workers::command_runner::CommandRunner;

mod structs;
mod services;
mod helpers;
mod enums;
mod logger;
mod config;
mod errors;
mod traits;
mod workers;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();

    match runner.run_command(cli.command).await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            ErrorHandler::handle_error(&e);
            std::process::exit(1);
        }
    }
}
