use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "mlconnect")]
#[clap(about = "Connectivity and network security analyzer for Azure ML and AI Foundry workspaces", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
