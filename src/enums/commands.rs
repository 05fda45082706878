use clap::Subcommand;
use crate::enums::hub_type::HubType;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a sample configuration file
    Init,
    /// Analyze connectivity for a single workspace or hub
    Analyze {
        #[clap(short, long)]
        workspace: String,
        #[clap(short = 'g', long)]
        resource_group: String,
        #[clap(short, long)]
        subscription: Option<String>,
        #[clap(long, value_enum, default_value_t = HubType::AzureMl)]
        hub_type: HubType,
        #[clap(short, long)]
        verbose: bool,
    },
    /// Compare connectivity configurations of two workspaces
    Compare {
        #[clap(long)]
        workspace1: String,
        #[clap(long)]
        resource_group1: String,
        #[clap(long)]
        workspace2: String,
        /// Defaults to the first resource group when omitted
        #[clap(long)]
        resource_group2: Option<String>,
        #[clap(short, long)]
        subscription: Option<String>,
        #[clap(long, value_enum, default_value_t = HubType::AzureMl)]
        hub_type: HubType,
    },
    /// Validate Azure CLI prerequisites and configuration
    Validate,
}
