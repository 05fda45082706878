pub mod cli;
pub mod config;
pub mod command_output;
pub mod analysis_result;
pub mod stage_outcome;
pub mod analysis_bundle;
pub mod connectivity_analysis;
pub mod workspace_identity;
pub mod workspace_config;
pub mod workspace_summary;
pub mod outbound_rule;
pub mod private_endpoint;
pub mod network_report;
pub mod network_summary;
pub mod connected_resource;
pub mod resource_summary;
pub mod security_summary;
pub mod discovery_report;
pub mod resource_details;
pub mod vnet_report;
pub mod vnet_details;
pub mod subnet_details;
pub mod nsg_details;
pub mod route_table_details;
pub mod connectivity_difference;
pub mod comparison_report;
pub mod analysis_step;
pub mod progress_summary;
pub mod report_section;
