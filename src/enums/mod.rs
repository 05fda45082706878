pub mod query_failure;
pub mod commands;
pub mod hub_type;
pub mod network_type;
pub mod isolation_mode;
pub mod connection_type;
pub mod access_method;
pub mod difference_type;
pub mod severity;
pub mod step_status;
pub mod run_outcome;
