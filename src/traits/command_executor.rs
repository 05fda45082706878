use std::time::Duration;
use async_trait::async_trait;
use crate::enums::query_failure::QueryFailure;
use crate::structs::command_output::CommandOutput;

/// Boundary for spawning external CLI processes. Production uses
/// `SystemExecutor`; tests script responses without a live CLI.
#[async_trait]
pub trait CommandExecutor: Send + Sync {

    async fn execute(&self, program: &str, args: &[String], timeout: Duration)
        -> Result<CommandOutput, QueryFailure>;
}
