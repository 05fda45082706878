use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use crate::config::constants::{timeout_duration, PROBE_TIMEOUT_SECS};
use crate::enums::query_failure::QueryFailure;
use crate::structs::command_output::CommandOutput;
use crate::traits::command_executor::CommandExecutor;

/// Executes commands through `tokio::process` with a hard timeout.
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {

    async fn execute(&self, program: &str, args: &[String], timeout: Duration)
        -> Result<CommandOutput, QueryFailure> {
        let output_future = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(timeout, output_future).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
            Ok(Err(e)) => Err(QueryFailure::Spawn(e)),
            Err(_) => Err(QueryFailure::TimedOut(timeout.as_secs())),
        }
    }
}

/// Gateway for all Azure CLI queries. Every failure mode (spawn error,
/// non-zero exit, timeout, malformed JSON) collapses to `None` so callers
/// branch on absence-of-result instead of handling process errors. `None`
/// means "unknown", not "empty".
#[derive(Clone)]
pub struct AzureCli {
    executor: Arc<dyn CommandExecutor>,
    subscription_id: Option<String>,
}

impl AzureCli {
    pub fn new(subscription_id: Option<String>) -> Self {
        Self {
            executor: Arc::new(SystemExecutor),
            subscription_id,
        }
    }

    pub fn with_executor(executor: Arc<dyn CommandExecutor>, subscription_id: Option<String>) -> Self {
        Self { executor, subscription_id }
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    /// Run an `az` command and parse its stdout as JSON.
    pub async fn run_command(&self, args: &[&str], timeout_secs: u64) -> Option<Value> {
        let full_args = self.build_args(args, true);

        match self.run(&full_args, timeout_secs).await {
            Ok(output) => {
                if output.stdout.trim().is_empty() {
                    return None;
                }
                match serde_json::from_str(&output.stdout) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        log::warn!("⚠️ {}", QueryFailure::Json(e));
                        None
                    }
                }
            }
            Err(failure) => {
                log::warn!("⚠️ Azure CLI command failed: {}", failure);
                None
            }
        }
    }

    /// Run an `az` command and return raw stdout.
    pub async fn run_command_raw(&self, args: &[&str], timeout_secs: u64) -> Option<String> {
        let full_args = self.build_args(args, false);

        match self.run(&full_args, timeout_secs).await {
            Ok(output) => Some(output.stdout),
            Err(failure) => {
                log::warn!("⚠️ Azure CLI command failed: {}", failure);
                None
            }
        }
    }

    /// Check whether the user has an active Azure CLI session.
    pub async fn is_logged_in(&self) -> bool {
        let args = vec!["account".to_string(), "show".to_string()];
        matches!(
            self.executor.execute("az", &args, timeout_duration(PROBE_TIMEOUT_SECS)).await,
            Ok(output) if output.success()
        )
    }

    async fn run(&self, args: &[String], timeout_secs: u64) -> Result<CommandOutput, QueryFailure> {
        log::debug!("Running Azure CLI command: az {}", args.join(" "));

        let output = self.executor
            .execute("az", args, timeout_duration(timeout_secs))
            .await?;

        if !output.success() {
            return Err(QueryFailure::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output)
    }

    fn build_args(&self, args: &[&str], want_json: bool) -> Vec<String> {
        let mut full_args: Vec<String> = args.iter().map(|s| s.to_string()).collect();

        if let Some(subscription) = &self.subscription_id {
            full_args.push("--subscription".to_string());
            full_args.push(subscription.clone());
        }

        if want_json && !args.contains(&"--output") {
            full_args.push("--output".to_string());
            full_args.push("json".to_string());
        }

        full_args
    }
}

#[cfg(test)]
pub mod test_support {
    use std::sync::Mutex;
    use super::*;

    #[derive(Clone)]
    enum ScriptedReply {
        Stdout(String),
        Fail { code: i32, stderr: String },
        Timeout,
    }

    struct Rule {
        pattern: String,
        reply: ScriptedReply,
        once: bool,
    }

    /// Executor fake that matches commands by substring of the joined
    /// argument list and records every call for count assertions. Rules
    /// match in insertion order; one-shot rules are consumed on first use.
    pub struct ScriptedExecutor {
        rules: Mutex<Vec<Rule>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedExecutor {
        pub fn new() -> Arc<Self> {
            Arc::new(Self {
                rules: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn push(&self, pattern: &str, reply: ScriptedReply, once: bool) {
            self.rules.lock().unwrap().push(Rule {
                pattern: pattern.to_string(),
                reply,
                once,
            });
        }

        pub fn on_json(&self, pattern: &str, value: Value) {
            self.push(pattern, ScriptedReply::Stdout(value.to_string()), false);
        }

        pub fn on_json_once(&self, pattern: &str, value: Value) {
            self.push(pattern, ScriptedReply::Stdout(value.to_string()), true);
        }

        pub fn on_stdout(&self, pattern: &str, stdout: &str) {
            self.push(pattern, ScriptedReply::Stdout(stdout.to_string()), false);
        }

        pub fn fail(&self, pattern: &str, stderr: &str) {
            self.push(pattern, ScriptedReply::Fail { code: 1, stderr: stderr.to_string() }, false);
        }

        pub fn fail_once(&self, pattern: &str, stderr: &str) {
            self.push(pattern, ScriptedReply::Fail { code: 1, stderr: stderr.to_string() }, true);
        }

        pub fn time_out(&self, pattern: &str) {
            self.push(pattern, ScriptedReply::Timeout, false);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self, pattern: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| c.contains(pattern)).count()
        }
    }

    #[async_trait]
    impl CommandExecutor for ScriptedExecutor {

        async fn execute(&self, program: &str, args: &[String], timeout: Duration)
            -> Result<CommandOutput, QueryFailure> {
            let joined = format!("{} {}", program, args.join(" "));
            self.calls.lock().unwrap().push(joined.clone());

            let mut rules = self.rules.lock().unwrap();
            let matched = rules.iter().position(|rule| joined.contains(rule.pattern.as_str()));
            if let Some(index) = matched {
                let reply = rules[index].reply.clone();
                if rules[index].once {
                    rules.remove(index);
                }
                drop(rules);

                return match reply {
                    ScriptedReply::Stdout(stdout) => Ok(CommandOutput {
                        exit_code: 0,
                        stdout,
                        stderr: String::new(),
                    }),
                    ScriptedReply::Fail { code, stderr } => Ok(CommandOutput {
                        exit_code: code,
                        stdout: String::new(),
                        stderr,
                    }),
                    ScriptedReply::Timeout => Err(QueryFailure::TimedOut(timeout.as_secs())),
                };
            }

            Ok(CommandOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: format!("no scripted response for: {}", joined),
            })
        }
    }
}
