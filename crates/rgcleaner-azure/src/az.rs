//! az CLI wrapper
//!
//! Wraps the Azure CLI commands needed to enumerate and delete resource
//! groups.

use crate::error::{AzureError, Result};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const LIST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(30);

const LIST_QUERY: &str = "[].{name:name, location:location}";

/// az CLI wrapper
#[derive(Debug, Clone)]
pub struct AzCli {
    program: String,
    subscription: Option<String>,
    list_timeout: Duration,
    delete_timeout: Duration,
}

impl Default for AzCli {
    fn default() -> Self {
        Self::new()
    }
}

impl AzCli {
    pub fn new() -> Self {
        Self {
            program: "az".to_string(),
            subscription: None,
            list_timeout: LIST_TIMEOUT,
            delete_timeout: DELETE_TIMEOUT,
        }
    }

    /// Target a specific subscription instead of the CLI's default
    pub fn with_subscription(mut self, subscription: Option<String>) -> Self {
        self.subscription = subscription.filter(|s| !s.trim().is_empty());
        self
    }

    /// Use another executable (a wrapper script or an absolute path to az)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    /// Full argument vector for an az invocation
    fn command_args(&self, args: &[&str]) -> Vec<String> {
        let mut full: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        if let Some(ref subscription) = self.subscription {
            full.push("--subscription".to_string());
            full.push(subscription.clone());
        }
        full
    }

    /// Run an az command and return stdout
    async fn run_command(&self, args: &[&str], timeout: Duration) -> Result<String> {
        let full_args = self.command_args(args);
        let mut cmd = Command::new(&self.program);
        cmd.args(&full_args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!("Running: {} {}", self.program, full_args.join(" "));

        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AzureError::AzNotFound);
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(AzureError::Timeout {
                    command: args.iter().take(2).cloned().collect::<Vec<_>>().join(" "),
                    seconds: timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(AzureError::CommandFailed(message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Account the CLI is logged in to
    pub async fn check_auth(&self) -> Result<AccountInfo> {
        let output = self
            .run_command(&["account", "show", "-o", "json"], self.list_timeout)
            .await?;

        let account: AccountInfo = serde_json::from_str(&output)?;
        Ok(account)
    }

    /// List all resource groups in the subscription
    pub async fn list_groups(&self) -> Result<Vec<GroupInfo>> {
        let output = self
            .run_command(
                &["group", "list", "--query", LIST_QUERY, "-o", "json"],
                self.list_timeout,
            )
            .await?;

        parse_group_list(&output)
    }

    /// Request deletion of a resource group without waiting for it to finish
    pub async fn delete_group(&self, name: &str) -> Result<()> {
        self.run_command(
            &["group", "delete", "--name", name, "--yes", "--no-wait"],
            self.delete_timeout,
        )
        .await?;
        Ok(())
    }
}

fn parse_group_list(output: &str) -> Result<Vec<GroupInfo>> {
    if output.trim().is_empty() || output.trim() == "[]" {
        return Ok(Vec::new());
    }

    let groups: Vec<GroupInfo> = serde_json::from_str(output)?;
    Ok(groups)
}

/// Resource group as projected by the list query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub name: String,

    #[serde(default)]
    pub location: String,
}

/// Subset of `az account show`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,

    pub name: String,

    #[serde(rename = "tenantId")]
    pub tenant_id: Option<String>,

    pub user: Option<AccountUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUser {
    pub name: String,
}
