//! Tool catalogue and JSON dispatch shared by the wire adapters

use crate::error::{CleanerError, Result};
use crate::service::{CleanerTools, NAMES_REQUIRED};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;

/// The four engine operations by wire name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    ListResourceGroups,
    DeleteResourceGroups,
    GetExcludePatterns,
    DetectDemoRgs,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::ListResourceGroups,
        ToolName::DeleteResourceGroups,
        ToolName::GetExcludePatterns,
        ToolName::DetectDemoRgs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ListResourceGroups => "list_resource_groups",
            ToolName::DeleteResourceGroups => "delete_resource_groups",
            ToolName::GetExcludePatterns => "get_exclude_patterns",
            ToolName::DetectDemoRgs => "detect_demo_rgs",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::ListResourceGroups => {
                "List all Azure resource groups in the current subscription with demo detection \
                 and exclusion status. Returns each RG's name, location, whether it matches \
                 demo/event patterns (suggesting it's temporary), and whether it's excluded by \
                 configured patterns."
            }
            ToolName::DeleteResourceGroups => {
                "Delete one or more Azure resource groups. Supports audit mode for dry-run. \
                 Automatically skips excluded RGs and staggers deletions to avoid rate limiting. \
                 WARNING: This permanently deletes resources."
            }
            ToolName::GetExcludePatterns => {
                "Get the current list of exclusion patterns that protect resource groups from \
                 deletion"
            }
            ToolName::DetectDemoRgs => {
                "Analyze resource groups and identify which ones appear to be temporary \
                 demo/test/event resources based on naming patterns"
            }
        }
    }

    /// JSON schema of the tool's arguments
    pub fn input_schema(&self) -> Value {
        match self {
            ToolName::ListResourceGroups => json!({
                "type": "object",
                "properties": {
                    "includeExcluded": {
                        "type": "boolean",
                        "description": "Include excluded resource groups in the output (default: true)",
                        "default": true
                    }
                }
            }),
            ToolName::DeleteResourceGroups => json!({
                "type": "object",
                "properties": {
                    "names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of resource group names to delete"
                    },
                    "audit": {
                        "type": "boolean",
                        "description": "If true, simulate deletion without actually deleting (default: false)",
                        "default": false
                    }
                },
                "required": ["names"]
            }),
            ToolName::GetExcludePatterns | ToolName::DetectDemoRgs => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.as_str().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CleanerError::UnknownTool(s.to_string()))
    }
}

/// Entry of a `tools/list` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    ToolName::ALL.iter().map(ToolName::descriptor).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    #[serde(default)]
    include_excluded: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct DeleteArgs {
    #[serde(default)]
    names: Option<Vec<String>>,
    #[serde(default)]
    audit: Option<bool>,
}

fn parse_args<T: serde::de::DeserializeOwned>(tool: ToolName, args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| {
        if tool == ToolName::DeleteResourceGroups {
            CleanerError::validation(NAMES_REQUIRED)
        } else {
            CleanerError::validation(format!("invalid arguments for {}: {}", tool, e))
        }
    })
}

/// Run a tool by wire name with JSON arguments and return its JSON response
pub async fn call_tool<T>(tools: &T, name: &str, args: Value) -> Result<Value>
where
    T: CleanerTools + ?Sized,
{
    let tool: ToolName = name.parse()?;
    tracing::debug!("Tool call: {}", tool);

    let response = match tool {
        ToolName::ListResourceGroups => {
            let args: ListArgs = parse_args(tool, args)?;
            let listing = tools
                .list_resource_groups(args.include_excluded.unwrap_or(true))
                .await?;
            serde_json::to_value(listing)?
        }
        ToolName::DeleteResourceGroups => {
            let args: DeleteArgs = parse_args(tool, args)?;
            let names = args
                .names
                .ok_or_else(|| CleanerError::validation(NAMES_REQUIRED))?;
            let report = tools
                .delete_resource_groups(names, args.audit.unwrap_or(false))
                .await?;
            serde_json::to_value(report)?
        }
        ToolName::GetExcludePatterns => serde_json::to_value(tools.get_exclude_patterns().await?)?,
        ToolName::DetectDemoRgs => serde_json::to_value(tools.detect_demo_rgs().await?)?,
    };

    Ok(response)
}
