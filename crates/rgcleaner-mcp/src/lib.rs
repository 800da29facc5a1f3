//! rgcleaner MCP Server
//!
//! MCP server built on the official rmcp SDK. Runs over the stdio transport
//! and exposes the four cleaner operations as tools.

use anyhow::Result;
use rgcleaner_core::CleanerTools;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

// ============================================================================
// Parameters
// ============================================================================

/// Listing parameters
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListParam {
    /// Include excluded resource groups in the output (default: true)
    #[serde(default)]
    pub include_excluded: Option<bool>,
}

/// Deletion parameters
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DeleteParam {
    /// Array of resource group names to delete
    pub names: Vec<String>,
    /// If true, simulate deletion without actually deleting (default: false)
    #[serde(default)]
    pub audit: bool,
}

// ============================================================================
// MCP server
// ============================================================================

fn to_text<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| error_text(&e))
}

fn error_text(e: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

/// rgcleaner MCP server
#[derive(Clone)]
pub struct CleanerServer {
    tools: Arc<dyn CleanerTools>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CleanerServer {
    pub fn new(tools: Arc<dyn CleanerTools>) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    /// List resource groups with classification
    #[tool(
        description = "List all Azure resource groups in the current subscription with demo detection and exclusion status. Returns each RG's name, location, whether it matches demo/event patterns (suggesting it's temporary), and whether it's excluded by configured patterns."
    )]
    async fn list_resource_groups(&self, params: Parameters<ListParam>) -> Result<String, String> {
        let include_excluded = params.0.include_excluded.unwrap_or(true);

        match self.tools.list_resource_groups(include_excluded).await {
            Ok(listing) => to_text(&listing),
            Err(e) => {
                error!("list_resource_groups failed: {}", e);
                Err(error_text(&e))
            }
        }
    }

    /// Delete (or audit) resource groups
    #[tool(
        description = "Delete one or more Azure resource groups. Supports audit mode for dry-run. Automatically skips excluded RGs and staggers deletions to avoid rate limiting. WARNING: This permanently deletes resources."
    )]
    async fn delete_resource_groups(
        &self,
        params: Parameters<DeleteParam>,
    ) -> Result<String, String> {
        let DeleteParam { names, audit } = params.0;

        match self.tools.delete_resource_groups(names, audit).await {
            Ok(report) => to_text(&report),
            Err(e) => {
                error!("delete_resource_groups failed: {}", e);
                Err(error_text(&e))
            }
        }
    }

    /// Show exclusion patterns
    #[tool(
        description = "Get the current list of exclusion patterns that protect resource groups from deletion"
    )]
    async fn get_exclude_patterns(&self) -> Result<String, String> {
        let report = self
            .tools
            .get_exclude_patterns()
            .await
            .map_err(|e| error_text(&e))?;
        to_text(&report)
    }

    /// Detect demo resource groups
    #[tool(
        description = "Analyze resource groups and identify which ones appear to be temporary demo/test/event resources based on naming patterns"
    )]
    async fn detect_demo_rgs(&self) -> Result<String, String> {
        match self.tools.detect_demo_rgs().await {
            Ok(report) => to_text(&report),
            Err(e) => {
                error!("detect_demo_rgs failed: {}", e);
                Err(error_text(&e))
            }
        }
    }
}

impl ServerHandler for CleanerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "rgcleaner MCP server. Finds temporary Azure resource groups and deletes them \
             safely; excluded groups are never deleted and audit=true performs a dry run.",
        )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_context = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_context).await
    }
}

/// Start the MCP server (stdio transport)
pub async fn run_server(tools: Arc<dyn CleanerTools>) -> Result<()> {
    let server = CleanerServer::new(tools);
    let transport = (tokio::io::stdin(), tokio::io::stdout());

    let service = server.serve(transport).await.map_err(|e| {
        error!("MCP server initialization failed: {}", e);
        anyhow::anyhow!("MCP server initialization failed: {}", e)
    })?;

    tracing::info!("rgcleaner MCP server running");

    // Runs until the client closes stdin
    service.waiting().await.map_err(|e| {
        error!("MCP server error: {}", e);
        anyhow::anyhow!("MCP server error: {}", e)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgcleaner_core::testing::StaticProvider;
    use rgcleaner_core::{Cleaner, CleanerConfig, RawGroup};
    use std::time::Duration;

    fn server(
        provider: StaticProvider,
    ) -> (
        CleanerServer,
        Arc<Cleaner<StaticProvider>>,
        tempfile::TempDir,
    ) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CleanerConfig::default()
            .with_exclude_list(temp_dir.path().join("exclude-list.txt"))
            .with_pacing(Duration::ZERO);
        let cleaner = Arc::new(Cleaner::new(provider, &config));
        (CleanerServer::new(cleaner.clone()), cleaner, temp_dir)
    }

    #[test]
    fn test_registers_four_tools() {
        let (server, _, _dir) = server(StaticProvider::default());
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "delete_resource_groups",
                "detect_demo_rgs",
                "get_exclude_patterns",
                "list_resource_groups"
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_audit() {
        let (server, cleaner, _dir) = server(StaticProvider::default());
        let text = server
            .delete_resource_groups(Parameters(DeleteParam {
                names: vec!["rg-demo-app".into(), "MC_aks-cluster".into()],
                audit: true,
            }))
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["mode"], "audit");
        assert_eq!(value["results"][1]["status"], "skipped");
        assert_eq!(cleaner.provider().delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_names_is_error_payload() {
        let (server, _, _dir) = server(StaticProvider::default());
        let err = server
            .delete_resource_groups(Parameters(DeleteParam::default()))
            .await
            .unwrap_err();

        let value: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(
            value["error"],
            "names array is required and must not be empty"
        );
    }

    #[test]
    fn test_delete_names_are_required() {
        let schema = schemars::schema_for!(DeleteParam);
        let required = schema.as_value()["required"].as_array().unwrap();
        assert!(required.iter().any(|field| field == "names"));
        assert!(!required.iter().any(|field| field == "audit"));

        let missing = serde_json::json!({ "audit": true });
        assert!(serde_json::from_value::<DeleteParam>(missing).is_err());
    }

    #[tokio::test]
    async fn test_list_failure_is_error_payload() {
        let (server, _, _dir) = server(StaticProvider::failing_list("az: login required"));
        let err = server
            .list_resource_groups(Parameters(ListParam::default()))
            .await
            .unwrap_err();
        assert!(err.contains("az: login required"));
    }

    #[tokio::test]
    async fn test_detect_demo_rgs() {
        let (server, _, _dir) = server(StaticProvider::with_groups(vec![
            RawGroup::new("rg-hackathon-2024", "eastus"),
            RawGroup::new("rg-prod", "eastus"),
        ]));
        let text = server.detect_demo_rgs().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["demoCount"], 1);
        assert_eq!(value["demoGroups"][0]["matchedPatterns"][0], "hackathon");
    }
}
