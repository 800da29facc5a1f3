//! Azure Functions custom handler
//!
//! The Functions host forwards each MCP tool trigger as
//! `POST /{functionName}` with an invocation payload `{Data, Metadata}`.
//! Tool arguments arrive in `Metadata.mcptoolargs`; the tool result is
//! returned as a JSON string in `ReturnValue`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rgcleaner_core::{CleanerTools, Result, ToolName};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{AppState, rejection_response};

pub const NAMES_REQUIRED: &str = "names is required (comma-separated list of RG names)";
pub const NAMES_EMPTY: &str = "names must contain at least one resource group name";

/// Invocation payload sent by the Functions host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvocationRequest {
    #[serde(rename = "Data", default)]
    pub data: Value,

    #[serde(rename = "Metadata", default)]
    pub metadata: Map<String, Value>,
}

impl InvocationRequest {
    /// Tool arguments, whether the host sent them as an object or as JSON text
    pub fn tool_args(&self) -> Map<String, Value> {
        match self.metadata.get("mcptoolargs") {
            Some(Value::Object(args)) => args.clone(),
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(args)) => args,
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }
}

/// Invocation response returned to the Functions host
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "Outputs")]
    pub outputs: Map<String, Value>,

    #[serde(rename = "Logs")]
    pub logs: Vec<String>,

    #[serde(rename = "ReturnValue")]
    pub return_value: String,
}

/// Function name registered with the host for each tool
pub fn function_tool(function: &str) -> Option<ToolName> {
    match function {
        "listResourceGroups" => Some(ToolName::ListResourceGroups),
        "deleteResourceGroups" => Some(ToolName::DeleteResourceGroups),
        "getExcludePatterns" => Some(ToolName::GetExcludePatterns),
        "detectDemoRgs" => Some(ToolName::DetectDemoRgs),
        _ => None,
    }
}

pub(crate) async fn endpoint(
    State(state): State<AppState>,
    Path(function): Path<String>,
    payload: std::result::Result<Json<InvocationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection).into_response(),
    };
    match function_tool(&function) {
        Some(tool) => Json(invoke(state.tools.as_ref(), tool, &request).await).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown function: {}", function) })),
        )
            .into_response(),
    }
}

/// Run one tool trigger
pub async fn invoke<T>(
    tools: &T,
    tool: ToolName,
    request: &InvocationRequest,
) -> InvocationResponse
where
    T: CleanerTools + ?Sized,
{
    let args = request.tool_args();
    let mut logs = Vec::new();

    let result = match tool {
        ToolName::ListResourceGroups => {
            logs.push("Listing resource groups".to_string());
            let include_excluded = args
                .get("includeExcluded")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            to_value(tools.list_resource_groups(include_excluded).await)
        }
        ToolName::DeleteResourceGroups => {
            logs.push("Delete resource groups request".to_string());
            match split_names(args.get("names")) {
                Ok(names) => {
                    let audit = args.get("audit").and_then(Value::as_bool).unwrap_or(false);
                    to_value(tools.delete_resource_groups(names, audit).await)
                }
                Err(message) => json!({ "error": message }),
            }
        }
        ToolName::GetExcludePatterns => {
            logs.push("Getting exclude patterns".to_string());
            to_value(tools.get_exclude_patterns().await)
        }
        ToolName::DetectDemoRgs => {
            logs.push("Detecting demo resource groups".to_string());
            to_value(tools.detect_demo_rgs().await)
        }
    };

    if let Some(error) = result.get("error") {
        tracing::warn!("{} failed: {}", tool, error);
        logs.push(format!("{} failed: {}", tool, error));
    }

    InvocationResponse {
        outputs: Map::new(),
        logs,
        return_value: serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string()),
    }
}

/// Names from the comma-separated `names` argument. An array is accepted
/// only when every item is a string.
pub fn split_names(value: Option<&Value>) -> std::result::Result<Vec<String>, &'static str> {
    let names: Vec<String> = match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text
            .split(',')
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
        Some(Value::Array(items)) if !items.is_empty() => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                let name = item.as_str().ok_or(NAMES_REQUIRED)?.trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
            names
        }
        _ => return Err(NAMES_REQUIRED),
    };

    if names.is_empty() {
        return Err(NAMES_EMPTY);
    }
    Ok(names)
}

fn to_value<R: Serialize>(result: Result<R>) -> Value {
    match result.and_then(|r| serde_json::to_value(r).map_err(Into::into)) {
        Ok(value) => value,
        Err(e) => e.to_payload(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::json_rejection;
    use rgcleaner_core::testing::StaticProvider;
    use rgcleaner_core::{Cleaner, CleanerConfig, RawGroup};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn cleaner(provider: StaticProvider) -> (Cleaner<StaticProvider>, TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CleanerConfig::default()
            .with_exclude_list(temp_dir.path().join("exclude-list.txt"))
            .with_pacing(Duration::ZERO);
        (Cleaner::new(provider, &config), temp_dir)
    }

    fn request(args: Value) -> InvocationRequest {
        let mut metadata = Map::new();
        metadata.insert("mcptoolargs".to_string(), args);
        InvocationRequest {
            data: Value::Null,
            metadata,
        }
    }

    fn returned(response: &InvocationResponse) -> Value {
        serde_json::from_str(&response.return_value).unwrap()
    }

    #[test]
    fn test_function_names() {
        assert_eq!(
            function_tool("deleteResourceGroups"),
            Some(ToolName::DeleteResourceGroups)
        );
        assert_eq!(function_tool("detectDemoRgs"), Some(ToolName::DetectDemoRgs));
        assert_eq!(function_tool("delete_resource_groups"), None);
    }

    #[test]
    fn test_split_names() {
        assert_eq!(
            split_names(Some(&json!(" rg-demo1, rg-test2 ,,"))).unwrap(),
            vec!["rg-demo1", "rg-test2"]
        );
        assert_eq!(split_names(None), Err(NAMES_REQUIRED));
        assert_eq!(split_names(Some(&json!("   "))), Err(NAMES_REQUIRED));
        assert_eq!(split_names(Some(&json!(" , ,"))), Err(NAMES_EMPTY));

        assert_eq!(
            split_names(Some(&json!(["rg-a", " rg-b "]))).unwrap(),
            vec!["rg-a", "rg-b"]
        );
        assert_eq!(split_names(Some(&json!(["rg-a", 5]))), Err(NAMES_REQUIRED));
        assert_eq!(split_names(Some(&json!([null]))), Err(NAMES_REQUIRED));
        assert_eq!(split_names(Some(&json!(["  "]))), Err(NAMES_EMPTY));
    }

    #[test]
    fn test_tool_args_from_json_text() {
        let req = request(json!(r#"{"names": "rg-a", "audit": true}"#));
        let args = req.tool_args();
        assert_eq!(args["names"], "rg-a");
        assert_eq!(args["audit"], true);

        assert!(request(json!("not json")).tool_args().is_empty());
        assert!(InvocationRequest::default().tool_args().is_empty());
    }

    #[test]
    fn test_invocation_request_shape() {
        let req: InvocationRequest = serde_json::from_value(json!({
            "Data": { "mcptoolargs": "{}" },
            "Metadata": { "mcptoolargs": { "includeExcluded": false } }
        }))
        .unwrap();
        assert_eq!(req.tool_args()["includeExcluded"], false);
    }

    #[tokio::test]
    async fn test_delete_audit() {
        let (cleaner, _dir) = cleaner(StaticProvider::default());
        let args = json!({
            "names": "rg-demo-app,MC_aks-cluster,rg-temp-xyz",
            "audit": true
        });
        let response = invoke(&cleaner, ToolName::DeleteResourceGroups, &request(args)).await;

        let report = returned(&response);
        assert_eq!(report["mode"], "audit");
        assert_eq!(report["results"].as_array().unwrap().len(), 3);
        assert_eq!(report["results"][1]["status"], "skipped");
        assert_eq!(
            report["results"][2]["message"],
            "Would delete resource group: rg-temp-xyz"
        );
        assert_eq!(cleaner.provider().delete_calls(), 0);
        assert_eq!(response.logs[0], "Delete resource groups request");
    }

    #[tokio::test]
    async fn test_delete_requires_names() {
        let (cleaner, _dir) = cleaner(StaticProvider::default());

        let response = invoke(&cleaner, ToolName::DeleteResourceGroups, &request(json!({}))).await;
        assert_eq!(returned(&response)["error"], NAMES_REQUIRED);

        let response = invoke(
            &cleaner,
            ToolName::DeleteResourceGroups,
            &request(json!({ "names": ",," })),
        )
        .await;
        assert_eq!(returned(&response)["error"], NAMES_EMPTY);

        let response = invoke(
            &cleaner,
            ToolName::DeleteResourceGroups,
            &request(json!({ "names": ["rg-demo-app", 42] })),
        )
        .await;
        assert_eq!(returned(&response)["error"], NAMES_REQUIRED);
        assert_eq!(cleaner.provider().delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_endpoint_rejects_missing_content_type_as_json() {
        let (cleaner, _dir) = cleaner(StaticProvider::default());
        let state = AppState {
            tools: Arc::new(cleaner),
        };
        let rejection = json_rejection(None, "{}").await;

        let response = endpoint(
            State(state),
            Path("listResourceGroups".to_string()),
            Err(rejection),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"],
            "Expected request with `Content-Type: application/json`"
        );
    }

    #[tokio::test]
    async fn test_list_filter_and_failure() {
        let (listing_cleaner, _dir) = cleaner(StaticProvider::with_groups(vec![
            RawGroup::new("rg-demo-app", "eastus"),
            RawGroup::new("NetworkWatcherRG", "westus"),
        ]));
        let response = invoke(
            &listing_cleaner,
            ToolName::ListResourceGroups,
            &request(json!({ "includeExcluded": false })),
        )
        .await;
        let listing = returned(&response);
        assert_eq!(listing["total"], 1);
        assert_eq!(listing["groups"][0]["isDemo"], true);

        let (failing, _failing_dir) = cleaner(StaticProvider::failing_list("az: not logged in"));
        let response = invoke(&failing, ToolName::ListResourceGroups, &request(json!({}))).await;
        assert_eq!(returned(&response)["error"], "az: not logged in");
    }

    #[test]
    fn test_response_shape() {
        let response = InvocationResponse {
            return_value: "{}".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "Outputs": {}, "Logs": [], "ReturnValue": "{}" }));
    }
}
