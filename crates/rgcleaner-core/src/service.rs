//! The four engine operations behind one trait
//!
//! Every front-end (MCP stdio, HTTP, function trigger, CLI) talks to
//! `CleanerTools` and only translates its own wire format.

use crate::config::CleanerConfig;
use crate::error::{CleanerError, Result};
use crate::inventory::{DemoReport, InventoryListing, ResourceGroupRecord, build_inventory};
use crate::orchestrator::{DeletionOrchestrator, DeletionReport};
use crate::pattern::{BUILTIN_EXCLUDE_PATTERNS, ExclusionList};
use crate::provider::GroupProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const NAMES_REQUIRED: &str = "names array is required and must not be empty";

/// Response of `get_exclude_patterns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionPatternsReport {
    pub built_in: Vec<String>,
    /// Lines as written in the file, including ones that do not compile
    pub from_file: Vec<String>,
    pub file_path: String,
}

/// Engine operations exposed to every transport
#[async_trait]
pub trait CleanerTools: Send + Sync {
    async fn list_resource_groups(&self, include_excluded: bool) -> Result<InventoryListing>;

    async fn delete_resource_groups(
        &self,
        names: Vec<String>,
        audit: bool,
    ) -> Result<DeletionReport>;

    async fn get_exclude_patterns(&self) -> Result<ExclusionPatternsReport>;

    async fn detect_demo_rgs(&self) -> Result<DemoReport>;
}

/// Reject a request without names; entries are kept exactly as given
pub fn validate_names(names: Vec<String>) -> Result<Vec<String>> {
    if names.is_empty() {
        return Err(CleanerError::validation(NAMES_REQUIRED));
    }
    Ok(names)
}

/// The cleaner engine bound to a provider
pub struct Cleaner<P> {
    provider: P,
    exclusion_list: ExclusionList,
    orchestrator: DeletionOrchestrator,
}

impl<P: GroupProvider> Cleaner<P> {
    pub fn new(provider: P, config: &CleanerConfig) -> Self {
        Self {
            provider,
            exclusion_list: config.exclusion_list(),
            orchestrator: DeletionOrchestrator::new(config.pacing),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn exclusion_list(&self) -> &ExclusionList {
        &self.exclusion_list
    }

    /// Enumerate and classify with one fresh load of the exclusion list
    pub async fn inventory(&self) -> Result<Vec<ResourceGroupRecord>> {
        let raw = self.provider.list_groups().await.map_err(|e| {
            tracing::error!("Listing resource groups via {} failed: {}", self.provider.name(), e);
            e
        })?;
        let patterns = self.exclusion_list.load().await;
        Ok(build_inventory(raw, &patterns))
    }
}

#[async_trait]
impl<P: GroupProvider> CleanerTools for Cleaner<P> {
    async fn list_resource_groups(&self, include_excluded: bool) -> Result<InventoryListing> {
        let records = self.inventory().await?;
        let listing = InventoryListing::new(records, include_excluded);
        tracing::info!(
            "Listed {} resource groups ({} excluded, {} demo)",
            listing.total,
            listing.excluded,
            listing.demos
        );
        Ok(listing)
    }

    async fn delete_resource_groups(
        &self,
        names: Vec<String>,
        audit: bool,
    ) -> Result<DeletionReport> {
        let names = validate_names(names)?;
        let patterns = self.exclusion_list.load().await;
        tracing::info!(
            "Processing {} deletion request(s){}",
            names.len(),
            if audit { " in audit mode" } else { "" }
        );
        Ok(self
            .orchestrator
            .run(&names, audit, &patterns, &self.provider)
            .await)
    }

    async fn get_exclude_patterns(&self) -> Result<ExclusionPatternsReport> {
        Ok(ExclusionPatternsReport {
            built_in: BUILTIN_EXCLUDE_PATTERNS
                .iter()
                .map(|p| p.source().to_string())
                .collect(),
            from_file: self.exclusion_list.read_lines().await,
            file_path: self.exclusion_list.path().display().to_string(),
        })
    }

    async fn detect_demo_rgs(&self) -> Result<DemoReport> {
        let records = self.inventory().await?;
        Ok(DemoReport::from_records(records))
    }
}
