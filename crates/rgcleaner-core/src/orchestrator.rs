//! Deletion orchestration with audit mode and pacing

use crate::classifier::is_excluded;
use crate::pattern::PatternSet;
use crate::provider::GroupProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between successive destructive calls
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

const EXCLUDED_REASON: &str = "excluded by pattern";
const BLANK_NAME: &str = "resource group name must not be blank";

/// Terminal state of one requested name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStatus {
    /// Protected by an exclusion rule, nothing was attempted
    Skipped,
    /// Audit mode, nothing was attempted
    Audit,
    /// The provider accepted the deletion request
    Deleting,
    /// The provider rejected the deletion request
    Error,
}

impl std::fmt::Display for DeletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeletionStatus::Skipped => write!(f, "skipped"),
            DeletionStatus::Audit => write!(f, "audit"),
            DeletionStatus::Deleting => write!(f, "deleting"),
            DeletionStatus::Error => write!(f, "error"),
        }
    }
}

/// Result for a single requested name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOutcome {
    pub name: String,

    pub status: DeletionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DeletionOutcome {
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DeletionStatus::Skipped,
            message: None,
            reason: Some(EXCLUDED_REASON.to_string()),
        }
    }

    pub fn audit(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: Some(format!("Would delete resource group: {}", name)),
            name,
            status: DeletionStatus::Audit,
            reason: None,
        }
    }

    pub fn deleting(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: Some(format!("Deletion initiated for: {}", name)),
            name,
            status: DeletionStatus::Deleting,
            reason: None,
        }
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DeletionStatus::Error,
            message: Some(message.into()),
            reason: None,
        }
    }
}

/// Whether a batch may touch the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    Audit,
    Delete,
}

impl DeleteMode {
    pub fn from_audit(audit: bool) -> Self {
        if audit { Self::Audit } else { Self::Delete }
    }
}

impl std::fmt::Display for DeleteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteMode::Audit => write!(f, "audit"),
            DeleteMode::Delete => write!(f, "delete"),
        }
    }
}

/// Response of `delete_resource_groups`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionReport {
    pub mode: DeleteMode,
    pub results: Vec<DeletionOutcome>,
}

impl DeletionReport {
    pub fn summary(&self) -> DeletionSummary {
        let count = |status: DeletionStatus| {
            self.results.iter().filter(|r| r.status == status).count()
        };
        DeletionSummary {
            skipped: count(DeletionStatus::Skipped),
            audit: count(DeletionStatus::Audit),
            deleting: count(DeletionStatus::Deleting),
            error: count(DeletionStatus::Error),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| r.status == DeletionStatus::Error)
    }
}

/// Outcome counts of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionSummary {
    pub skipped: usize,
    pub audit: usize,
    pub deleting: usize,
    pub error: usize,
}

impl std::fmt::Display for DeletionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} deleting, {} audited, {} skipped, {} failed",
            self.deleting, self.audit, self.skipped, self.error
        )
    }
}

/// Runs a batch of deletion requests one name at a time
#[derive(Debug, Clone)]
pub struct DeletionOrchestrator {
    pacing: Duration,
}

impl Default for DeletionOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_PACING)
    }
}

impl DeletionOrchestrator {
    pub fn new(pacing: Duration) -> Self {
        Self { pacing }
    }

    /// Produce one outcome per requested name, in request order.
    ///
    /// Blank names fail without touching the provider. Otherwise exclusion is
    /// checked first and always wins. Audit mode never calls the
    /// provider. In delete mode every provider call after the first is
    /// preceded by the pacing delay; skipped and audited names never wait.
    pub async fn run<P>(
        &self,
        names: &[String],
        audit: bool,
        patterns: &PatternSet,
        provider: &P,
    ) -> DeletionReport
    where
        P: GroupProvider + ?Sized,
    {
        let mode = DeleteMode::from_audit(audit);
        let mut results = Vec::with_capacity(names.len());
        let mut provider_called = false;

        for name in names {
            if name.trim().is_empty() {
                tracing::warn!("Rejecting blank resource group name {:?}", name);
                results.push(DeletionOutcome::error(name, BLANK_NAME));
                continue;
            }

            if is_excluded(name, patterns) {
                tracing::info!("Skipping excluded resource group: {}", name);
                results.push(DeletionOutcome::skipped(name));
                continue;
            }

            if audit {
                tracing::info!("[audit] Would delete resource group: {}", name);
                results.push(DeletionOutcome::audit(name));
                continue;
            }

            if provider_called && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            provider_called = true;

            match provider.begin_delete(name).await {
                Ok(()) => {
                    tracing::info!("Deletion initiated for: {}", name);
                    results.push(DeletionOutcome::deleting(name));
                }
                Err(e) => {
                    tracing::warn!("Failed to delete {}: {}", name, e);
                    results.push(DeletionOutcome::error(name, e.to_string()));
                }
            }
        }

        let report = DeletionReport { mode, results };
        tracing::debug!("Deletion batch finished ({}): {}", mode, report.summary());
        report
    }
}
