//! Inventory view: raw resource groups decorated with classification

use crate::classifier::{is_demo, is_excluded, matched_demo_patterns};
use crate::pattern::PatternSet;
use serde::{Deserialize, Serialize};

/// A resource group as reported by the enumeration collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGroup {
    pub name: String,
    pub location: String,
}

impl RawGroup {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// A resource group with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupRecord {
    pub name: String,
    pub location: String,
    pub is_demo: bool,
    pub is_excluded: bool,
}

impl ResourceGroupRecord {
    pub fn classify(raw: RawGroup, patterns: &PatternSet) -> Self {
        Self {
            is_demo: is_demo(&raw.name),
            is_excluded: is_excluded(&raw.name, patterns),
            name: raw.name,
            location: raw.location,
        }
    }

    /// Looks temporary and is not protected
    pub fn is_deletion_candidate(&self) -> bool {
        self.is_demo && !self.is_excluded
    }
}

/// Classify every raw group against one pattern set
pub fn build_inventory(raw: Vec<RawGroup>, patterns: &PatternSet) -> Vec<ResourceGroupRecord> {
    raw.into_iter()
        .map(|group| ResourceGroupRecord::classify(group, patterns))
        .collect()
}

/// Listing returned by `list_resource_groups`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryListing {
    pub total: usize,
    pub excluded: usize,
    /// Demo groups that are not excluded
    pub demos: usize,
    pub groups: Vec<ResourceGroupRecord>,
}

impl InventoryListing {
    /// Aggregates are computed after the optional exclusion filter
    pub fn new(mut groups: Vec<ResourceGroupRecord>, include_excluded: bool) -> Self {
        if !include_excluded {
            groups.retain(|g| !g.is_excluded);
        }

        let excluded = groups.iter().filter(|g| g.is_excluded).count();
        let demos = groups.iter().filter(|g| g.is_deletion_candidate()).count();

        Self {
            total: groups.len(),
            excluded,
            demos,
            groups,
        }
    }
}

/// One entry of the demo detection report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoGroup {
    pub name: String,
    pub location: String,
    pub matched_patterns: Vec<String>,
}

/// Report returned by `detect_demo_rgs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub total_groups: usize,
    pub demo_count: usize,
    pub demo_groups: Vec<DemoGroup>,
}

impl DemoReport {
    pub fn from_records(records: Vec<ResourceGroupRecord>) -> Self {
        let total_groups = records.len();
        let demo_groups: Vec<DemoGroup> = records
            .into_iter()
            .filter(ResourceGroupRecord::is_deletion_candidate)
            .map(|g| DemoGroup {
                matched_patterns: matched_demo_patterns(&g.name),
                name: g.name,
                location: g.location,
            })
            .collect();

        Self {
            total_groups,
            demo_count: demo_groups.len(),
            demo_groups,
        }
    }
}
