//! rgcleaner engine
//!
//! Classifies Azure resource groups as temporary (demo, test, event) or
//! durable, protects an allow-list from deletion and runs paced bulk
//! deletions with an audit (dry-run) mode.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │  MCP stdio   │ │ HTTP /api/mcp│ │ Function hdl │ │     CLI      │
//! └──────┬───────┘ └──────┬───────┘ └──────┬───────┘ └──────┬───────┘
//!        └────────────────┴───────┬────────┴────────────────┘
//!                                 │ trait CleanerTools
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │                         rgcleaner-core                          │
//! │  PatternSet ──▶ Classifier ──▶ Inventory / DeletionOrchestrator │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │ trait GroupProvider
//!                         ┌───────▼───────┐
//!                         │ azure (az CLI)│
//!                         └───────────────┘
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod inventory;
pub mod orchestrator;
pub mod pattern;
pub mod provider;
pub mod service;
pub mod tools;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports
pub use classifier::{is_demo, is_excluded, matched_demo_patterns};
pub use config::{CleanerConfig, find_exclusion_list};
pub use error::{CleanerError, Result};
pub use inventory::{
    DemoGroup, DemoReport, InventoryListing, RawGroup, ResourceGroupRecord, build_inventory,
};
pub use orchestrator::{
    DEFAULT_PACING, DeleteMode, DeletionOrchestrator, DeletionOutcome, DeletionReport,
    DeletionStatus, DeletionSummary,
};
pub use pattern::{ExclusionList, PatternKind, PatternRule, PatternSet};
pub use provider::GroupProvider;
pub use service::{Cleaner, CleanerTools, ExclusionPatternsReport, validate_names};
pub use tools::{ToolDescriptor, ToolName, call_tool, tool_descriptors};
