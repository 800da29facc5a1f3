//! Resource group provider trait definition

use crate::error::Result;
use crate::inventory::RawGroup;
use async_trait::async_trait;

/// Cloud-side collaborator for enumeration and deletion
///
/// The engine never talks to the cloud API itself; implementations wrap a
/// CLI or SDK and report failures as `CleanerError::Provider`.
#[async_trait]
pub trait GroupProvider: Send + Sync {
    /// Returns the provider name (e.g., "azure-cli")
    fn name(&self) -> &str;

    /// Every resource group in scope. Any failure aborts the listing.
    async fn list_groups(&self) -> Result<Vec<RawGroup>>;

    /// Ask the provider to delete a resource group without waiting for
    /// completion. `Ok` means the request was accepted.
    async fn begin_delete(&self, name: &str) -> Result<()>;
}
