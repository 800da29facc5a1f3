//! Azure provider implementation

use crate::az::{AccountInfo, AzCli};
use crate::error::Result;
use async_trait::async_trait;
use rgcleaner_core::{GroupProvider, RawGroup};

/// Resource groups of one Azure subscription, reached through the az CLI
#[derive(Debug, Clone, Default)]
pub struct AzureProvider {
    az: AzCli,
}

impl AzureProvider {
    pub fn new(subscription: Option<String>) -> Self {
        Self {
            az: AzCli::new().with_subscription(subscription),
        }
    }

    pub fn with_cli(az: AzCli) -> Self {
        Self { az }
    }

    pub fn cli(&self) -> &AzCli {
        &self.az
    }

    pub async fn check_auth(&self) -> Result<AccountInfo> {
        self.az.check_auth().await
    }
}

#[async_trait]
impl GroupProvider for AzureProvider {
    fn name(&self) -> &str {
        "azure-cli"
    }

    async fn list_groups(&self) -> rgcleaner_core::Result<Vec<RawGroup>> {
        let groups = self.az.list_groups().await?;
        tracing::debug!("az returned {} resource groups", groups.len());
        Ok(groups
            .into_iter()
            .map(|g| RawGroup::new(g.name, g.location))
            .collect())
    }

    async fn begin_delete(&self, name: &str) -> rgcleaner_core::Result<()> {
        self.az.delete_group(name).await?;
        Ok(())
    }
}
