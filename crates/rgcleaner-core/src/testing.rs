//! In-memory provider for tests of the engine and its front-ends

use crate::error::{CleanerError, Result};
use crate::inventory::RawGroup;
use crate::provider::GroupProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Provider backed by a fixed group list that records deletion requests
#[derive(Debug, Default)]
pub struct StaticProvider {
    groups: Vec<RawGroup>,
    list_error: Option<String>,
    delete_failures: HashMap<String, String>,
    delete_requests: Mutex<Vec<String>>,
}

impl StaticProvider {
    pub fn with_groups(groups: Vec<RawGroup>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    /// Every `list_groups` call fails with `message`
    pub fn failing_list(message: impl Into<String>) -> Self {
        Self {
            list_error: Some(message.into()),
            ..Default::default()
        }
    }

    /// `begin_delete(name)` fails with `message`
    pub fn fail_on(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.delete_failures.insert(name.into(), message.into());
        self
    }

    /// Every name passed to `begin_delete`, failures included
    pub fn delete_requests(&self) -> Vec<String> {
        self.delete_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Names whose deletion was accepted
    pub fn deleted(&self) -> Vec<String> {
        self.delete_requests()
            .into_iter()
            .filter(|n| !self.delete_failures.contains_key(n))
            .collect()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_requests().len()
    }
}

#[async_trait]
impl GroupProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_groups(&self) -> Result<Vec<RawGroup>> {
        match &self.list_error {
            Some(message) => Err(CleanerError::provider(message.clone())),
            None => Ok(self.groups.clone()),
        }
    }

    async fn begin_delete(&self, name: &str) -> Result<()> {
        if let Ok(mut requests) = self.delete_requests.lock() {
            requests.push(name.to_string());
        }
        match self.delete_failures.get(name) {
            Some(message) => Err(CleanerError::provider(message.clone())),
            None => Ok(()),
        }
    }
}
