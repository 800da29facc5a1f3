//! Azure provider for rgcleaner
//!
//! Implements `GroupProvider` on top of the Azure CLI, so listing and
//! deletion reuse whatever login the `az` installation already has.
//!
//! # Requirements
//!
//! - `az` CLI must be installed and logged in (`az login`)
//! - Deletion uses `--no-wait`: a successful call only means Azure accepted
//!   the request
//!
//! # Example
//!
//! ```ignore
//! use rgcleaner_azure::AzureProvider;
//! use rgcleaner_core::GroupProvider;
//!
//! let provider = AzureProvider::new(None);
//! let groups = provider.list_groups().await?;
//! ```

pub mod az;
pub mod error;
pub mod provider;

pub use az::{AccountInfo, AzCli, GroupInfo};
pub use error::{AzureError, Result};
pub use provider::AzureProvider;
