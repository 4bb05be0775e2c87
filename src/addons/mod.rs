//! Addon catalog and lifecycle
//!
//! - `Addon` / `AddonFile` / `AddonCatalog` - the read-only file-set catalog
//! - `AddonManager` - the enable/disable flow against a running cluster

mod catalog;
mod lifecycle;

pub use catalog::{Addon, AddonCatalog, AddonFile};
pub use lifecycle::AddonManager;
