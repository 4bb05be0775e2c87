//! # vcman - VM Cluster Manager
//!
//! A library for managing a local VM-backed cluster's configuration and
//! addons: typed, validated settings in an in-memory store, and addon
//! enable/disable by pushing or removing file sets on the running VM over
//! SSH.
//!
//! ## Features
//!
//! - **Typed Settings**: Raw textual values are coerced into a tagged
//!   `ConfigValue` (string, integer, boolean) through per-setting setter
//!   chains
//! - **Aggregated Validation**: Every setter registered for a setting runs
//!   on each write; all failures are collected and reported together
//! - **Addon Lifecycle**: Enable or disable a named addon on a running VM;
//!   the cluster is confirmed running before any remote I/O
//! - **SSH Transport**: SFTP-backed file transfer/removal (feature `ssh`,
//!   on by default); the session seams are traits, so tests run without a
//!   host
//!
//! ## Writing Settings
//!
//! ```rust
//! use vcman::{ConfigStore, SettingsRegistry};
//!
//! let registry = SettingsRegistry::with_defaults();
//! let mut store = ConfigStore::new();
//!
//! registry.set(&mut store, "cpus", "4")?;
//! registry.set(&mut store, "verbose", "true")?;
//!
//! assert_eq!(store.get("cpus").and_then(|v| v.as_int()), Some(4));
//!
//! // A rejected write reports every failing setter at once
//! let err = registry.set(&mut store, "cpus", "many").unwrap_err();
//! assert!(err.is_validation());
//! # Ok::<(), vcman::Error>(())
//! ```
//!
//! ## Toggling Addons
//!
//! ```rust,no_run
//! use vcman::{AddonCatalog, AddonManager, SshControlPlane, SshTarget};
//!
//! let target = SshTarget::new("192.168.64.2", "docker", "tcuser");
//! let manager = AddonManager::new(
//!     AddonCatalog::with_defaults(),
//!     Box::new(SshControlPlane::new(target)),
//! );
//!
//! manager.set_addon("dashboard", "true")?;   // push the addon's files
//! manager.set_addon("dashboard", "false")?;  // remove them again
//! # Ok::<(), vcman::Error>(())
//! ```
//!
//! ## Custom Settings and Addons
//!
//! ```rust
//! use vcman::{set_int, require_positive, Setting, SettingsRegistry};
//!
//! let mut registry = SettingsRegistry::with_defaults();
//! registry.register(Setting::new(
//!     "node-port",
//!     vec![set_int(), require_positive()],
//! ));
//! ```

// Core modules
mod error;

// Grouped modules
pub mod addons;
pub mod cluster;
pub mod config;
pub mod remote;

// Re-exports from core
pub use error::{Error, Result, ValidationErrors};

// Re-exports from config
pub use config::{
    ConfigStore, ConfigValue, Setting, SettingsRegistry, SetterFn, apply_setting, matching,
    parse_bool, require_positive, set_bool, set_int, set_string,
};

// Re-exports from addons and cluster
pub use addons::{Addon, AddonCatalog, AddonFile, AddonManager};
pub use cluster::{ClusterConnection, ControlPlane};
pub use remote::{RemoteSession, delete_addon, transfer_addon};

// SSH re-exports (feature-gated)
#[cfg(feature = "ssh")]
pub use cluster::SshControlPlane;
#[cfg(feature = "ssh")]
pub use remote::{SshAuth, SshSession, SshTarget};
