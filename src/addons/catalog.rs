//! Addon file-set catalog
//!
//! An addon is a named bundle of files placed on (or removed from) a running
//! host. The catalog is read-only lookup data; validating that a requested
//! addon exists happens in the lifecycle layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DASHBOARD_DEPLOYMENT: &str = include_str!("files/dashboard-deployment.yaml");
const DASHBOARD_SERVICE: &str = include_str!("files/dashboard-service.yaml");
const DNS_DEPLOYMENT: &str = include_str!("files/dns-deployment.yaml");

/// Default permission bits for addon manifests on the host.
const DEFAULT_FILE_MODE: u32 = 0o640;

/// One file belonging to an addon: embedded content, target path on the
/// remote host, and permission bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonFile {
    content: Vec<u8>,
    target: PathBuf,
    mode: u32,
}

impl AddonFile {
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>, target: impl Into<PathBuf>, mode: u32) -> Self {
        Self {
            content: content.into(),
            target: target.into(),
            mode,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    #[must_use]
    pub fn mode(&self) -> u32 {
        self.mode
    }
}

/// A named, ordered bundle of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addon {
    name: String,
    files: Vec<AddonFile>,
}

impl Addon {
    #[must_use]
    pub fn new(name: impl Into<String>, files: Vec<AddonFile>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Files in transfer order.
    #[must_use]
    pub fn files(&self) -> &[AddonFile] {
        &self.files
    }
}

/// Read-only mapping from addon name to its file set.
#[derive(Debug, Default)]
pub struct AddonCatalog {
    addons: HashMap<String, Addon>,
}

impl AddonCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog containing the stock addons.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.insert(Addon::new(
            "dashboard",
            vec![
                AddonFile::new(
                    DASHBOARD_DEPLOYMENT,
                    "/var/lib/vcman/addons/dashboard-deployment.yaml",
                    DEFAULT_FILE_MODE,
                ),
                AddonFile::new(
                    DASHBOARD_SERVICE,
                    "/var/lib/vcman/addons/dashboard-service.yaml",
                    DEFAULT_FILE_MODE,
                ),
            ],
        ));
        catalog.insert(Addon::new(
            "dns",
            vec![AddonFile::new(
                DNS_DEPLOYMENT,
                "/var/lib/vcman/addons/dns-deployment.yaml",
                DEFAULT_FILE_MODE,
            )],
        ));
        catalog
    }

    /// Add an addon to the catalog, replacing any existing entry by that name.
    pub fn insert(&mut self, addon: Addon) {
        self.addons.insert(addon.name().to_string(), addon);
    }

    /// Look up an addon by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Addon> {
        self.addons.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.addons.contains_key(name)
    }

    /// Names of all known addons (unordered).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.addons.keys().map(String::as_str).collect()
    }
}
