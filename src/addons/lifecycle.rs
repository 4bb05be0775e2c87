//! Addon enable/disable lifecycle

use log::info;

use crate::addons::catalog::AddonCatalog;
use crate::cluster::ControlPlane;
use crate::config::parse_bool;
use crate::error::{Error, Result};
use crate::remote::{delete_addon, transfer_addon};

/// Turns named addons on or off on a running cluster host.
///
/// The catalog and control plane are injected; the manager owns neither the
/// addon content nor the connection mechanics.
pub struct AddonManager {
    catalog: AddonCatalog,
    control_plane: Box<dyn ControlPlane>,
}

impl AddonManager {
    #[must_use]
    pub fn new(catalog: AddonCatalog, control_plane: Box<dyn ControlPlane>) -> Self {
        Self {
            catalog,
            control_plane,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &AddonCatalog {
        &self.catalog
    }

    /// Enable or disable an addon from a raw textual toggle value.
    ///
    /// `raw_value` must parse as a boolean (`true`/`false`/`1`/`0`/`t`/`f`,
    /// case-insensitive); anything else is rejected before any connection is
    /// made. The cluster must be confirmed running before a remote session is
    /// opened. Connection and session are released on every exit path.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidToggleValue` for an unparseable toggle value
    /// - `Error::ClusterNotRunning` when the readiness guard fails
    /// - `Error::UnknownAddon` for a name missing from the catalog
    /// - `Error::AddonEnable` / `Error::AddonDisable` wrapping any remote
    ///   failure, carrying the addon name
    pub fn set_addon(&self, name: &str, raw_value: &str) -> Result<()> {
        let enable = parse_bool(raw_value).ok_or_else(|| Error::InvalidToggleValue {
            addon: name.to_string(),
            value: raw_value.to_string(),
        })?;

        let mut conn = self.control_plane.connect()?;
        conn.ensure_running()?;

        let addon = self
            .catalog
            .get(name)
            .ok_or_else(|| Error::UnknownAddon(name.to_string()))?;

        let mut session = conn.open_session()?;
        let outcome = if enable {
            transfer_addon(session.as_mut(), addon)
        } else {
            delete_addon(session.as_mut(), addon)
        };

        match outcome {
            Ok(()) => {
                info!(
                    "{} addon '{name}'",
                    if enable { "Enabled" } else { "Disabled" }
                );
                Ok(())
            }
            Err(source) if enable => Err(Error::AddonEnable {
                addon: name.to_string(),
                source: Box::new(source),
            }),
            Err(source) => Err(Error::AddonDisable {
                addon: name.to_string(),
                source: Box::new(source),
            }),
        }
    }

    /// Shorthand for `set_addon(name, "true")`.
    pub fn enable(&self, name: &str) -> Result<()> {
        self.set_addon(name, "true")
    }

    /// Shorthand for `set_addon(name, "false")`.
    pub fn disable(&self, name: &str) -> Result<()> {
        self.set_addon(name, "false")
    }
}
