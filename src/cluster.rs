//! Control-plane connection and cluster readiness guard
//!
//! Addon operations only make sense against a running VM, so every toggle
//! goes through these seams: a `ControlPlane` hands out scoped
//! `ClusterConnection`s, and a connection must confirm the cluster is running
//! before it will open a remote session. Both are released on drop, on every
//! exit path.

use crate::error::Result;
use crate::remote::RemoteSession;

#[cfg(feature = "ssh")]
use crate::error::Error;
#[cfg(feature = "ssh")]
use crate::remote::SshTarget;

/// Hands out connections to the cluster's control plane.
pub trait ControlPlane {
    /// Open a connection scoped to one operation.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the control plane cannot be reached.
    fn connect(&self) -> Result<Box<dyn ClusterConnection>>;
}

/// A scoped control-plane connection.
pub trait ClusterConnection {
    /// Confirm the cluster is running.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClusterNotRunning` when it is not; callers decide
    /// whether to retry, surface, or abort.
    fn ensure_running(&mut self) -> Result<()>;

    /// Open a remote session against the cluster's active host.
    fn open_session(&mut self) -> Result<Box<dyn RemoteSession>>;
}

/// Control plane for a cluster reachable over SSH (feature `ssh`).
///
/// Readiness is probed as TCP reachability of the host's SSH port; a stopped
/// VM refuses the connection immediately.
#[cfg(feature = "ssh")]
#[derive(Debug, Clone)]
pub struct SshControlPlane {
    target: SshTarget,
}

#[cfg(feature = "ssh")]
impl SshControlPlane {
    #[must_use]
    pub fn new(target: SshTarget) -> Self {
        Self { target }
    }
}

#[cfg(feature = "ssh")]
impl ControlPlane for SshControlPlane {
    fn connect(&self) -> Result<Box<dyn ClusterConnection>> {
        Ok(Box::new(SshClusterConnection {
            target: self.target.clone(),
        }))
    }
}

#[cfg(feature = "ssh")]
struct SshClusterConnection {
    target: SshTarget,
}

#[cfg(feature = "ssh")]
impl ClusterConnection for SshClusterConnection {
    fn ensure_running(&mut self) -> Result<()> {
        self.target.probe().map_err(|e| {
            Error::ClusterNotRunning(format!("host {} is unreachable: {e}", self.target.addr()))
        })
    }

    fn open_session(&mut self) -> Result<Box<dyn RemoteSession>> {
        Ok(Box::new(self.target.connect()?))
    }
}
