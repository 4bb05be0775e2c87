//! Remote session trait and batch file operations

use std::path::Path;

use log::{debug, info};

use crate::addons::Addon;
use crate::error::Result;

/// A scoped connection to a running host over which files are written and
/// deleted. Implementations release their underlying transport on drop, so a
/// session never outlives the operation that opened it.
pub trait RemoteSession {
    /// Write `content` to `target` on the remote host with the given
    /// permission bits, creating parent directories as needed.
    fn write_file(&mut self, content: &[u8], target: &Path, mode: u32) -> Result<()>;

    /// Remove `target` on the remote host. Removing a path that does not
    /// exist is a no-op, which keeps addon disablement idempotent.
    fn remove_file(&mut self, target: &Path) -> Result<()>;
}

/// Transfer every file of `addon` to the remote host, in catalog order.
///
/// Stops at the first failing file. Files written before the failure are left
/// in place; there is no rollback.
///
/// # Errors
///
/// Returns `Error::RemoteWrite` carrying the offending path.
pub fn transfer_addon(session: &mut dyn RemoteSession, addon: &Addon) -> Result<()> {
    for file in addon.files() {
        session.write_file(file.content(), file.target(), file.mode())?;
        debug!("Transferred '{}'", file.target().display());
    }
    info!(
        "Transferred {} file(s) for addon '{}'",
        addon.files().len(),
        addon.name()
    );
    Ok(())
}

/// Delete every file of `addon` from the remote host, in catalog order.
///
/// Stops at the first failing file. Already-absent files do not fail (see
/// [`RemoteSession::remove_file`]).
///
/// # Errors
///
/// Returns `Error::RemoteDelete` carrying the offending path.
pub fn delete_addon(session: &mut dyn RemoteSession, addon: &Addon) -> Result<()> {
    for file in addon.files() {
        session.remove_file(file.target())?;
        debug!("Deleted '{}'", file.target().display());
    }
    info!(
        "Deleted {} file(s) for addon '{}'",
        addon.files().len(),
        addon.name()
    );
    Ok(())
}
