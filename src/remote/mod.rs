//! Remote file operations against a running host
//!
//! - `RemoteSession` - the session seam file writes/deletes go through
//! - `transfer_addon` / `delete_addon` - ordered batch operations
//! - `SshSession` - the SFTP-backed implementation (feature `ssh`)

mod session;

#[cfg(feature = "ssh")]
mod ssh;

pub use session::{RemoteSession, delete_addon, transfer_addon};

#[cfg(feature = "ssh")]
pub use ssh::{SshAuth, SshSession, SshTarget};
