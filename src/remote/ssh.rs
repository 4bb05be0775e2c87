//! SSH-backed remote session (requires the `ssh` feature)
//!
//! File writes and deletes run over SFTP. The TCP stream, SSH session, and
//! SFTP channel are all owned by [`SshSession`] and torn down on drop.

use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use ssh2::{ErrorCode, OpenFlags, OpenType, Session, Sftp};

use crate::error::{Error, Result};
use crate::remote::RemoteSession;

/// Connection timeout for reachability probes and session setup.
const CONNECT_TIMEOUT_MS: u64 = 1500;

/// SFTP status code for a missing remote path.
const SFTP_NO_SUCH_FILE: i32 = 2;

/// Authentication method for an SSH target.
#[derive(Debug, Clone)]
pub enum SshAuth {
    Password(String),
    KeyFile(PathBuf),
}

/// Connection descriptor for a remote host.
#[derive(Debug, Clone)]
pub struct SshTarget {
    host: String,
    port: u16,
    username: String,
    auth: SshAuth,
    timeout: Duration,
}

impl SshTarget {
    /// Create a target with password authentication on the default SSH port.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            auth: SshAuth::Password(password.into()),
            timeout: Duration::from_millis(CONNECT_TIMEOUT_MS),
        }
    }

    /// Use a non-standard port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Authenticate with a private key file instead of a password.
    #[must_use]
    pub fn key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.auth = SshAuth::KeyFile(path.into());
        self
    }

    /// Override the connect timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port` form for messages.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| Error::Connection {
                host: self.addr(),
                source: e,
            })?
            .next()
            .ok_or_else(|| Error::Connection {
                host: self.addr(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "hostname did not resolve",
                ),
            })
    }

    /// Check that the host accepts TCP connections on the SSH port.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` when the host is unreachable.
    pub fn probe(&self) -> Result<()> {
        let addr = self.socket_addr()?;
        TcpStream::connect_timeout(&addr, self.timeout).map_err(|e| Error::Connection {
            host: self.addr(),
            source: e,
        })?;
        Ok(())
    }

    /// Open an authenticated SFTP session against the target.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` when the TCP connect fails and
    /// `Error::Session` for handshake, authentication, or SFTP failures.
    pub fn connect(&self) -> Result<SshSession> {
        let addr = self.socket_addr()?;
        let stream = TcpStream::connect_timeout(&addr, self.timeout).map_err(|e| {
            Error::Connection {
                host: self.addr(),
                source: e,
            }
        })?;
        let _ = stream.set_read_timeout(Some(self.timeout));
        let _ = stream.set_write_timeout(Some(self.timeout));

        let mut session = Session::new().map_err(|e| Error::Session(e.to_string()))?;
        session.set_tcp_stream(stream);
        session
            .handshake()
            .map_err(|e| Error::Session(format!("handshake with {} failed: {e}", self.addr())))?;

        match &self.auth {
            SshAuth::Password(password) => session
                .userauth_password(&self.username, password)
                .map_err(|e| Error::Session(format!("authentication failed: {e}")))?,
            SshAuth::KeyFile(path) => session
                .userauth_pubkey_file(&self.username, None, path, None)
                .map_err(|e| Error::Session(format!("authentication failed: {e}")))?,
        }

        let sftp = session
            .sftp()
            .map_err(|e| Error::Session(format!("failed to open SFTP channel: {e}")))?;
        debug!("Opened SSH session to {}", self.addr());

        Ok(SshSession {
            sftp,
            _session: session,
        })
    }
}

/// An authenticated SFTP session. Dropping it closes the channel, the SSH
/// session, and the underlying TCP stream.
pub struct SshSession {
    sftp: Sftp,
    _session: Session,
}

impl SshSession {
    fn ensure_parent_dirs(&self, target: &Path) {
        // Collect ancestors root-first; mkdir failures mean the directory
        // already exists or the write itself will fail with a better error.
        let mut ancestors: Vec<&Path> = target
            .ancestors()
            .skip(1)
            .take_while(|p| !p.as_os_str().is_empty() && *p != Path::new("/"))
            .collect();
        ancestors.reverse();
        for dir in ancestors {
            let _ = self.sftp.mkdir(dir, 0o755);
        }
    }
}

impl RemoteSession for SshSession {
    fn write_file(&mut self, content: &[u8], target: &Path, mode: u32) -> Result<()> {
        self.ensure_parent_dirs(target);

        let mut file = self
            .sftp
            .open_mode(
                target,
                OpenFlags::WRITE | OpenFlags::CREATE | OpenFlags::TRUNCATE,
                mode as i32,
                OpenType::File,
            )
            .map_err(|e| Error::RemoteWrite {
                path: target.to_path_buf(),
                reason: e.to_string(),
            })?;
        file.write_all(content).map_err(|e| Error::RemoteWrite {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn remove_file(&mut self, target: &Path) -> Result<()> {
        match self.sftp.unlink(target) {
            Ok(()) => Ok(()),
            // Absent paths are fine: disabling an addon twice is a no-op
            Err(e) if e.code() == ErrorCode::SFTP(SFTP_NO_SUCH_FILE) => {
                debug!("'{}' already absent, skipping", target.display());
                Ok(())
            }
            Err(e) => Err(Error::RemoteDelete {
                path: target.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}
