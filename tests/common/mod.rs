//! Shared fixtures for integration tests
//!
//! Provides a recording mock of the control-plane/session seams so lifecycle
//! tests can assert exactly which remote operations ran, and whether every
//! opened session was released.

// Each integration test binary compiles its own copy of this module and not
// every test uses every fixture.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vcman::{ClusterConnection, ControlPlane, Error, RemoteSession, Result};

/// Initialize test logging once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One recorded remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOp {
    Write {
        path: PathBuf,
        content: Vec<u8>,
        mode: u32,
    },
    Remove {
        path: PathBuf,
    },
}

/// What a mock session does when asked to remove a path marked absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFilePolicy {
    /// Treat the removal as a no-op (the documented SSH backend behavior).
    #[default]
    Ignore,
    /// Fail with `Error::RemoteDelete`, modelling a stricter backend.
    Error,
}

/// Observable state shared between a test and its mock control plane.
#[derive(Default)]
pub struct ClusterLog {
    ops: Mutex<Vec<RemoteOp>>,
    sessions_opened: AtomicUsize,
    sessions_dropped: AtomicUsize,
}

impl ClusterLog {
    pub fn ops(&self) -> Vec<RemoteOp> {
        self.ops.lock().expect("ops lock").clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    /// True when every opened session has been dropped.
    pub fn all_sessions_released(&self) -> bool {
        self.sessions_opened.load(Ordering::SeqCst) == self.sessions_dropped.load(Ordering::SeqCst)
    }
}

/// Mock control plane whose connections hand out recording sessions.
pub struct MockControlPlane {
    pub log: Arc<ClusterLog>,
    running: bool,
    fail_write_on: Option<PathBuf>,
    absent_paths: HashSet<PathBuf>,
    missing_policy: MissingFilePolicy,
}

impl MockControlPlane {
    /// A running cluster with no scripted failures.
    pub fn running() -> Self {
        Self {
            log: Arc::new(ClusterLog::default()),
            running: true,
            fail_write_on: None,
            absent_paths: HashSet::new(),
            missing_policy: MissingFilePolicy::default(),
        }
    }

    /// A cluster whose readiness guard fails.
    pub fn stopped() -> Self {
        Self {
            running: false,
            ..Self::running()
        }
    }

    /// Make writes to `path` fail.
    pub fn fail_write_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_write_on = Some(path.into());
        self
    }

    /// Mark `path` as not present on the host.
    pub fn absent(mut self, path: impl Into<PathBuf>) -> Self {
        self.absent_paths.insert(path.into());
        self
    }

    /// Choose how removals of absent paths behave.
    pub fn missing_policy(mut self, policy: MissingFilePolicy) -> Self {
        self.missing_policy = policy;
        self
    }
}

impl ControlPlane for MockControlPlane {
    fn connect(&self) -> Result<Box<dyn ClusterConnection>> {
        Ok(Box::new(MockConnection {
            log: Arc::clone(&self.log),
            running: self.running,
            fail_write_on: self.fail_write_on.clone(),
            absent_paths: self.absent_paths.clone(),
            missing_policy: self.missing_policy,
        }))
    }
}

struct MockConnection {
    log: Arc<ClusterLog>,
    running: bool,
    fail_write_on: Option<PathBuf>,
    absent_paths: HashSet<PathBuf>,
    missing_policy: MissingFilePolicy,
}

impl ClusterConnection for MockConnection {
    fn ensure_running(&mut self) -> Result<()> {
        if self.running {
            Ok(())
        } else {
            Err(Error::ClusterNotRunning("vm is stopped".into()))
        }
    }

    fn open_session(&mut self) -> Result<Box<dyn RemoteSession>> {
        self.log.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSession {
            log: Arc::clone(&self.log),
            fail_write_on: self.fail_write_on.clone(),
            absent_paths: self.absent_paths.clone(),
            missing_policy: self.missing_policy,
        }))
    }
}

/// Session that records every operation into the shared [`ClusterLog`].
pub struct RecordingSession {
    log: Arc<ClusterLog>,
    fail_write_on: Option<PathBuf>,
    absent_paths: HashSet<PathBuf>,
    missing_policy: MissingFilePolicy,
}

impl RemoteSession for RecordingSession {
    fn write_file(&mut self, content: &[u8], target: &Path, mode: u32) -> Result<()> {
        if self.fail_write_on.as_deref() == Some(target) {
            return Err(Error::RemoteWrite {
                path: target.to_path_buf(),
                reason: "no space left on device".into(),
            });
        }
        self.log.ops.lock().expect("ops lock").push(RemoteOp::Write {
            path: target.to_path_buf(),
            content: content.to_vec(),
            mode,
        });
        Ok(())
    }

    fn remove_file(&mut self, target: &Path) -> Result<()> {
        if self.absent_paths.contains(target) {
            match self.missing_policy {
                MissingFilePolicy::Ignore => return Ok(()),
                MissingFilePolicy::Error => {
                    return Err(Error::RemoteDelete {
                        path: target.to_path_buf(),
                        reason: "no such file".into(),
                    });
                }
            }
        }
        self.log
            .ops
            .lock()
            .expect("ops lock")
            .push(RemoteOp::Remove {
                path: target.to_path_buf(),
            });
        Ok(())
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        self.log.sessions_dropped.fetch_add(1, Ordering::SeqCst);
    }
}
