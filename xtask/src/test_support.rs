//! Recording doubles for the toolchain, plus the lock that serializes tests
//! touching the process working directory.

use crate::error::{ProcessError, PublishError};
use crate::process::{self, CommandRunner};
use crate::tasks::publish::Publisher;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

static CWD_LOCK: Mutex<()> = Mutex::new(());

pub fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
pub struct Call {
    pub command: Vec<String>,
    pub cwd: PathBuf,
    /// Process working directory at the time of the call.
    pub process_cwd: PathBuf,
}

/// Records every command; fails those whose program matches `fail_program`.
#[derive(Default)]
pub struct SpyRunner {
    calls: RefCell<Vec<Call>>,
    fail_program: Option<String>,
}

impl SpyRunner {
    pub fn failing(program: &str) -> Self {
        Self {
            calls: RefCell::default(),
            fail_program: Some(program.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.command[0].clone())
            .collect()
    }
}

impl CommandRunner for SpyRunner {
    fn run(&self, command: &[String], cwd: &Path) -> Result<(), ProcessError> {
        let command = process::normalize(command);
        let program = command.first().cloned().ok_or(ProcessError::EmptyCommand)?;
        self.calls.borrow_mut().push(Call {
            command,
            cwd: cwd.to_path_buf(),
            process_cwd: std::env::current_dir().unwrap_or_default(),
        });

        if self.fail_program.as_deref() == Some(program.as_str()) {
            return Err(ProcessError::Spawn {
                program,
                source: std::io::Error::other("simulated failure"),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SpyPublisher {
    copies: RefCell<Vec<(PathBuf, PathBuf)>>,
    fail: bool,
}

impl SpyPublisher {
    pub fn failing() -> Self {
        Self {
            copies: RefCell::default(),
            fail: true,
        }
    }

    pub fn copies(&self) -> Vec<(PathBuf, PathBuf)> {
        self.copies.borrow().clone()
    }
}

impl Publisher for SpyPublisher {
    fn publish(&self, source: &Path, destination: &Path) -> Result<(), PublishError> {
        self.copies
            .borrow_mut()
            .push((source.to_path_buf(), destination.to_path_buf()));
        if self.fail {
            return Err(PublishError::MissingSource(source.to_path_buf()));
        }
        Ok(())
    }
}

/// A throwaway project root with empty `runtime/` and `compiler/` trees.
pub fn project_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("runtime")).expect("runtime dir");
    std::fs::create_dir_all(dir.path().join("compiler")).expect("compiler dir");
    dir
}
