//! Scoped changes of the process working directory.
//!
//! The working directory is process-global. Every stage that needs a
//! different one goes through [`WorkingDirGuard`] so the previous directory is
//! back in place on every exit path, including early returns and panics.
//! This only holds while a single pipeline runs per process.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

#[must_use = "the previous directory is restored when the guard is dropped"]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        tracing::debug!("cd {}", dir.display());
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            tracing::warn!(
                "could not restore working directory {}: {e}",
                self.previous.display()
            );
        }
    }
}

/// Run `f` with `dir` as the working directory.
pub fn with_working_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> io::Result<T> {
    let _guard = WorkingDirGuard::enter(dir)?;
    Ok(f())
}
