//! Copying the bundled runtime into the compiler tree.
//!
//! Plain overwrite, no rename dance: an interrupted copy can leave a truncated
//! file behind, but the error is always reported.

use crate::error::PublishError;
use std::fs;
use std::path::Path;

pub trait Publisher {
    fn publish(&self, source: &Path, destination: &Path) -> Result<(), PublishError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FsPublisher;

impl Publisher for FsPublisher {
    fn publish(&self, source: &Path, destination: &Path) -> Result<(), PublishError> {
        if !source.is_file() {
            return Err(PublishError::MissingSource(source.to_path_buf()));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| PublishError::CreateDir {
                dir: parent.to_path_buf(),
                source,
            })?;
        }

        let bytes = fs::copy(source, destination).map_err(|e| PublishError::Copy {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("copied {bytes} bytes to {}", destination.display());
        Ok(())
    }
}
