//! Error types for pipeline steps.
//!
//! Everything below the stage boundary returns one of these; stages turn them
//! into a [`crate::pipeline::StageResult`] instead of propagating.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command")]
    EmptyCommand,

    #[error("`{program}` not found in PATH: {source}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("source artifact missing: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to create {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {} -> {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
#[error("platform {os}-{arch} is not supported yet")]
pub struct PlatformUnsupported {
    pub os: String,
    pub arch: String,
}

/// A failed step inside a stage, tagged with what the stage was doing.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("cannot enter {}: {source}", .dir.display())]
    EnterDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed: {source}")]
    Process {
        step: &'static str,
        #[source]
        source: ProcessError,
    },

    #[error("publishing runtime library failed: {0}")]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Platform(#[from] PlatformUnsupported),
}

impl StageError {
    pub fn process(step: &'static str) -> impl FnOnce(ProcessError) -> Self {
        move |source| Self::Process { step, source }
    }
}
