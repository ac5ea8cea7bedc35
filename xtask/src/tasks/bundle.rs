//! Merging the runtime library with its system libraries.
//!
//! The compiler links a single `runtime.lib`, so everything the runtime needs
//! from the platform is archived into it up front.

use crate::error::ProcessError;
use crate::process::CommandRunner;
use std::path::{Path, PathBuf};

/// Ordered archiver inputs: the runtime's own library first, then the
/// platform's system libraries.
#[derive(Clone, Debug)]
pub struct LibraryManifest {
    primary: PathBuf,
    system: &'static [&'static str],
}

impl LibraryManifest {
    pub fn new(primary: impl Into<PathBuf>, system: &'static [&'static str]) -> Self {
        Self {
            primary: primary.into(),
            system,
        }
    }

    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn entries(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.primary.display().to_string())
            .chain(self.system.iter().map(|lib| (*lib).to_string()))
    }
}

/// `<archiver> /out:<output> <primary> <system libs...>`
pub fn archive_command(archiver: &str, manifest: &LibraryManifest, output: &Path) -> Vec<String> {
    let mut cmd = vec![archiver.to_string(), format!("/out:{}", output.display())];
    cmd.extend(manifest.entries());
    cmd
}

/// Run the archiver once. No retries.
pub fn combine(
    runner: &dyn CommandRunner,
    archiver: &str,
    manifest: &LibraryManifest,
    output: &Path,
    cwd: &Path,
) -> Result<(), ProcessError> {
    tracing::info!(
        "bundling {} with {} system libraries",
        manifest.primary().display(),
        manifest.system.len()
    );
    runner.run(&archive_command(archiver, manifest, output), cwd)
}
