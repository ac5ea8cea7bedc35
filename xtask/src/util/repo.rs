//! Where every build input and output lives.
//!
//! All paths derive from the project root and, for build outputs, the active
//! profile. Nothing here touches the filesystem.

use crate::config::Profile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Library the runtime crate produces (`crate-type = ["staticlib"]`).
pub const RUNTIME_LIBRARY: &str = "runtime.lib";
/// Runtime library merged with its system libraries.
pub const BUNDLED_LIBRARY: &str = "runtime_bundle.lib";
/// Name the compiler backend embeds from `bin_include/<tag>/`.
pub const PUBLISHED_LIBRARY: &str = "runtime.lib";

pub fn repo_root() -> Result<PathBuf> {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask is expected at <repo>/xtask")
}

#[derive(Clone, Debug)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Anchor the layout at `root`. A relative root is made absolute against
    /// the current directory now, since stages change directory before they
    /// touch any of these paths.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runtime_dir(&self) -> PathBuf {
        self.root.join("runtime")
    }

    pub fn compiler_dir(&self) -> PathBuf {
        self.root.join("compiler")
    }

    /// `runtime/target/<profile>`
    pub fn runtime_output_dir(&self, profile: Profile) -> PathBuf {
        self.runtime_dir().join("target").join(profile.dir_name())
    }

    pub fn runtime_library(&self, profile: Profile) -> PathBuf {
        self.runtime_output_dir(profile).join(RUNTIME_LIBRARY)
    }

    pub fn bundled_library(&self, profile: Profile) -> PathBuf {
        self.runtime_output_dir(profile).join(BUNDLED_LIBRARY)
    }

    /// Fixed location the compiler links the runtime from. Changing it means
    /// changing the compiler's `include_bytes!` paths too.
    pub fn published_library(&self, platform_tag: &str) -> PathBuf {
        self.compiler_dir()
            .join("src/backend/bin_include")
            .join(platform_tag)
            .join(PUBLISHED_LIBRARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_land_in_profile_dir() {
        let layout = Layout::new("/proj");
        for profile in [Profile::Debug, Profile::Release] {
            let dir = layout.runtime_output_dir(profile);
            assert_eq!(
                dir,
                layout.root().join("runtime/target").join(profile.dir_name())
            );
            assert_eq!(layout.runtime_library(profile).parent(), Some(dir.as_path()));
            assert_eq!(layout.bundled_library(profile).parent(), Some(dir.as_path()));
        }
    }

    #[test]
    fn test_profiles_never_share_outputs() {
        let layout = Layout::new("/proj");
        assert_ne!(
            layout.bundled_library(Profile::Debug),
            layout.bundled_library(Profile::Release)
        );
        assert!(layout
            .runtime_library(Profile::Release)
            .components()
            .all(|c| c.as_os_str() != "debug"));
    }

    #[test]
    fn test_published_path() {
        let layout = Layout::new("/proj");
        assert_eq!(
            layout.published_library("win64"),
            layout
                .root()
                .join("compiler/src/backend/bin_include/win64/runtime.lib")
        );
    }

    #[test]
    fn test_relative_root_is_anchored() {
        let layout = Layout::new(".");
        assert!(layout.root().is_absolute());
        assert!(layout.runtime_dir().is_absolute());
        assert!(layout.published_library("win64").is_absolute());
    }

    #[test]
    fn test_repo_root_is_parent_of_xtask() {
        let root = repo_root().unwrap();
        assert!(root.join("xtask").join("Cargo.toml").is_file());
    }
}
