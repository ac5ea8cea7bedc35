//! Build configuration and `xtask.toml` support.
//!
//! `BuildConfiguration` is what the pipeline consumes. `XtaskConfig` is read
//! from `xtask.toml` at the project root and only names the external tools.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "xtask.toml";
pub const DEFAULT_CARGO: &str = "cargo";
pub const DEFAULT_ARCHIVER: &str = "lib.exe";

/// What to do with the compiler once the runtime is in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    #[default]
    Build,
    Run,
    Test,
}

impl Operation {
    /// The cargo subcommand for this operation.
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Build => "build",
            Operation::Run => "run",
            Operation::Test => "test",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    #[default]
    Debug,
    Release,
}

impl Profile {
    /// Name of the `target/` subdirectory cargo writes this profile to.
    pub fn dir_name(self) -> &'static str {
        match self {
            Profile::Debug => "debug",
            Profile::Release => "release",
        }
    }

    /// Extra cargo flag selecting this profile. Empty for the default profile.
    pub fn cargo_flag(self) -> &'static str {
        match self {
            Profile::Debug => "",
            Profile::Release => "--release",
        }
    }
}

/// Immutable input to one pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub operation: Operation,
    pub profile: Profile,
}

#[derive(Debug, Deserialize, Default)]
pub struct XtaskConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Deserialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_cargo")]
    pub cargo: String,

    #[serde(default = "default_archiver")]
    pub archiver: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        ToolchainConfig {
            cargo: default_cargo(),
            archiver: default_archiver(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub verbose: bool,
}

fn default_cargo() -> String {
    DEFAULT_CARGO.to_string()
}
fn default_archiver() -> String {
    DEFAULT_ARCHIVER.to_string()
}

impl XtaskConfig {
    /// Load config from `path` (or use defaults if the file doesn't exist).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(XtaskConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfiguration::default();
        assert_eq!(config.operation, Operation::Build);
        assert_eq!(config.profile, Profile::Debug);
    }

    #[test]
    fn test_operation_verbs() {
        assert_eq!(Operation::Build.verb(), "build");
        assert_eq!(Operation::Run.verb(), "run");
        assert_eq!(Operation::Test.verb(), "test");
    }

    #[test]
    fn test_profile_flags() {
        assert_eq!(Profile::Debug.cargo_flag(), "");
        assert_eq!(Profile::Release.cargo_flag(), "--release");
        assert_eq!(Profile::Debug.dir_name(), "debug");
        assert_eq!(Profile::Release.dir_name(), "release");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = XtaskConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.toolchain.cargo, DEFAULT_CARGO);
        assert_eq!(config.toolchain.archiver, DEFAULT_ARCHIVER);
        assert!(!config.build.verbose);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[toolchain]\narchiver = \"llvm-lib\"\n\n[build]\nverbose = true\n")
            .unwrap();

        let config = XtaskConfig::load(&path).unwrap();
        assert_eq!(config.toolchain.cargo, "cargo");
        assert_eq!(config.toolchain.archiver, "llvm-lib");
        assert!(config.build.verbose);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[toolchain\ncargo = ").unwrap();

        let err = XtaskConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }
}
