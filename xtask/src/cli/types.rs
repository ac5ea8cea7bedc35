use crate::config::{BuildConfiguration, Operation, Profile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xtask")]
#[command(about = "Build the runtime library, publish it into the compiler, then build/run/test the compiler")]
pub struct Cli {
    /// What to do with the compiler. Only `build` rebuilds the runtime.
    #[arg(long, value_enum, default_value_t = Operation::Build)]
    pub op: Operation,

    /// Cargo profile for both the runtime and the compiler.
    #[arg(long = "build-type", value_enum, default_value_t = Profile::Debug)]
    pub build_type: Profile,

    /// Project root containing `runtime/` and `compiler/` (defaults to the xtask's parent).
    #[arg(long, env = "XTASK_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to `<root>/xtask.toml`).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log every command line and resolved path.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

impl Cli {
    pub fn build_configuration(&self) -> BuildConfiguration {
        BuildConfiguration {
            operation: self.op,
            profile: self.build_type,
        }
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Check that the toolchain and project directories are where the pipeline expects them.
    Doctor,

    /// Verify the compiler tree holds a published runtime library.
    Check,
}
