//! Running external tools.
//!
//! Every toolchain call goes through a [`CommandRunner`] so nothing below the
//! stage level can abort the pipeline: launch failures and non-zero exits both
//! come back as a [`ProcessError`].

use crate::error::ProcessError;
use std::path::Path;
use std::process::Command;

pub trait CommandRunner {
    /// Run `command[0]` with the remaining arguments in `cwd` and wait for it.
    fn run(&self, command: &[String], cwd: &Path) -> Result<(), ProcessError>;
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &[String], cwd: &Path) -> Result<(), ProcessError> {
        let command = normalize(command);
        let (program, args) = command.split_first().ok_or(ProcessError::EmptyCommand)?;

        let resolved = which::which(program).map_err(|source| ProcessError::NotFound {
            program: program.clone(),
            source,
        })?;

        tracing::debug!("exec in {}: {}", cwd.display(), command.join(" "));
        let status = Command::new(resolved)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProcessError::Failed {
                program: program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Drop empty placeholder arguments (e.g. the profile flag for debug builds).
pub fn normalize(command: &[String]) -> Vec<String> {
    command
        .iter()
        .filter(|arg| !arg.trim().is_empty())
        .cloned()
        .collect()
}

/// Build an owned command line from string slices.
pub fn command_line<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}
