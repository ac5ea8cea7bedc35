//! Compiler stage: `cargo build|run|test` in the compiler crate.
//!
//! Relies on the runtime stage (this run or an earlier one) having published
//! the runtime library where the compiler's backend embeds it from.

use crate::config::{BuildConfiguration, Operation};
use crate::error::StageError;
use crate::pipeline::{Pipeline, Stage, StageResult};
use crate::process::command_line;
use crate::util::workdir::with_working_dir;
use std::path::Path;

pub fn build(p: &Pipeline<'_>, config: &BuildConfiguration) -> StageResult {
    StageResult::from_outcome(Stage::Compiler(config.operation), run_steps(p, config))
}

fn run_steps(p: &Pipeline<'_>, config: &BuildConfiguration) -> Result<(), StageError> {
    let dir = p.layout.compiler_dir();
    with_working_dir(&dir, || invoke_cargo(p, config, &dir)).map_err(|source| {
        StageError::EnterDir {
            dir: dir.clone(),
            source,
        }
    })?
}

fn invoke_cargo(p: &Pipeline<'_>, config: &BuildConfiguration, dir: &Path) -> Result<(), StageError> {
    let step = match config.operation {
        Operation::Build => "building the compiler",
        Operation::Run => "running the compiler",
        Operation::Test => "testing the compiler",
    };
    tracing::info!(
        "[step] cargo {} in {}",
        config.operation.verb(),
        dir.display()
    );

    p.tools
        .runner
        .run(
            &command_line([
                p.tools.cargo,
                config.operation.verb(),
                config.profile.cargo_flag(),
            ]),
            dir,
        )
        .map_err(StageError::process(step))
}
