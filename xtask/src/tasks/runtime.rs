//! Runtime stage: `cargo build` the runtime, bundle it with its system
//! libraries, and publish the bundle into the compiler tree.

use super::bundle::{self, LibraryManifest};
use crate::config::BuildConfiguration;
use crate::error::StageError;
use crate::pipeline::{Pipeline, Stage, StageResult};
use crate::process::command_line;
use crate::util::workdir::with_working_dir;
use std::path::Path;

pub fn build(p: &Pipeline<'_>, config: &BuildConfiguration) -> StageResult {
    StageResult::from_outcome(Stage::Runtime, run_steps(p, config))
}

fn run_steps(p: &Pipeline<'_>, config: &BuildConfiguration) -> Result<(), StageError> {
    p.platform.ensure_supported()?;
    let dir = p.layout.runtime_dir();
    with_working_dir(&dir, || build_bundle_publish(p, config, &dir)).map_err(|source| {
        StageError::EnterDir {
            dir: dir.clone(),
            source,
        }
    })?
}

fn build_bundle_publish(
    p: &Pipeline<'_>,
    config: &BuildConfiguration,
    dir: &Path,
) -> Result<(), StageError> {
    let tag = p.platform.tag().unwrap_or_default();
    let profile = config.profile;

    tracing::info!("[step] cargo build ({}) in {}", profile.dir_name(), dir.display());
    p.tools
        .runner
        .run(
            &command_line([p.tools.cargo, "build", profile.cargo_flag()]),
            dir,
        )
        .map_err(StageError::process("runtime build"))?;

    let manifest = LibraryManifest::new(
        p.layout.runtime_library(profile),
        p.platform.system_libraries(),
    );
    let bundled = p.layout.bundled_library(profile);
    bundle::combine(p.tools.runner, p.tools.archiver, &manifest, &bundled, dir)
        .map_err(StageError::process("runtime bundling"))?;

    let published = p.layout.published_library(tag);
    tracing::info!(
        src = %bundled.display(),
        dst = %published.display(),
        "[step] publish runtime library"
    );
    p.tools.publisher.publish(&bundled, &published)?;

    Ok(())
}
