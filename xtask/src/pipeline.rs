//! Pipeline driver: platform gate, runtime stage, compiler stage.
//!
//! Stages never propagate errors. Each one logs its own failure and hands
//! back a [`StageResult`]; the driver keeps going and aggregates.

use crate::config::{BuildConfiguration, Operation, DEFAULT_ARCHIVER, DEFAULT_CARGO};
use crate::error::StageError;
use crate::platform::Platform;
use crate::process::CommandRunner;
use crate::tasks::publish::Publisher;
use crate::tasks::{compiler, runtime};
use crate::util::repo::Layout;
use std::fmt;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Runtime,
    Compiler(Operation),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Runtime => f.write_str("runtime build"),
            Stage::Compiler(op) => write!(f, "compiler {}", op.verb()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageResult {
    Success,
    Failure(String),
}

impl StageResult {
    pub fn is_success(&self) -> bool {
        matches!(self, StageResult::Success)
    }

    /// Log the outcome of a stage and collapse it to a result.
    pub fn from_outcome(stage: Stage, outcome: Result<(), StageError>) -> Self {
        match outcome {
            Ok(()) => {
                tracing::info!("[ok] {stage}");
                StageResult::Success
            }
            Err(e) => {
                tracing::error!("[fail] {stage}: {e}");
                StageResult::Failure(e.to_string())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStatus {
    Success,
    Failure,
}

impl From<PipelineStatus> for ExitCode {
    fn from(status: PipelineStatus) -> Self {
        match status {
            PipelineStatus::Success => ExitCode::SUCCESS,
            PipelineStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// What happened in one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub unsupported: bool,
    pub stages: Vec<(Stage, StageResult)>,
}

impl PipelineReport {
    pub fn status(&self) -> PipelineStatus {
        if !self.unsupported && self.stages.iter().all(|(_, r)| r.is_success()) {
            PipelineStatus::Success
        } else {
            PipelineStatus::Failure
        }
    }

    #[cfg(test)]
    pub fn ran(&self, stage: Stage) -> bool {
        self.stages.iter().any(|(s, _)| *s == stage)
    }
}

/// External tools the stages shell out to.
pub struct Toolchain<'a> {
    pub runner: &'a dyn CommandRunner,
    pub publisher: &'a dyn Publisher,
    pub cargo: &'a str,
    pub archiver: &'a str,
}

pub struct Pipeline<'a> {
    pub layout: Layout,
    pub platform: Platform,
    pub tools: Toolchain<'a>,
}

impl<'a> Pipeline<'a> {
    /// A pipeline using the default program names from `xtask.toml`.
    pub fn new(
        layout: Layout,
        platform: Platform,
        runner: &'a dyn CommandRunner,
        publisher: &'a dyn Publisher,
    ) -> Self {
        Self {
            layout,
            platform,
            tools: Toolchain {
                runner,
                publisher,
                cargo: DEFAULT_CARGO,
                archiver: DEFAULT_ARCHIVER,
            },
        }
    }

    pub fn with_programs(mut self, cargo: &'a str, archiver: &'a str) -> Self {
        self.tools.cargo = cargo;
        self.tools.archiver = archiver;
        self
    }

    pub fn run(&self, config: &BuildConfiguration) -> PipelineReport {
        let mut report = PipelineReport::default();

        if let Err(e) = self.platform.ensure_supported() {
            tracing::error!("{e}");
            report.unsupported = true;
            return report;
        }

        // run/test reuse whatever runtime library was published last
        if config.operation == Operation::Build {
            report
                .stages
                .push((Stage::Runtime, runtime::build(self, config)));
        }

        report.stages.push((
            Stage::Compiler(config.operation),
            compiler::build(self, config),
        ));

        for (stage, result) in &report.stages {
            match result {
                StageResult::Success => tracing::info!("  {stage}: ok"),
                StageResult::Failure(reason) => tracing::info!("  {stage}: FAILED ({reason})"),
            }
        }
        report
    }
}
