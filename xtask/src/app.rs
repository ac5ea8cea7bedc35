use crate::cli::{Cli, Cmd};
use crate::config::{XtaskConfig, CONFIG_FILE};
use crate::pipeline::Pipeline;
use crate::platform::Platform;
use crate::process::SystemRunner;
use crate::tasks::publish::FsPublisher;
use crate::util::repo::Layout;
use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<ExitCode> {
    let root = match cli.root.clone() {
        Some(root) => std::path::absolute(&root)
            .with_context(|| format!("Resolving project root {}", root.display()))?,
        None => crate::util::repo::repo_root()?,
    };
    let config_path = cli.config.clone().unwrap_or_else(|| root.join(CONFIG_FILE));
    let config = XtaskConfig::load(&config_path)?;
    init_logging(cli.verbose || config.build.verbose);

    let layout = Layout::new(root);
    let platform = Platform::host();
    tracing::debug!("root: {}, platform: {platform}", layout.root().display());

    match cli.cmd {
        Some(Cmd::Doctor) => {
            crate::tasks::doctor::run(&layout, &platform, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Cmd::Check) => {
            crate::tasks::check::run(&layout, &platform)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let build = cli.build_configuration();
            tracing::info!(
                "{} ({}) in {}",
                build.operation.verb(),
                build.profile.dir_name(),
                layout.root().display()
            );

            let runner = SystemRunner;
            let publisher = FsPublisher;
            let pipeline = Pipeline::new(layout, platform, &runner, &publisher)
                .with_programs(&config.toolchain.cargo, &config.toolchain.archiver);
            Ok(pipeline.run(&build).status().into())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .without_time()
        .init();
}
