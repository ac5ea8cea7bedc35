use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod app;
mod cli;
mod config;
mod error;
mod pipeline;
mod platform;
mod process;
mod tasks;
mod util;

#[cfg(test)]
mod test_support;

fn main() -> Result<ExitCode> {
    let cli = crate::cli::Cli::parse();
    crate::app::run(cli)
}
