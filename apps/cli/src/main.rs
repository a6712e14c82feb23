use anyhow::Context;
use clap::Parser;
use mplan::kernel::config::{load_config, load_config_or_default};
use mplan_cli::AppConfig;
use mplan_cli::cli::Cli;
use mplan_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: AppConfig = match &cli.config {
        Some(path) => load_config(Some(path)),
        None => load_config_or_default(None::<&str>),
    }
    .context("Critical: Configuration is malformed")?;

    let _log = Logger::from_settings(env!("CARGO_BIN_NAME"), &cfg.logging)?;

    mplan_cli::run(&cli, &cfg, &mut std::io::stdout().lock())
}
