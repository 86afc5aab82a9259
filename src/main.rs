mod api;
mod app;
mod cli;
mod config;
mod error;
mod models;
mod output;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::sync::Arc;

use crate::api::{ApiClient, TemplateSource};
use crate::app::FetchCoordinator;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::Error;
use crate::ui::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.wants_help() {
        Cli::command().print_help()?;
        return Ok(());
    }

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut config = Config::load()?;
    cli.apply(&mut config);
    log::debug!("config: {:?}", config);

    let reporter = Reporter::new(cli.quiet);
    let client = Arc::new(ApiClient::new(config.clone())?);

    if cli.list {
        let catalog = client
            .fetch_catalog()
            .await
            .context("Failed to download choices")?;
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    reporter.status(&format!(
        "Downloading choices from @{}/{}",
        config.owner, config.repo
    ));

    let coordinator = FetchCoordinator::new(client, reporter);
    let summary = coordinator
        .run_and_save(&cli.templates, &config.output, cli.write_mode())
        .await
        .map_err(|e| match e {
            Error::Persist(_) => anyhow::Error::new(e)
                .context(format!("Failed to save content to {}", config.output.display())),
            other => anyhow::Error::new(other).context("Failed to download choices"),
        })?;

    reporter.summary(summary.success_count, &config.output);
    Ok(())
}
