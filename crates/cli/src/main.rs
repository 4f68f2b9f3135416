use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use storefront_observability::ObservabilityConfig;
use storefront_rbac::{Cli, load_table, resolve_config, run};

fn main() -> Result<ExitCode> {
    storefront_observability::init_with(&ObservabilityConfig::cli());

    let cli = Cli::parse();
    let config = resolve_config(&cli, |key| std::env::var(key).ok())?;

    let table = load_table(&cli, &config)?;
    let output = run(&table, &cli.command, Utc::now())?;

    if !output.text.is_empty() {
        println!("{}", output.text);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::info!(command = ?cli.command, "request denied");
        Ok(ExitCode::FAILURE)
    }
}
