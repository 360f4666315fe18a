use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use peersense::cli::Cli;
use peersense::config::{load_config, validate_config, PeersenseConfig};
use peersense::errors::StartupError;
use peersense::model::{load_model, TreeEnsemble};
use peersense::observability::{init_logging, install_panic_hook};
use peersense::sheets::{Authenticator, CredentialProvider, SheetLocator, SheetsClient};
use peersense::tui::Session;

fn main() -> ExitCode {
    install_panic_hook();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.apply_overrides(load_config(cli.config.as_deref())?);
    if let Err(err) = init_logging(&cli.log_settings(&config)) {
        eprintln!("{} {:#}; continuing without logs", "warning:".yellow().bold(), err);
    }
    validate_config(&config)
        .map_err(|problems| StartupError::Configuration(problems.join("; ")))?;

    let (model, mut sheets) = prepare(&config)?;
    tracing::info!(
        model = %config.model.path.display(),
        classes = model.classes.len(),
        "startup complete"
    );

    let mut session = Session::new(config.advice.clone()).context("failed to open terminal")?;
    session.run(&mut sheets, &model)
}

/// Everything fatal happens here, before the terminal switches screens.
fn prepare(config: &PeersenseConfig) -> Result<(TreeEnsemble, SheetsClient), StartupError> {
    let model = load_model(&config.model.path)?;
    let key = config.credentials.source().load()?;
    let auth = Authenticator::new(key)?;
    let locator = SheetLocator::new(
        &config.sheet.url,
        config.sheet.worksheet.clone(),
        config.sheet.id_column.clone(),
    )
    .map_err(|err| StartupError::Configuration(err.to_string()))?;
    Ok((model, SheetsClient::new(locator, auth)))
}
