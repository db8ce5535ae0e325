mod cli;
mod config;
mod listing;
mod sheets;

use std::io::BufWriter;

use clap::Parser;
use error_stack::ResultExt;
use thiserror::Error;

use crate::cli::Cli;
use crate::config::app_config::AppConfig;
use crate::listing::list_values::{list_values, ListOptions};
use crate::sheets::{
    auth::{authorize, InstalledAppBackend},
    http_client::http_client,
    spreadsheet_manager::SpreadsheetManager,
};

#[derive(Debug, Error)]
enum AppError {
    #[error("Failed to load configuration")]
    Config,
    #[error("Failed to authorize")]
    Authorization,
    #[error("Failed to list sheet values")]
    Listing,
}

async fn run(cli: Cli) -> error_stack::Result<(), AppError> {
    let config =
        AppConfig::load(cli.config.as_deref(), &cli.overrides()).change_context(AppError::Config)?;
    log::debug!("Loaded config: {:?}", config);

    let client = http_client();
    let auth = authorize(&InstalledAppBackend::new(client.clone()), &config.auth)
        .await
        .change_context(AppError::Authorization)?;

    let scopes = config.auth.scopes().into_iter().map(str::to_owned).collect();
    let manager =
        SpreadsheetManager::new(config.sheets.spreadsheet_id.clone(), client, auth, scopes);
    let options = ListOptions {
        sheet: config.sheets.sheet.as_deref().map(str::to_owned),
        pad_missing: cli.pad_missing,
    };

    let mut out = BufWriter::new(std::io::stdout().lock());
    list_values(&manager, &options, &mut out)
        .await
        .change_context(AppError::Listing)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(report) = run(cli).await {
        log::error!("{report:?}");
        std::process::exit(1);
    }
}
