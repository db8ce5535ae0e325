use std::path::PathBuf;

use clap::Parser;

use crate::config::app_config::ConfigOverrides;

/// Print every row of a Google Sheets sheet.
#[derive(Debug, Parser)]
#[command(name = "sheet-lister", version)]
pub struct Cli {
    /// Config file (defaults to an optional `Config.*` in the working directory).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Spreadsheet id or full docs.google.com URL.
    #[arg(long, value_name = "ID_OR_URL")]
    pub spreadsheet: Option<String>,

    /// Title of the sheet to list. Defaults to the first sheet.
    #[arg(long, value_name = "TITLE")]
    pub sheet: Option<String>,

    /// OAuth client secret file.
    #[arg(long, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Where the authorized-user token is cached.
    #[arg(long, value_name = "FILE")]
    pub token: Option<PathBuf>,

    /// Pad short rows with placeholders up to the sheet's column count.
    #[arg(long)]
    pub pad_missing: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            spreadsheet: self.spreadsheet.clone(),
            sheet: self.sheet.clone(),
            credentials_path: self.credentials.clone(),
            token_path: self.token.clone(),
        }
    }
}
