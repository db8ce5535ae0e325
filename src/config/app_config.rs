use std::path::{Path, PathBuf};

use ::config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, Map};
use error_stack::{Result, ResultExt};
use thiserror::Error;

use super::{
    auth_config::{AuthConfig, SPREADSHEETS_READONLY_SCOPE},
    sheets_config::SpreadsheetConfig,
};

pub const DEFAULT_CONFIG_FILE: &str = "Config";
pub const DEFAULT_SPREADSHEET_ID: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
pub const ENV_PREFIX: &str = "SHEET_LISTER";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub auth: AuthConfig,
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub spreadsheet: Option<String>,
    pub sheet: Option<String>,
    pub credentials_path: Option<PathBuf>,
    pub token_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Invalid default or override value")]
    InvalidValue,
    #[error("Error reading config sources")]
    FailedToBuild,
    #[error("Config does not match the expected shape")]
    FailedToDeserialize,
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|path| path.to_string_lossy().into_owned())
}

impl AppConfig {
    /// Layers built-in defaults, the config file, `SHEET_LISTER__*`
    /// environment variables and finally `overrides`.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<AppConfig, AppConfigError> {
        Self::load_from(config_file, overrides, None)
    }

    /// Like `load`, reading variables from `env` instead of the process
    /// environment when given.
    fn load_from(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
        env: Option<Map<String, String>>,
    ) -> Result<AppConfig, AppConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(" ")
            .with_list_parse_key("auth.scopes")
            .try_parsing(true)
            .source(env);

        Self::builder_with_defaults()?
            .add_source(file)
            .add_source(environment)
            .set_override_option("sheets.spreadsheet_id", overrides.spreadsheet.clone())
            .and_then(|builder| builder.set_override_option("sheets.sheet", overrides.sheet.clone()))
            .and_then(|builder| {
                builder.set_override_option(
                    "auth.credentials_path",
                    path_value(&overrides.credentials_path),
                )
            })
            .and_then(|builder| {
                builder.set_override_option("auth.token_path", path_value(&overrides.token_path))
            })
            .change_context(AppConfigError::InvalidValue)?
            .build()
            .change_context(AppConfigError::FailedToBuild)
            .attach_printable_lazy(|| match config_file {
                Some(path) => format!("config file: {}", path.display()),
                None => format!("config file: {DEFAULT_CONFIG_FILE} (optional)"),
            })?
            .try_deserialize()
            .change_context(AppConfigError::FailedToDeserialize)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, AppConfigError> {
        Config::builder()
            .set_default("sheets.spreadsheet_id", DEFAULT_SPREADSHEET_ID)
            .and_then(|builder| builder.set_default("auth.credentials_path", "credentials.json"))
            .and_then(|builder| builder.set_default("auth.token_path", "token.json"))
            .and_then(|builder| {
                builder.set_default("auth.scopes", vec![SPREADSHEETS_READONLY_SCOPE])
            })
            .change_context(AppConfigError::InvalidValue)
    }
}
