use std::path::PathBuf;

pub const SPREADSHEETS_READONLY_SCOPE: &str =
    "https://www.googleapis.com/auth/spreadsheets.readonly";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AuthConfig {
    /// OAuth client file downloaded from the cloud console.
    pub credentials_path: PathBuf,
    /// Cached authorized-user token, written after the first consent.
    pub token_path: PathBuf,
    pub scopes: Vec<Box<str>>,
}

impl AuthConfig {
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes.iter().map(AsRef::as_ref).collect()
    }
}
