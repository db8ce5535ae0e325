use std::path::Path;

use error_stack::{report, Result, ResultExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AUTHORIZED_USER_TYPE: &str = "authorized_user";

/// Contents of `token.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUserRecord {
    #[serde(rename = "type")]
    pub key_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ClientKey {
    client_id: String,
    client_secret: String,
}

/// Contents of `credentials.json`. Desktop clients carry `installed`, web
/// clients carry `web`.
#[derive(Debug, Clone, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientKey>,
    web: Option<ClientKey>,
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Failed to read client secret file")]
    FailedToReadClientSecret,
    #[error("Client secret file is malformed")]
    MalformedClientSecret,
    #[error("Client secret file has neither an `installed` nor a `web` key")]
    MissingClientKey,
    #[error("Failed to write token file")]
    FailedToWriteToken,
}

/// Returns `None` on any failure: missing file, bad JSON, missing field.
pub async fn load_saved_credentials(token_path: &Path) -> Option<AuthorizedUserRecord> {
    let content = match tokio::fs::read(token_path).await {
        Ok(content) => content,
        Err(err) => {
            log::debug!("No saved token at {}: {}", token_path.display(), err);
            return None;
        }
    };

    match serde_json::from_slice::<AuthorizedUserRecord>(&content) {
        Ok(record) => Some(record),
        Err(err) => {
            log::warn!("Ignoring unreadable token at {}: {}", token_path.display(), err);
            None
        }
    }
}

/// Writes `token.json` from the client key in `credentials.json` and the
/// refresh token granted by the consent flow.
pub async fn save_credentials(
    credentials_path: &Path,
    token_path: &Path,
    refresh_token: &str,
) -> Result<AuthorizedUserRecord, CredentialsError> {
    let content = tokio::fs::read(credentials_path)
        .await
        .change_context(CredentialsError::FailedToReadClientSecret)
        .attach_printable_lazy(|| format!("path: {}", credentials_path.display()))?;

    let keys: ClientSecretFile = serde_json::from_slice(&content)
        .change_context(CredentialsError::MalformedClientSecret)
        .attach_printable_lazy(|| format!("path: {}", credentials_path.display()))?;

    let key = keys
        .installed
        .or(keys.web)
        .ok_or(report!(CredentialsError::MissingClientKey))?;

    let record = AuthorizedUserRecord {
        key_type: AUTHORIZED_USER_TYPE.to_owned(),
        client_id: key.client_id,
        client_secret: key.client_secret,
        refresh_token: refresh_token.to_owned(),
    };

    let payload =
        serde_json::to_vec(&record).change_context(CredentialsError::FailedToWriteToken)?;

    tokio::fs::write(token_path, payload)
        .await
        .change_context(CredentialsError::FailedToWriteToken)
        .attach_printable_lazy(|| format!("path: {}", token_path.display()))?;

    log::info!("Saved credentials to {}", token_path.display());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTALLED: &str = r#"{
        "installed": {
            "client_id": "installed-id.apps.googleusercontent.com",
            "project_id": "demo",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://oauth2.googleapis.com/token",
            "client_secret": "installed-secret",
            "redirect_uris": ["http://localhost"]
        }
    }"#;

    #[tokio::test]
    async fn test_load_missing_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_saved_credentials(&dir.path().join("token.json")).await, None);
    }

    #[tokio::test]
    async fn test_load_malformed_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "{\"type\": \"authorized_user\"").unwrap();
        assert_eq!(load_saved_credentials(&path).await, None);
    }

    #[tokio::test]
    async fn test_load_token_missing_field_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(
            &path,
            r#"{"type": "authorized_user", "client_id": "a", "client_secret": "b"}"#,
        )
        .unwrap();
        assert_eq!(load_saved_credentials(&path).await, None);
    }

    #[tokio::test]
    async fn test_save_then_load_installed_key() {
        let dir = tempfile::tempdir().unwrap();
        let credentials_path = dir.path().join("credentials.json");
        let token_path = dir.path().join("token.json");
        std::fs::write(&credentials_path, INSTALLED).unwrap();

        let saved = save_credentials(&credentials_path, &token_path, "refresh-1")
            .await
            .unwrap();
        let loaded = load_saved_credentials(&token_path).await;

        assert_eq!(loaded, Some(saved));

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&token_path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "type": "authorized_user",
                "client_id": "installed-id.apps.googleusercontent.com",
                "client_secret": "installed-secret",
                "refresh_token": "refresh-1",
            })
        );
    }

    #[tokio::test]
    async fn test_save_falls_back_to_web_key() {
        let dir = tempfile::tempdir().unwrap();
        let credentials_path = dir.path().join("credentials.json");
        let token_path = dir.path().join("token.json");
        std::fs::write(
            &credentials_path,
            r#"{"web": {"client_id": "web-id", "client_secret": "web-secret"}}"#,
        )
        .unwrap();

        let saved = save_credentials(&credentials_path, &token_path, "refresh-2")
            .await
            .unwrap();

        assert_eq!(saved.client_id, "web-id");
        assert_eq!(saved.client_secret, "web-secret");
        assert_eq!(saved.key_type, AUTHORIZED_USER_TYPE);
    }

    #[tokio::test]
    async fn test_save_without_client_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let credentials_path = dir.path().join("credentials.json");
        let token_path = dir.path().join("token.json");
        std::fs::write(&credentials_path, "{}").unwrap();

        let report = save_credentials(&credentials_path, &token_path, "refresh")
            .await
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            CredentialsError::MissingClientKey
        ));
        assert!(!token_path.exists());
    }

    #[tokio::test]
    async fn test_save_without_client_secret_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let report = save_credentials(
            &dir.path().join("credentials.json"),
            &dir.path().join("token.json"),
            "refresh",
        )
        .await
        .unwrap_err();

        assert!(matches!(
            report.current_context(),
            CredentialsError::FailedToReadClientSecret
        ));
    }
}
