use std::{future::Future, io::Write, path::Path, pin::Pin, sync::Mutex};

use async_trait::async_trait;
use error_stack::{Result, ResultExt};
use google_sheets4::oauth2::{
    self, authenticator::Authenticator, authenticator_delegate::InstalledFlowDelegate,
};
use thiserror::Error;

use super::{
    credentials,
    http_client::{HttpClient, HttpsConnector},
    token_capture::RefreshTokenCapture,
};
use crate::config::auth_config::AuthConfig;

pub type SheetsAuthenticator = Authenticator<HttpsConnector>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to build an authenticator from the saved token")]
    FailedToUseSavedToken,
    #[error("Failed to read client secret file")]
    FailedToReadClientSecret,
    #[error("Interactive consent flow failed")]
    ConsentFlowFailed,
    #[error("Failed to save credentials")]
    FailedToSaveCredentials,
}

/// Result of an interactive consent.
pub struct Consent<A> {
    pub authenticator: A,
    pub refresh_token: Option<String>,
}

/// The OAuth library side of authorization.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    type Authenticator: Send;

    /// Builds an authenticator from a cached authorized-user token. Must not
    /// prompt the user.
    async fn from_saved_token(&self, token_path: &Path) -> Result<Self::Authenticator, AuthError>;

    /// Runs the installed-app consent flow for `scopes`.
    async fn run_consent_flow(
        &self,
        credentials_path: &Path,
        scopes: &[&str],
    ) -> Result<Consent<Self::Authenticator>, AuthError>;
}

/// Reuses `token.json` when it holds usable credentials, otherwise asks the
/// user for consent and caches the granted refresh token.
pub async fn authorize<B: AuthBackend>(
    backend: &B,
    config: &AuthConfig,
) -> Result<B::Authenticator, AuthError> {
    if credentials::load_saved_credentials(&config.token_path)
        .await
        .is_some()
    {
        match backend.from_saved_token(&config.token_path).await {
            Ok(authenticator) => {
                log::info!("Using saved credentials from {}", config.token_path.display());
                return Ok(authenticator);
            }
            Err(report) => {
                log::warn!("Saved credentials unusable, asking for consent again: {report:?}");
            }
        }
    }

    log::info!("No usable saved credentials, starting consent flow");
    let consent = backend
        .run_consent_flow(&config.credentials_path, &config.scopes())
        .await?;

    match &consent.refresh_token {
        Some(refresh_token) => {
            credentials::save_credentials(
                &config.credentials_path,
                &config.token_path,
                refresh_token,
            )
            .await
            .change_context(AuthError::FailedToSaveCredentials)?;
        }
        None => log::warn!("Consent flow returned no refresh token, nothing saved"),
    }

    Ok(consent.authenticator)
}

/// Shows the consent URL on `out` (stderr in practice) so stdout carries
/// nothing but the listing.
pub struct ConsentPrompt<W> {
    out: Mutex<W>,
}

impl ConsentPrompt<std::io::Stderr> {
    pub fn stderr() -> Self {
        ConsentPrompt {
            out: Mutex::new(std::io::stderr()),
        }
    }
}

impl<W: Write + Send> ConsentPrompt<W> {
    fn present(&self, url: &str, need_code: bool) -> std::result::Result<String, String> {
        // The HTTP redirect flow receives the code itself; pasting is never needed.
        if need_code {
            return Err("pasting an authorization code is not supported".to_owned());
        }
        log::debug!("Waiting for consent redirect");
        let mut out = self.out.lock().map_err(|e| e.to_string())?;
        writeln!(
            out,
            "Authorize this app by visiting this url:\n{}\nWaiting for the browser to redirect back...",
            url
        )
        .map_err(|e| e.to_string())?;
        Ok(String::new())
    }
}

impl<W: Write + Send> InstalledFlowDelegate for ConsentPrompt<W> {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        need_code: bool,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<String, String>> + Send + 'a>> {
        let presented = self.present(url, need_code);
        Box::pin(async move { presented })
    }
}

/// Backend built on the OAuth library bundled with `google-sheets4`.
pub struct InstalledAppBackend {
    client: HttpClient,
}

impl InstalledAppBackend {
    pub fn new(client: HttpClient) -> Self {
        InstalledAppBackend { client }
    }
}

#[async_trait]
impl AuthBackend for InstalledAppBackend {
    type Authenticator = SheetsAuthenticator;

    async fn from_saved_token(&self, token_path: &Path) -> Result<Self::Authenticator, AuthError> {
        let secret = oauth2::read_authorized_user_secret(token_path)
            .await
            .change_context(AuthError::FailedToUseSavedToken)
            .attach_printable_lazy(|| format!("path: {}", token_path.display()))?;

        oauth2::AuthorizedUserAuthenticator::with_client(secret, self.client.clone())
            .build()
            .await
            .change_context(AuthError::FailedToUseSavedToken)
    }

    async fn run_consent_flow(
        &self,
        credentials_path: &Path,
        scopes: &[&str],
    ) -> Result<Consent<Self::Authenticator>, AuthError> {
        let secret = oauth2::read_application_secret(credentials_path)
            .await
            .change_context(AuthError::FailedToReadClientSecret)
            .attach_printable_lazy(|| format!("path: {}", credentials_path.display()))?;

        let capture = RefreshTokenCapture::default();

        let authenticator = oauth2::InstalledFlowAuthenticator::with_client(
            secret,
            oauth2::InstalledFlowReturnMethod::HTTPRedirect,
            self.client.clone(),
        )
        .with_storage(Box::new(capture.clone()))
        .flow_delegate(Box::new(ConsentPrompt::stderr()))
        .build()
        .await
        .change_context(AuthError::ConsentFlowFailed)?;

        // Building is lazy; the first token request is what opens the consent page.
        authenticator
            .token(scopes)
            .await
            .change_context(AuthError::ConsentFlowFailed)?;

        Ok(Consent {
            authenticator,
            refresh_token: capture.refresh_token().await,
        })
    }
}
