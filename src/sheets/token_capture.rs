use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use google_sheets4::oauth2::storage::{TokenInfo, TokenStorage};
use tokio::sync::RwLock;

/// In-memory token storage that remembers the refresh token granted during
/// the installed-app consent flow, so it can be written to `token.json`.
#[derive(Debug, Clone, Default)]
pub struct RefreshTokenCapture {
    tokens: Arc<RwLock<HashMap<Vec<String>, TokenInfo>>>,
    refresh_token: Arc<RwLock<Option<String>>>,
}

fn scope_key(scopes: &[&str]) -> Vec<String> {
    let mut key: Vec<String> = scopes.iter().map(|scope| scope.to_string()).collect();
    key.sort();
    key.dedup();
    key
}

impl RefreshTokenCapture {
    pub async fn refresh_token(&self) -> Option<String> {
        self.refresh_token.read().await.clone()
    }
}

#[async_trait]
impl TokenStorage for RefreshTokenCapture {
    async fn set(&self, scopes: &[&str], token: TokenInfo) -> anyhow::Result<()> {
        if let Some(refresh_token) = &token.refresh_token {
            self.refresh_token.write().await.replace(refresh_token.clone());
        }
        self.tokens.write().await.insert(scope_key(scopes), token);
        Ok(())
    }

    async fn get(&self, scopes: &[&str]) -> Option<TokenInfo> {
        self.tokens.read().await.get(&scope_key(scopes)).cloned()
    }
}
