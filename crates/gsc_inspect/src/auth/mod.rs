//! Installed-app OAuth flow for the Search Console API.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{read_application_secret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

/// Scope required by the URL Inspection API.
pub const WEBMASTERS_SCOPE: &str = "https://www.googleapis.com/auth/webmasters";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("client secret: {0}")]
    ClientSecret(std::io::Error),
    #[error("oauth flow: {0}")]
    Flow(String),
    #[error("token response carried no access token")]
    NoAccessToken,
}

/// Authenticated handle to the API. Built once per run via the interactive
/// browser flow; refreshes tokens on demand afterwards.
pub struct ServiceAuth {
    inner: DefaultAuthenticator,
    scopes: Vec<String>,
}

impl ServiceAuth {
    /// Read the client secret at `client_secret_path` and run the
    /// installed-app flow, binding the redirect listener to an ephemeral
    /// local port. Blocks until the operator completes authorization in the
    /// browser. With `token_cache_path` set, tokens are persisted there and
    /// later runs skip the browser round-trip.
    pub async fn authenticate(
        client_secret_path: &Path,
        scopes: &[&str],
        token_cache_path: Option<PathBuf>,
    ) -> Result<Self, AuthError> {
        let secret = read_application_secret(client_secret_path)
            .await
            .map_err(AuthError::ClientSecret)?;
        let mut builder =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect);
        if let Some(path) = token_cache_path {
            builder = builder.persist_tokens_to_disk(path);
        }
        let inner = builder
            .build()
            .await
            .map_err(|e| AuthError::Flow(e.to_string()))?;
        info!("oauth authenticator ready");
        Ok(Self {
            inner,
            scopes: scopes.iter().map(|s| (*s).to_string()).collect(),
        })
    }

    /// Current bearer token, refreshed by the underlying authenticator when
    /// expired.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let token = self
            .inner
            .token(&self.scopes)
            .await
            .map_err(|e| AuthError::Flow(e.to_string()))?;
        token
            .token()
            .map(str::to_string)
            .ok_or(AuthError::NoAccessToken)
    }
}
