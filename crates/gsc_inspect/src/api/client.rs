//! One-endpoint client for `urlInspection/index:inspect`.

use crate::auth::{AuthError, ServiceAuth};
use crate::config::SiteProperty;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_ENDPOINT: &str =
    "https://searchconsole.googleapis.com/v1/urlInspection/index:inspect";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct InspectConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Per-request failure surfaced to the batch runner, which converts it into
/// an error row. Anything outside this enum aborts the whole run.
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("status {0}: {1}")]
    Api(u16, String),
    #[error("auth: {0}")]
    Auth(#[from] AuthError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectRequest<'a> {
    inspection_url: &'a str,
    site_url: &'a str,
}

/// Synchronous-per-call inspection client. One request per URL, no retry;
/// the batch throttle is the only pacing.
pub struct Inspector {
    config: InspectConfig,
    client: reqwest::Client,
    auth: ServiceAuth,
    site_url: String,
    request_count: AtomicU64,
}

impl Inspector {
    pub fn new(
        auth: ServiceAuth,
        site: &SiteProperty,
        config: InspectConfig,
    ) -> Result<Self, InspectError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client,
            auth,
            site_url: site.to_site_url(),
            request_count: AtomicU64::new(0),
        })
    }

    /// Inspect one URL and return the raw response document; the caller
    /// flattens it. Non-2xx responses become `InspectError::Api` with the
    /// message pulled from the standard error body.
    pub async fn inspect(&self, url: &str) -> Result<serde_json::Value, InspectError> {
        let token = self.auth.access_token().await?;
        let body = InspectRequest {
            inspection_url: url,
            site_url: &self.site_url,
        };
        debug!(url, site = %self.site_url, "inspect");
        let res = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        // Issued requests, error responses included; reported at end of run.
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(InspectError::Api(
                status.as_u16(),
                api_error_message(&text),
            ));
        }
        Ok(parse_document(url, &text))
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }
}

impl crate::batch::Inspect for Inspector {
    async fn inspect(&self, url: &str) -> Result<serde_json::Value, InspectError> {
        Inspector::inspect(self, url).await
    }
}

/// Parse a 2xx body. A non-JSON body degrades to an empty document so the
/// row still renders with defaults instead of aborting the run.
fn parse_document(url: &str, body: &str) -> serde_json::Value {
    match serde_json::from_str(body) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(url, error = %e, "response body is not json, using empty document");
            serde_json::Value::Null
        }
    }
}

/// Pull the human-readable message out of a Google error body; fall back to
/// the raw text when the body is not the standard shape.
fn api_error_message(body: &str) -> String {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    parsed
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}
