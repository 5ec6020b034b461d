//! Run configuration: site property selection and per-run settings.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid domain property: {0}")]
    InvalidDomain(String),
    #[error("invalid url-prefix property {0}: {1}")]
    InvalidUrlPrefix(String, String),
    #[error("no urls to inspect")]
    EmptyUrlList,
}

/// The verified Search Console property the inspection is scoped to.
/// Exactly one variant applies per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteProperty {
    /// Domain property, sent to the API as `sc-domain:example.com`.
    Domain(String),
    /// URL-prefix property, sent verbatim, e.g. `https://www.example.com/`.
    UrlPrefix(String),
}

impl SiteProperty {
    /// Domain property from a bare name. Accepts an `sc-domain:` prefix and
    /// strips it; rejects anything that looks like a URL.
    pub fn domain(name: &str) -> Result<Self, ConfigError> {
        let name = name.trim();
        let name = name.strip_prefix("sc-domain:").unwrap_or(name);
        if name.is_empty() || name.contains("://") || name.contains('/') {
            return Err(ConfigError::InvalidDomain(name.to_string()));
        }
        Ok(Self::Domain(name.to_string()))
    }

    /// URL-prefix property; must parse as an absolute URL.
    pub fn url_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(prefix.trim())
            .map_err(|e| ConfigError::InvalidUrlPrefix(prefix.to_string(), e.to_string()))?;
        Ok(Self::UrlPrefix(parsed.to_string()))
    }

    /// The `siteUrl` value the API expects.
    pub fn to_site_url(&self) -> String {
        match self {
            Self::Domain(d) => format!("sc-domain:{}", d),
            Self::UrlPrefix(p) => p.clone(),
        }
    }
}

/// Everything one batch run needs. Built by the CLI and passed down; no
/// module-level globals.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub client_secret_path: PathBuf,
    pub token_cache_path: Option<PathBuf>,
    pub site: SiteProperty,
    pub urls: Vec<String>,
    pub out_path: PathBuf,
    pub sleep: Duration,
}
