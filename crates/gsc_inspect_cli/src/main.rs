//! gsc-inspect CLI: authenticate, inspect a URL list, write the CSV report.

use clap::{ArgGroup, Parser};
use gsc_inspect::api::{InspectConfig, Inspector};
use gsc_inspect::auth::{ServiceAuth, WEBMASTERS_SCOPE};
use gsc_inspect::batch::run_batch;
use gsc_inspect::config::{ConfigError, RunConfig, SiteProperty};
use gsc_inspect::report::ReportData;
use gsc_inspect_report::write_report;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();
    let cli = Cli::parse();
    let config = build_config(cli)?;
    run(config)
}

#[derive(Parser)]
#[command(name = "gsc-inspect")]
#[command(about = "Batch URL Inspection reports from Google Search Console")]
#[command(group(
    ArgGroup::new("site")
        .required(true)
        .args(["domain", "url_prefix"]),
))]
struct Cli {
    /// OAuth client secret JSON for an installed app (Google Cloud console).
    #[arg(long, default_value = "client_secret.json")]
    client_secret: PathBuf,
    /// Domain property, e.g. example.com (sent as sc-domain:example.com).
    #[arg(long)]
    domain: Option<String>,
    /// URL-prefix property, e.g. https://www.example.com/.
    #[arg(long)]
    url_prefix: Option<String>,
    /// URL to inspect; repeat for each URL.
    #[arg(long = "url")]
    urls: Vec<String>,
    /// File with one URL per line; blank lines and # comments are skipped.
    #[arg(long)]
    urls_file: Option<PathBuf>,
    /// Destination CSV path (overwritten).
    #[arg(long, default_value = "gsc_url_inspection_report.csv")]
    out: PathBuf,
    /// Seconds to wait between API calls to stay inside quota.
    #[arg(long, default_value_t = 1.0)]
    sleep_seconds: f64,
    /// Persist OAuth tokens here to skip the browser flow on later runs.
    #[arg(long)]
    token_cache: Option<PathBuf>,
}

fn build_config(cli: Cli) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let site = if let Some(domain) = &cli.domain {
        SiteProperty::domain(domain)?
    } else if let Some(prefix) = &cli.url_prefix {
        SiteProperty::url_prefix(prefix)?
    } else {
        unreachable!("clap requires the site group")
    };
    let mut urls = cli.urls;
    if let Some(path) = &cli.urls_file {
        urls.extend(load_urls_file(path)?);
    }
    if urls.is_empty() {
        return Err(ConfigError::EmptyUrlList.into());
    }
    Ok(RunConfig {
        client_secret_path: cli.client_secret,
        token_cache_path: cli.token_cache,
        site,
        urls,
        out_path: cli.out,
        sleep: Duration::from_secs_f64(cli.sleep_seconds.max(0.0)),
    })
}

fn load_urls_file(path: &Path) -> std::io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn run(config: RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let auth = rt.block_on(ServiceAuth::authenticate(
        &config.client_secret_path,
        &[WEBMASTERS_SCOPE],
        config.token_cache_path.clone(),
    ))?;
    let inspector = Inspector::new(auth, &config.site, InspectConfig::default())?;
    info!(urls = config.urls.len(), site = %config.site.to_site_url(), "starting batch");
    let records = rt.block_on(run_batch(&inspector, &config.urls, config.sleep));
    let data = ReportData {
        site_url: config.site.to_site_url(),
        records,
    };
    write_report(&data, &config.out_path)?;
    info!(
        rows = data.records.len(),
        requests = inspector.request_count(),
        "report complete"
    );
    println!("\nWrote: {}", config.out_path.display());
    Ok(())
}
