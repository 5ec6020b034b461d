//! gsc_inspect — batch URL Inspection reports from Google Search Console.
//!
//! Authenticates once via the installed-app OAuth flow, inspects a configured
//! URL list one request at a time with a fixed throttle, and flattens each
//! nested response into a flat report row.

pub mod api;
pub mod auth;
pub mod batch;
pub mod config;
pub mod extract;
pub mod report;

pub use api::{InspectConfig, InspectError, Inspector};
pub use auth::{ServiceAuth, WEBMASTERS_SCOPE};
pub use batch::{run_batch, Inspect};
pub use config::{RunConfig, SiteProperty};
pub use extract::{extract_record, Record};
pub use report::ReportData;
