//! Flattening of raw inspection responses into report rows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const SAMPLE_LIMIT: usize = 5;
const SAMPLE_SEPARATOR: &str = " | ";

/// One report row. String fields default to empty when the response omits
/// them. Counts are `None` only on error rows so those cells render empty
/// while normal rows render integers, zero included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    pub verdict: String,
    pub coverage_state: String,
    pub indexing_state: String,
    pub robots_txt_state: String,
    pub page_fetch_state: String,
    pub last_crawl_time: String,
    pub google_canonical: String,
    pub user_canonical: String,
    pub referring_urls_count: Option<u64>,
    pub referring_urls_sample: String,
    pub sitemap_count: Option<u64>,
    pub sitemaps_sample: String,
    pub error: Option<String>,
}

impl Record {
    /// Field names every row carries, in declaration order. `error` is not
    /// listed; it joins a report header only when some row set it.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "url",
        "verdict",
        "coverage_state",
        "indexing_state",
        "robots_txt_state",
        "page_fetch_state",
        "last_crawl_time",
        "google_canonical",
        "user_canonical",
        "referring_urls_count",
        "referring_urls_sample",
        "sitemap_count",
        "sitemaps_sample",
    ];

    /// Row for a URL whose inspection failed: ERROR verdict, every other
    /// field empty, failure text in `error`.
    pub fn from_api_error(url: &str, message: &str) -> Self {
        Self {
            url: url.to_string(),
            verdict: "ERROR".to_string(),
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Rendered cell for `field`. Absent optionals and unknown names render
    /// empty.
    pub fn cell(&self, field: &str) -> String {
        match field {
            "url" => self.url.clone(),
            "verdict" => self.verdict.clone(),
            "coverage_state" => self.coverage_state.clone(),
            "indexing_state" => self.indexing_state.clone(),
            "robots_txt_state" => self.robots_txt_state.clone(),
            "page_fetch_state" => self.page_fetch_state.clone(),
            "last_crawl_time" => self.last_crawl_time.clone(),
            "google_canonical" => self.google_canonical.clone(),
            "user_canonical" => self.user_canonical.clone(),
            "referring_urls_count" => self
                .referring_urls_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
            "referring_urls_sample" => self.referring_urls_sample.clone(),
            "sitemap_count" => self.sitemap_count.map(|n| n.to_string()).unwrap_or_default(),
            "sitemaps_sample" => self.sitemaps_sample.clone(),
            "error" => self.error.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Flatten the raw inspection response for `url` into a row. Total over any
/// input shape: missing or non-object steps collapse to defaults, never an
/// error.
pub fn extract_record(url: &str, result: &Value) -> Record {
    let idx = result
        .get("inspectionResult")
        .and_then(|v| v.get("indexStatusResult"));
    let text = |name: &str| {
        idx.and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let (referring_urls_count, referring_urls_sample) = summarize_list(idx, "referringUrls");
    let (sitemap_count, sitemaps_sample) = summarize_list(idx, "sitemaps");
    Record {
        url: url.to_string(),
        verdict: text("verdict"),
        coverage_state: text("coverageState"),
        indexing_state: text("indexingState"),
        robots_txt_state: text("robotsTxtState"),
        page_fetch_state: text("pageFetchState"),
        last_crawl_time: text("lastCrawlTime"),
        google_canonical: text("googleCanonical"),
        user_canonical: text("userCanonical"),
        referring_urls_count: Some(referring_urls_count),
        referring_urls_sample,
        sitemap_count: Some(sitemap_count),
        sitemaps_sample,
        error: None,
    }
}

/// Element count plus a display sample: the first five entries joined with
/// `" | "`. Absent or non-list values count as zero.
fn summarize_list(idx: Option<&Value>, name: &str) -> (u64, String) {
    let items = idx
        .and_then(|v| v.get(name))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let sample = items
        .iter()
        .take(SAMPLE_LIMIT)
        .map(|v| v.as_str().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(SAMPLE_SEPARATOR);
    (items.len() as u64, sample)
}
