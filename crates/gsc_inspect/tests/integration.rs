//! Integration tests using saved inspection response fixtures.

use gsc_inspect::{extract_record, run_batch, Inspect, InspectError, Record};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

fn load_fixture(name: &str) -> Value {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata");
    let full = root.join(name);
    let s =
        std::fs::read_to_string(&full).unwrap_or_else(|e| panic!("read {}: {}", full.display(), e));
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("parse {}: {}", name, e))
}

struct FixtureInspector(HashMap<String, Value>);

impl Inspect for FixtureInspector {
    async fn inspect(&self, url: &str) -> Result<Value, InspectError> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| InspectError::Api(429, "quota exceeded".to_string()))
    }
}

#[test]
fn integration_fixture_extracts_all_fields() {
    let doc = load_fixture("inspection_ok.json");
    let r = extract_record("https://www.example.com/page1", &doc);
    assert_eq!(r.verdict, "PASS");
    assert_eq!(r.coverage_state, "Submitted and indexed");
    assert_eq!(r.robots_txt_state, "ALLOWED");
    assert_eq!(r.indexing_state, "INDEXING_ALLOWED");
    assert_eq!(r.page_fetch_state, "SUCCESSFUL");
    assert_eq!(r.last_crawl_time, "2025-08-07T06:25:18Z");
    assert_eq!(r.google_canonical, "https://www.example.com/page1");
    assert_eq!(r.user_canonical, "https://www.example.com/page1");
    assert_eq!(r.referring_urls_count, Some(2));
    assert_eq!(
        r.referring_urls_sample,
        "https://www.example.com/ | https://www.example.com/blog"
    );
    assert_eq!(r.sitemap_count, Some(1));
    assert_eq!(r.sitemaps_sample, "https://www.example.com/sitemap.xml");
}

#[test]
fn integration_fixture_partial_defaults_to_empty() {
    let doc = load_fixture("inspection_partial.json");
    let r = extract_record("https://www.example.com/page2", &doc);
    assert_eq!(r.url, "https://www.example.com/page2");
    assert_eq!(r.verdict, "");
    assert_eq!(r.coverage_state, "");
    assert_eq!(r.referring_urls_count, Some(0));
    assert_eq!(r.sitemaps_sample, "");
}

#[tokio::test]
async fn integration_batch_over_fixtures() {
    let mut responses = HashMap::new();
    responses.insert(
        "https://www.example.com/page1".to_string(),
        load_fixture("inspection_ok.json"),
    );
    responses.insert(
        "https://www.example.com/page2".to_string(),
        load_fixture("inspection_partial.json"),
    );
    let urls = vec![
        "https://www.example.com/page1".to_string(),
        "https://www.example.com/page2".to_string(),
        "https://www.example.com/page3".to_string(),
    ];
    let records = run_batch(&FixtureInspector(responses), &urls, Duration::ZERO).await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].verdict, "PASS");
    assert_eq!(records[1].verdict, "");
    assert_eq!(records[2].verdict, "ERROR");
    assert_eq!(
        records[2].error.as_deref(),
        Some("status 429: quota exceeded")
    );
    let got: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(got, urls.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn integration_record_invariant_url_and_verdict() {
    let ok = extract_record("https://x.test/a", &load_fixture("inspection_ok.json"));
    let err = Record::from_api_error("https://x.test/b", "status 500: boom");
    for r in [&ok, &err] {
        assert!(!r.url.is_empty());
        assert!(!r.verdict.is_empty());
    }
}
