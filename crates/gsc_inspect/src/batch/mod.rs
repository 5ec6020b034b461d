//! Sequential batch runner: inspect, flatten, throttle, accumulate.

use crate::api::InspectError;
use crate::extract::{extract_record, Record};
use std::time::Duration;
use tracing::debug;

/// Source of raw inspection documents. The live client implements this;
/// tests substitute canned responses.
#[allow(async_fn_in_trait)]
pub trait Inspect {
    async fn inspect(&self, url: &str) -> Result<serde_json::Value, InspectError>;
}

/// Inspect `urls` in order, one request at a time, sleeping `sleep` between
/// iterations. The throttle is unconditional and also runs after the last
/// URL. API failures become error rows and the run continues; nothing else
/// is caught.
pub async fn run_batch<I: Inspect>(inspector: &I, urls: &[String], sleep: Duration) -> Vec<Record> {
    let total = urls.len();
    let mut records = Vec::with_capacity(total);
    for (i, url) in urls.iter().enumerate() {
        match inspector.inspect(url).await {
            Ok(result) => {
                records.push(extract_record(url, &result));
                println!("[{}/{}] OK: {}", i + 1, total, url);
            }
            Err(e) => {
                records.push(Record::from_api_error(url, &e.to_string()));
                println!("[{}/{}] ERROR: {} -> {}", i + 1, total, url, e);
            }
        }
        debug!(done = i + 1, total, "batch progress");
        tokio::time::sleep(sleep).await;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    struct Fixture(HashMap<String, Value>);

    impl Inspect for Fixture {
        async fn inspect(&self, url: &str) -> Result<Value, InspectError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| InspectError::Api(429, "quota exceeded".to_string()))
        }
    }

    fn response(verdict: &str) -> Value {
        json!({
            "inspectionResult": {
                "indexStatusResult": { "verdict": verdict, "referringUrls": ["r1", "r2"] }
            }
        })
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let mut responses = HashMap::new();
        responses.insert("https://x.test/a".to_string(), response("PASS"));
        responses.insert("https://x.test/b".to_string(), response("NEUTRAL"));
        responses.insert("https://x.test/c".to_string(), response("FAIL"));
        let urls: Vec<String> = ["a", "b", "c"]
            .iter()
            .map(|p| format!("https://x.test/{}", p))
            .collect();
        let records = run_batch(&Fixture(responses), &urls, Duration::ZERO).await;
        assert_eq!(records.len(), 3);
        let verdicts: Vec<&str> = records.iter().map(|r| r.verdict.as_str()).collect();
        assert_eq!(verdicts, ["PASS", "NEUTRAL", "FAIL"]);
        let got: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(got, urls.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn batch_converts_api_error_to_row_and_continues() {
        let mut responses = HashMap::new();
        responses.insert("https://x.test/ok".to_string(), response("PASS"));
        let urls = vec![
            "https://x.test/missing".to_string(),
            "https://x.test/ok".to_string(),
        ];
        let records = run_batch(&Fixture(responses), &urls, Duration::ZERO).await;
        assert_eq!(records.len(), 2);
        let err = &records[0];
        assert_eq!(err.verdict, "ERROR");
        assert_eq!(err.coverage_state, "");
        assert_eq!(err.referring_urls_count, None);
        assert_eq!(err.error.as_deref(), Some("status 429: quota exceeded"));
        assert_eq!(records[1].verdict, "PASS");
        assert_eq!(records[1].error, None);
    }

    #[tokio::test]
    async fn batch_of_zero_urls_yields_no_records() {
        let records = run_batch(&Fixture(HashMap::new()), &[], Duration::ZERO).await;
        assert!(records.is_empty());
    }
}
