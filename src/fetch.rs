//! Client for the paginated speech-archive API.
//!
//! The archive answers POST requests with a page of `Items` and, while more
//! pages remain, a `LastEvaluatedKey` continuation cursor that the next
//! request echoes back as a query parameter.

use crate::data_model::SpeechRecord;
use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.millercenter.org/speeches";

#[derive(Deserialize, Debug)]
struct ArchivePage {
    #[serde(rename = "Items", default)]
    items: Vec<serde_json::Value>,
    #[serde(rename = "LastEvaluatedKey")]
    last_evaluated_key: Option<LastEvaluatedKey>,
}

#[derive(Deserialize, Debug)]
struct LastEvaluatedKey {
    doc_name: String,
}

/// Everything a completed fetch produced.
pub struct FetchOutcome {
    pub records: Vec<SpeechRecord>,
    /// Items that failed to decode and were skipped.
    pub skipped: u64,
    pub pages: u64,
}

pub struct SpeechArchiveClient {
    client: reqwest::Client,
    endpoint: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl SpeechArchiveClient {
    pub fn new(endpoint: impl Into<String>, max_attempts: u32, retry_delay: Duration) -> Self {
        SpeechArchiveClient {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    /// Requests one page, retrying transport failures with exponential
    /// backoff before giving up.
    async fn request_page(&self, cursor: Option<&str>) -> Result<ArchivePage> {
        let mut attempt = 0u32;
        loop {
            let mut request = self.client.post(&self.endpoint);
            if let Some(doc_name) = cursor {
                request = request.query(&[("LastEvaluatedKey", doc_name)]);
            }

            let outcome = async {
                let response = request.send().await?.error_for_status()?;
                response.json::<ArchivePage>().await
            }
            .await;

            match outcome {
                Ok(page) => return Ok(page),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(PipelineError::from(e));
                    }
                    let delay = self.retry_delay * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Speech archive request failed. Retrying in {:?}...",
                        delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// Walks the cursor chain until the archive stops returning a
    /// continuation key. `on_progress` is called with the running record
    /// count after each page.
    pub async fn fetch_all(&self, mut on_progress: impl FnMut(u64)) -> Result<FetchOutcome> {
        let mut records: Vec<SpeechRecord> = Vec::new();
        let mut skipped = 0u64;
        let mut pages = 0u64;
        let mut cursor: Option<String> = None;

        loop {
            let page = self.request_page(cursor.as_deref()).await?;
            pages += 1;

            for item in page.items {
                match serde_json::from_value::<SpeechRecord>(item.clone()) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        skipped += 1;
                        let doc_name = item
                            .get("doc_name")
                            .and_then(|v| v.as_str())
                            .unwrap_or("<unknown>");
                        warn!(doc_name, error = %e, "Skipping malformed archive item");
                    }
                }
            }
            on_progress(records.len() as u64);

            match page.last_evaluated_key {
                Some(key) => cursor = Some(key.doc_name),
                None => break,
            }
        }

        info!(
            records = records.len(),
            skipped, pages, "Finished fetching speech archive"
        );
        Ok(FetchOutcome {
            records,
            skipped,
            pages,
        })
    }
}
