//! Concurrent reachability checks for derived feed URLs.

use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::clients::http::HttpTransport;
use crate::constants::intervals::FEED_CHECK_TIMEOUT;
use crate::models::{AnimeRecord, ValidationResult, ValidationSummary};

#[derive(Clone)]
pub struct FeedValidator {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl FeedValidator {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: FEED_CHECK_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A feed is valid when it answers 200 with an XML content type.
    ///
    /// Every failure, including a timeout, counts as invalid.
    pub async fn validate_feed(&self, url: &str) -> bool {
        let check = self.transport.probe(url, self.timeout);

        match tokio::time::timeout(self.timeout, check).await {
            Ok(Ok(response)) => {
                let valid = response.is_xml_feed();
                if !valid {
                    debug!(
                        "Feed {} answered {} ({})",
                        url,
                        response.status,
                        response.content_type.as_deref().unwrap_or("no content type")
                    );
                }
                valid
            }
            Ok(Err(e)) => {
                warn!("Error validating RSS feed {}: {}", url, e);
                false
            }
            Err(_) => {
                warn!("Validating RSS feed {} timed out after {:?}", url, self.timeout);
                false
            }
        }
    }

    /// Checks every URL concurrently and waits for all of them.
    ///
    /// Duplicate URLs are checked once.
    pub async fn validate_feeds<I, S>(&self, urls: I) -> ValidationResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<String> = urls
            .into_iter()
            .map(|url| url.as_ref().to_string())
            .filter(|url| seen.insert(url.clone()))
            .collect();

        debug!("Validating {} feeds", unique.len());

        let checks = unique.into_iter().map(|url| async move {
            let valid = self.validate_feed(&url).await;
            (url, valid)
        });

        join_all(checks).await.into_iter().collect()
    }

    /// Validates the feed URL of every record and summarizes the batch.
    pub async fn validate_records(
        &self,
        records: &[AnimeRecord],
    ) -> (ValidationResult, ValidationSummary) {
        let start = Instant::now();
        let urls = || records.iter().map(|r| r.feed_url.as_str());
        let results = self.validate_feeds(urls()).await;
        let summary = ValidationSummary::from_urls(urls(), &results, start.elapsed());

        info!(
            "Feed validation complete in {:.2}s: {}/{} valid",
            summary.elapsed.as_secs_f64(),
            summary.valid,
            summary.total
        );

        (results, summary)
    }
}
