// GamePix v2 feed client: the scheduler's single outbound dependency.
//
// Failures are classified but never fatal; the scheduler maps every error
// here to an empty selection.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::config::FeedConfig;
use crate::metrics;

/// Outbound request timeout, matching the site's fetch policy.
const FEED_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "GameHub/1.0";

/// One game as the feed reports it. Every field the feed is allowed to omit
/// or garble is optional here; records are validated during selection, not
/// during decoding, so one bad record never poisons the page.
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Absent scores decode as 0.0 and never pass a positive threshold.
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub date_modified: Option<String>,
}

/// One page of feed results. `items` is required: a response without it is a
/// malformed feed, not an empty catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPage {
    pub items: Vec<GameRecord>,
}

/// Why a feed fetch produced no data.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("feed response malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FeedError {
    /// Metric label for this failure class.
    fn outcome_label(&self) -> &'static str {
        match self {
            FeedError::Http(_) => "http_error",
            FeedError::Status(_) => "bad_status",
            FeedError::Malformed(_) => "malformed",
        }
    }
}

/// HTTP client for the quality-ordered game feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FEED_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");
        Self { http, config }
    }

    /// Fetch page 1 of the feed, ordered by the feed's own quality ranking.
    pub async fn fetch_quality_page(&self) -> Result<FeedPage, FeedError> {
        let started = Instant::now();
        let result = self.fetch_inner().await;
        metrics::FEED_FETCH_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(page) => {
                metrics::FEED_REQUESTS_TOTAL.with_label_values(&["ok"]).inc();
                tracing::debug!("feed returned {} candidate games", page.items.len());
            }
            Err(e) => {
                metrics::FEED_REQUESTS_TOTAL
                    .with_label_values(&[e.outcome_label()])
                    .inc();
            }
        }
        result
    }

    async fn fetch_inner(&self) -> Result<FeedPage, FeedError> {
        let url = format!("{}/v2/json", self.config.base_url.trim_end_matches('/'));
        let page_size = self.config.page_size.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("sid", self.config.sid.as_str()),
                ("pagination", page_size.as_str()),
                ("page", "1"),
                ("order", "quality"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let page: FeedPage = serde_json::from_str(&body)?;
        Ok(page)
    }
}
