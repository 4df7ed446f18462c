// Prometheus metrics for feed fetching and sitemap selection.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Game pages the schedule currently exposes to crawlers.
    pub static ref EXPOSED_PAGES: IntGauge =
        IntGauge::new("gamehub_sitemap_exposed_pages", "Game pages currently exposed to crawlers").unwrap();

    /// Games accepted by the most recent selection pass.
    pub static ref SELECTED_GAMES: IntGauge =
        IntGauge::new("gamehub_sitemap_selected_games", "Games accepted by the most recent selection pass").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Feed requests, by outcome (ok, http_error, bad_status, malformed).
    pub static ref FEED_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gamehub_feed_requests_total", "Feed requests by outcome"),
        &["outcome"],
    )
    .unwrap();

    /// Candidate games rejected during selection, by reason
    /// (missing_fields, below_threshold, duplicate).
    pub static ref GAMES_REJECTED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gamehub_games_rejected_total", "Candidates rejected during selection"),
        &["reason"],
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Feed fetch duration in seconds.
    pub static ref FEED_FETCH_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("gamehub_feed_fetch_duration_seconds", "Feed fetch duration in seconds")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .unwrap();
}

/// Register all metrics with the crate registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(EXPOSED_PAGES.clone()),
        Box::new(SELECTED_GAMES.clone()),
        Box::new(FEED_REQUESTS_TOTAL.clone()),
        Box::new(GAMES_REJECTED_TOTAL.clone()),
        Box::new(FEED_FETCH_DURATION_SECONDS.clone()),
    ];

    for c in collectors {
        REGISTRY.register(c).expect("failed to register metric");
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
