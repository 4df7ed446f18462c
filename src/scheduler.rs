// Progressive disclosure scheduler: decides how many and which game pages
// are exposed to search engines at a given moment, and annotates them with
// SEO metadata.
//
// Every operation is a function of (now, epoch, config, feed snapshot);
// nothing is persisted between calls. Time-dependent operations take an
// explicit `now` via the `*_at` variants; the undecorated variants read the
// wall clock and delegate.

use std::collections::HashSet;

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::config::{FeedConfig, SitemapConfig};
use crate::feed::{FeedClient, GameRecord};
use crate::metrics;
use crate::seo;

const SECONDS_PER_DAY: i64 = 86_400;

/// SEO metadata for one exposed game page. `namespace` is the natural key
/// and is unique within a single selection.
#[derive(Debug, Clone, Serialize)]
pub struct GameSeoData {
    pub namespace: String,
    pub title: String,
    pub category: String,
    pub quality_score: f64,
    pub keywords: Vec<String>,
    pub lastmod: String,
    pub priority: f64,
}

/// Aggregate schedule state, consumed by the statistics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SitemapStats {
    pub current_game_count: u32,
    pub max_game_count: u32,
    pub progress_percent: u32,
    pub days_until_next_increment: u32,
}

/// Result of a selection pass. Distinguishes "the feed answered and this is
/// the quality selection" from "the feed was unavailable, expose nothing
/// this cycle", so callers can tell degraded mode from a genuinely empty
/// catalog when they care.
#[derive(Debug, Clone)]
pub enum GameSelection {
    Fresh(Vec<GameSeoData>),
    Degraded,
}

impl GameSelection {
    /// The selected games; empty in degraded mode.
    pub fn games(&self) -> &[GameSeoData] {
        match self {
            GameSelection::Fresh(games) => games,
            GameSelection::Degraded => &[],
        }
    }

    pub fn into_games(self) -> Vec<GameSeoData> {
        match self {
            GameSelection::Fresh(games) => games,
            GameSelection::Degraded => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, GameSelection::Degraded)
    }
}

/// Time-gated sitemap scheduler.
///
/// Construct one explicitly and pass it to whichever handler needs it;
/// configuration is immutable after construction, so concurrent use is safe.
#[derive(Debug, Clone)]
pub struct SitemapScheduler {
    config: SitemapConfig,
    feed: FeedClient,
}

impl SitemapScheduler {
    pub fn new(config: SitemapConfig, feed: FeedClient) -> Self {
        Self {
            config: config.normalized(),
            feed,
        }
    }

    pub fn config(&self) -> &SitemapConfig {
        &self.config
    }

    /// Whole days elapsed since the schedule epoch, floored toward negative
    /// infinity so pre-epoch instants land on the preceding day boundary.
    fn elapsed_days_at(&self, now: DateTime<Utc>) -> i64 {
        let epoch = self.config.start_date.and_time(NaiveTime::MIN).and_utc();
        now.signed_duration_since(epoch)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
    }

    /// How many game pages the schedule exposes right now.
    pub fn current_game_count(&self) -> u32 {
        self.current_game_count_at(Utc::now())
    }

    /// How many game pages the schedule exposes at `now`: a non-decreasing
    /// step function starting at `initial_game_count`, growing by
    /// `batch_size` every `increment_days`, capped at `max_game_count`.
    /// Pre-epoch instants step back down and bottom out at zero.
    pub fn current_game_count_at(&self, now: DateTime<Utc>) -> u32 {
        let periods = self
            .elapsed_days_at(now)
            .div_euclid(self.config.increment_days as i64);
        let count =
            self.config.initial_game_count as i64 + periods * self.config.batch_size as i64;
        count.clamp(0, self.config.max_game_count as i64) as u32
    }

    pub async fn select_optimized_games(&self, target_count: u32) -> GameSelection {
        self.select_optimized_games_at(target_count, Utc::now()).await
    }

    /// Fetch one quality-ordered feed page and keep the first `target_count`
    /// games that carry a namespace and title, meet the quality threshold,
    /// and have not been accepted yet. Feed order is preserved. A fetch
    /// failure logs a warning and degrades to an empty selection; it never
    /// propagates to the caller.
    pub async fn select_optimized_games_at(
        &self,
        target_count: u32,
        now: DateTime<Utc>,
    ) -> GameSelection {
        let page = match self.feed.fetch_quality_page().await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("feed fetch failed, exposing no games this cycle: {e}");
                return GameSelection::Degraded;
            }
        };

        let mut games: Vec<GameSeoData> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for record in &page.items {
            if games.len() >= target_count as usize {
                break;
            }
            if let Some(game) = self.optimize_record(record, &mut seen, now) {
                games.push(game);
            }
        }

        metrics::SELECTED_GAMES.set(games.len() as i64);
        GameSelection::Fresh(games)
    }

    /// Validate and annotate a single feed record. Returns `None` for
    /// records the sitemap must not carry.
    fn optimize_record(
        &self,
        record: &GameRecord,
        seen: &mut HashSet<String>,
        now: DateTime<Utc>,
    ) -> Option<GameSeoData> {
        let namespace = match record.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => return self.reject("missing_fields"),
        };
        let title = match record.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return self.reject("missing_fields"),
        };
        if record.quality_score < self.config.quality_threshold {
            return self.reject("below_threshold");
        }
        if !seen.insert(namespace.to_string()) {
            return self.reject("duplicate");
        }

        // Keyword and priority derivation use the category as the feed
        // reports it; only the stored field takes the catch-all fallback.
        let category = record.category.as_deref().filter(|c| !c.is_empty());
        Some(GameSeoData {
            namespace: namespace.to_string(),
            title: title.to_string(),
            category: category.unwrap_or(seo::FALLBACK_CATEGORY).to_string(),
            quality_score: record.quality_score,
            keywords: seo::generate_seo_keywords(title, category),
            lastmod: seo::format_sitemap_date(record.date_modified.as_deref(), now),
            priority: seo::calculate_priority(record.quality_score, category),
        })
    }

    fn reject(&self, reason: &str) -> Option<GameSeoData> {
        metrics::GAMES_REJECTED_TOTAL.with_label_values(&[reason]).inc();
        None
    }

    pub fn sitemap_stats(&self) -> SitemapStats {
        self.sitemap_stats_at(Utc::now())
    }

    /// Schedule statistics at `now`. `current_game_count` always agrees
    /// with `current_game_count_at`, and `days_until_next_increment` is in
    /// [1, increment_days].
    pub fn sitemap_stats_at(&self, now: DateTime<Utc>) -> SitemapStats {
        let current = self.current_game_count_at(now);
        let max = self.config.max_game_count;
        let progress_percent = if max == 0 {
            0
        } else {
            ((current as f64 / max as f64) * 100.0).round() as u32
        };

        let increment = self.config.increment_days as i64;
        let days_until_next_increment =
            (increment - self.elapsed_days_at(now).rem_euclid(increment)) as u32;

        metrics::EXPOSED_PAGES.set(current as i64);
        SitemapStats {
            current_game_count: current,
            max_game_count: max,
            progress_percent,
            days_until_next_increment,
        }
    }

    /// Static category pages with their pre-assigned SEO data.
    pub fn category_seo_data(&self) -> Vec<seo::CategorySeoEntry> {
        seo::category_seo_data()
    }
}

impl Default for SitemapScheduler {
    fn default() -> Self {
        Self::new(SitemapConfig::default(), FeedClient::new(FeedConfig::default()))
    }
}
