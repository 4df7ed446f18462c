// Scheduler and feed configuration, supplied at construction and immutable
// thereafter. No environment variables are read here: the hosting layer owns
// how these values are sourced.

use chrono::NaiveDate;

/// Tunables for the progressive disclosure schedule.
///
/// All fields carry the production defaults; construct with
/// `SitemapConfig::default()` and override what differs.
#[derive(Debug, Clone)]
pub struct SitemapConfig {
    /// Game pages exposed on day zero of the schedule.
    pub initial_game_count: u32,
    /// Ceiling on exposed game pages.
    pub max_game_count: u32,
    /// Days between growth steps.
    pub increment_days: u32,
    /// Minimum acceptable feed quality score, in [0, 1].
    pub quality_threshold: f64,
    /// Pages added per completed period.
    pub batch_size: u32,
    /// Schedule epoch, taken as UTC midnight: the project launch date.
    pub start_date: NaiveDate,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            initial_game_count: 10,
            max_game_count: 100,
            increment_days: 7,
            quality_threshold: 0.75,
            batch_size: 10,
            start_date: project_start_date(),
        }
    }
}

impl SitemapConfig {
    /// Clamp degenerate values instead of rejecting them: the schedule must
    /// keep producing counts no matter what the hosting layer passes in.
    /// Invariants afterwards: `increment_days >= 1` and
    /// `max_game_count >= initial_game_count`.
    pub fn normalized(mut self) -> Self {
        self.increment_days = self.increment_days.max(1);
        self.max_game_count = self.max_game_count.max(self.initial_game_count);
        self
    }
}

/// 2025-08-29, the launch date the growth schedule counts from.
fn project_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 29).expect("valid calendar date")
}

/// Where and how to query the game feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Feed origin, no trailing slash.
    pub base_url: String,
    /// Site id issued by the feed provider.
    pub sid: String,
    /// Games requested per page.
    pub page_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://feeds.gamepix.com".to_string(),
            sid: "34E14".to_string(),
            page_size: 48,
        }
    }
}
