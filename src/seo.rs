// SEO derivation rules: keyword generation, sitemap dates, page priorities,
// and the static category tables.
//
// Pure policy data and functions; nothing here reads the clock or network.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// Category stored for games the feed reports without one.
pub const FALLBACK_CATEGORY: &str = "games";

/// Keyword phrases generated per game page.
pub const MAX_KEYWORDS: usize = 5;

/// Categories that earn a priority bonus on their game pages.
pub const POPULAR_CATEGORIES: [&str; 5] = ["action", "puzzle", "racing", "sports", "adventure"];

const POPULAR_CATEGORY_BONUS: f64 = 0.1;

/// The static category pages the site exposes, with pre-assigned priority
/// and keyword sets. Table order is sitemap order.
const CATEGORY_TABLE: [(&str, f64, &[&str]); 10] = [
    ("action", 0.9, &["action games", "free action games", "online action games"]),
    ("puzzle", 0.9, &["puzzle games", "brain games", "free puzzle games"]),
    ("racing", 0.8, &["racing games", "car games", "free racing games"]),
    ("sports", 0.8, &["sports games", "free sports games", "online sports"]),
    ("adventure", 0.8, &["adventure games", "free adventure games"]),
    ("arcade", 0.7, &["arcade games", "classic arcade games"]),
    ("shooting", 0.7, &["shooting games", "free shooting games"]),
    ("strategy", 0.7, &["strategy games", "free strategy games"]),
    ("casual", 0.6, &["casual games", "easy games"]),
    ("educational", 0.6, &["educational games", "learning games"]),
];

/// SEO data for one static category page.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySeoEntry {
    pub url: String,
    pub priority: f64,
    pub keywords: Vec<String>,
}

/// Keyword phrases for a game page, most specific first: the game title,
/// then title/category long-tail variants, then category phrases, capped at
/// `MAX_KEYWORDS`. All entries are lower-cased.
pub fn generate_seo_keywords(title: &str, category: Option<&str>) -> Vec<String> {
    let title = title.to_lowercase();
    let mut keywords = vec![title.clone()];

    if let Some(category) = category.filter(|c| !c.is_empty()) {
        let category = category.to_lowercase();
        keywords.push(format!("{title} {category}"));
        keywords.push(format!("play {title}"));
        keywords.push(format!("{title} game"));
        keywords.push(format!("free {title}"));
        keywords.push(format!("{category} games"));
        keywords.push(format!("free {category} games"));
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Normalize a feed timestamp to the `YYYY-MM-DD` form sitemaps require.
/// Missing or unparseable input falls back to `now`'s UTC calendar date, so
/// the result is always well-formed.
pub fn format_sitemap_date(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let date = raw
        .and_then(parse_calendar_date)
        .unwrap_or_else(|| now.date_naive());
    date.format("%Y-%m-%d").to_string()
}

/// The feed's `date_modified` strings arrive in assorted formats; try the
/// ones seen in the wild, most common first. Zoned inputs are converted to
/// UTC before the time of day is dropped.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    None
}

/// Sitemap priority for a game page: stepped base from the quality score,
/// plus the popular-category bonus, clamped to the sitemap maximum of 1.0.
pub fn calculate_priority(quality_score: f64, category: Option<&str>) -> f64 {
    let mut priority = if quality_score >= 0.9 {
        0.9
    } else if quality_score >= 0.8 {
        0.8
    } else if quality_score >= 0.7 {
        0.7
    } else {
        0.6
    };

    if category.is_some_and(is_popular_category) {
        priority += POPULAR_CATEGORY_BONUS;
    }

    priority.min(1.0)
}

/// Case-insensitive membership in the popular-category set.
pub fn is_popular_category(category: &str) -> bool {
    POPULAR_CATEGORIES.iter().any(|c| c.eq_ignore_ascii_case(category))
}

/// SEO entries for every static category page, in table order.
pub fn category_seo_data() -> Vec<CategorySeoEntry> {
    CATEGORY_TABLE
        .iter()
        .map(|(name, priority, keywords)| CategorySeoEntry {
            url: format!("/category/{name}"),
            priority: *priority,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap()
    }

    // ── Keywords ─────────────────────────────────────────────────────

    #[test]
    fn test_keywords_with_category_capped_at_five() {
        let keywords = generate_seo_keywords("Moto Rush", Some("racing"));
        assert_eq!(
            keywords,
            vec![
                "moto rush",
                "moto rush racing",
                "play moto rush",
                "moto rush game",
                "free moto rush",
            ]
        );
    }

    #[test]
    fn test_keywords_all_lowercase() {
        let keywords = generate_seo_keywords("MOTO Rush", Some("Racing"));
        for kw in &keywords {
            assert_eq!(kw, &kw.to_lowercase());
        }
    }

    #[test]
    fn test_keywords_without_category() {
        assert_eq!(generate_seo_keywords("Tetris", None), vec!["tetris"]);
    }

    #[test]
    fn test_keywords_empty_category_treated_as_absent() {
        assert_eq!(generate_seo_keywords("Tetris", Some("")), vec!["tetris"]);
    }

    // ── Dates ────────────────────────────────────────────────────────

    #[test]
    fn test_date_rfc3339_truncated() {
        assert_eq!(
            format_sitemap_date(Some("2024-03-15T10:00:00Z"), fixed_now()),
            "2024-03-15"
        );
    }

    #[test]
    fn test_date_zoned_input_converted_to_utc() {
        // 23:30 at -05:00 is already the next day in UTC
        assert_eq!(
            format_sitemap_date(Some("2024-03-15T23:30:00-05:00"), fixed_now()),
            "2024-03-16"
        );
    }

    #[test]
    fn test_date_bare_calendar_date() {
        assert_eq!(format_sitemap_date(Some("2024-03-15"), fixed_now()), "2024-03-15");
    }

    #[test]
    fn test_date_zoneless_datetime() {
        assert_eq!(
            format_sitemap_date(Some("2024-03-15T10:00:00"), fixed_now()),
            "2024-03-15"
        );
    }

    #[test]
    fn test_date_missing_falls_back_to_now() {
        assert_eq!(format_sitemap_date(None, fixed_now()), "2025-01-15");
    }

    #[test]
    fn test_date_garbage_falls_back_to_now() {
        assert_eq!(format_sitemap_date(Some("not-a-date"), fixed_now()), "2025-01-15");
        assert_eq!(format_sitemap_date(Some(""), fixed_now()), "2025-01-15");
        assert_eq!(format_sitemap_date(Some("   "), fixed_now()), "2025-01-15");
    }

    // ── Priority ─────────────────────────────────────────────────────

    #[test]
    fn test_priority_popular_category_clamped() {
        // 0.9 base + 0.1 bonus clamps at the sitemap maximum
        assert_eq!(calculate_priority(0.95, Some("action")), 1.0);
    }

    #[test]
    fn test_priority_unpopular_category_no_bonus() {
        assert_eq!(calculate_priority(0.65, Some("horror")), 0.6);
    }

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(calculate_priority(0.9, None), 0.9);
        assert_eq!(calculate_priority(0.8, None), 0.8);
        assert_eq!(calculate_priority(0.7, None), 0.7);
        assert_eq!(calculate_priority(0.69, None), 0.6);
        assert_eq!(calculate_priority(0.0, None), 0.6);
    }

    #[test]
    fn test_priority_bonus_applied() {
        let p = calculate_priority(0.85, Some("puzzle"));
        assert!((p - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_priority_bonus_case_insensitive() {
        let p = calculate_priority(0.72, Some("Racing"));
        assert!((p - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_priority_bounds() {
        for score in [0.0, 0.3, 0.71, 0.85, 0.95, 1.0, 1.5] {
            for category in [None, Some("action"), Some("horror")] {
                let p = calculate_priority(score, category);
                assert!((0.6..=1.0).contains(&p), "priority {p} out of range");
            }
        }
    }

    // ── Category table ───────────────────────────────────────────────

    #[test]
    fn test_category_table_shape() {
        let entries = category_seo_data();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].url, "/category/action");
        assert_eq!(entries[0].priority, 0.9);
        assert_eq!(entries[9].url, "/category/educational");
        assert_eq!(entries[9].priority, 0.6);
        for entry in &entries {
            assert!(!entry.keywords.is_empty());
        }
    }

    #[test]
    fn test_category_table_order_stable() {
        let names: Vec<String> = category_seo_data()
            .iter()
            .map(|e| e.url.trim_start_matches("/category/").to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "action",
                "puzzle",
                "racing",
                "sports",
                "adventure",
                "arcade",
                "shooting",
                "strategy",
                "casual",
                "educational",
            ]
        );
    }
}
