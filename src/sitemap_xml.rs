// Renders the sitemap urlset document from scheduler output.
//
// URL structure mirrors the site routes: /, /category/<name>,
// /game/<namespace>. The hosting layer decides where and how the body is
// served.

use chrono::{DateTime, Utc};

use crate::scheduler::GameSeoData;
use crate::seo::CategorySeoEntry;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#;

/// Build the complete sitemap document: the homepage, every static category
/// page, then every exposed game page, in that order. The homepage and
/// category entries carry `now`'s date as lastmod; game entries carry their
/// own.
pub fn render_sitemap(
    base_url: &str,
    games: &[GameSeoData],
    categories: &[CategorySeoEntry],
    now: DateTime<Utc>,
) -> String {
    let base_url = base_url.trim_end_matches('/');
    let today = now.date_naive().format("%Y-%m-%d").to_string();

    let mut doc = String::new();
    doc.push_str(XML_DECLARATION);
    doc.push('\n');
    doc.push_str(URLSET_OPEN);
    doc.push('\n');

    push_url(&mut doc, base_url, &today, "daily", 1.0);
    for category in categories {
        let loc = format!("{base_url}{}", category.url);
        push_url(&mut doc, &loc, &today, "weekly", category.priority);
    }
    for game in games {
        let loc = format!("{base_url}/game/{}", game.namespace);
        push_url(&mut doc, &loc, &game.lastmod, "monthly", game.priority);
    }

    doc.push_str("</urlset>\n");
    doc
}

fn push_url(doc: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: f64) {
    doc.push_str("  <url>\n");
    doc.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    doc.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    doc.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    doc.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
    doc.push_str("  </url>\n");
}

/// Escape the five XML-sensitive characters for element text.
fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::category_seo_data;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap()
    }

    fn sample_game(namespace: &str) -> GameSeoData {
        GameSeoData {
            namespace: namespace.to_string(),
            title: "Sample".to_string(),
            category: "action".to_string(),
            quality_score: 0.9,
            keywords: vec!["sample".to_string()],
            lastmod: "2024-03-15".to_string(),
            priority: 1.0,
        }
    }

    #[test]
    fn test_entry_count() {
        let games = vec![sample_game("a"), sample_game("b")];
        let categories = category_seo_data();
        let doc = render_sitemap("https://game-hub.site", &games, &categories, fixed_now());
        // homepage + 10 categories + 2 games
        assert_eq!(doc.matches("<url>").count(), 13);
        assert_eq!(doc.matches("</url>").count(), 13);
    }

    #[test]
    fn test_homepage_entry_first() {
        let doc = render_sitemap("https://game-hub.site", &[], &[], fixed_now());
        assert!(doc.starts_with(XML_DECLARATION));
        assert!(doc.contains("<loc>https://game-hub.site</loc>"));
        assert!(doc.contains("<changefreq>daily</changefreq>"));
        assert!(doc.contains("<priority>1.0</priority>"));
        assert!(doc.contains("<lastmod>2025-09-01</lastmod>"));
        assert!(doc.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_game_entry_uses_own_lastmod_and_priority() {
        let mut game = sample_game("moto-rush");
        game.priority = 0.8;
        let doc = render_sitemap("https://game-hub.site", &[game], &[], fixed_now());
        assert!(doc.contains("<loc>https://game-hub.site/game/moto-rush</loc>"));
        assert!(doc.contains("<lastmod>2024-03-15</lastmod>"));
        assert!(doc.contains("<changefreq>monthly</changefreq>"));
        assert!(doc.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn test_category_entries() {
        let categories = category_seo_data();
        let doc = render_sitemap("https://game-hub.site", &[], &categories, fixed_now());
        assert!(doc.contains("<loc>https://game-hub.site/category/action</loc>"));
        assert!(doc.contains("<loc>https://game-hub.site/category/educational</loc>"));
        assert!(doc.contains("<changefreq>weekly</changefreq>"));
    }

    #[test]
    fn test_xml_escaping() {
        let game = sample_game("rock&roll");
        let doc = render_sitemap("https://game-hub.site", &[game], &[], fixed_now());
        assert!(doc.contains("/game/rock&amp;roll</loc>"));
        assert!(!doc.contains("rock&roll<"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let doc = render_sitemap("https://game-hub.site/", &[], &[], fixed_now());
        assert!(doc.contains("<loc>https://game-hub.site</loc>"));
        assert!(!doc.contains("site//"));
    }

    #[test]
    fn test_escape_table() {
        assert_eq!(xml_escape("a&b<c>d\"e'f"), "a&amp;b&lt;c&gt;d&quot;e&apos;f");
        assert_eq!(xml_escape("plain"), "plain");
    }
}
