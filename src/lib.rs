// Progressive sitemap scheduling and SEO metadata for the Game Hub arcade.
//
// The scheduler decides, purely from wall-clock time and configuration, how
// many and which game pages are exposed to search engines, annotates them
// with SEO metadata derived from the live feed, and renders the
// crawler-facing artifacts (sitemap XML, robots.txt) the hosting layer
// serves.

pub mod config;
pub mod feed;
pub mod metrics;
pub mod robots_txt;
pub mod scheduler;
pub mod seo;
pub mod sitemap_xml;

pub use config::{FeedConfig, SitemapConfig};
pub use feed::{FeedClient, FeedError, FeedPage, GameRecord};
pub use robots_txt::render_robots_txt;
pub use scheduler::{GameSelection, GameSeoData, SitemapScheduler, SitemapStats};
pub use seo::CategorySeoEntry;
pub use sitemap_xml::render_sitemap;
