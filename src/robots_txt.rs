// Renders the robots.txt body.

/// Robots policy: everything crawlable except the API and admin paths, with
/// the sitemap advertised at its canonical location under `base_url`.
pub fn render_robots_txt(base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!(
        "User-agent: *\n\
         Allow: /\n\
         \n\
         Sitemap: {base_url}/sitemap.xml\n\
         \n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         \n\
         Crawl-delay: 1\n"
    )
}
