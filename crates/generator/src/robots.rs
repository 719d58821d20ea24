//! robots.txt rendering.

use devtools_web_core::SiteUrl;

pub const ROBOTS_ROUTE: &str = "/robots.txt";
pub const ROBOTS_CONTENT_TYPE: &str = "text/plain";

/// Allow every crawler everywhere and point them at the sitemap.
pub fn render_robots(url: &SiteUrl) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}",
        url.join(crate::sitemap::SITEMAP_FILE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_url() -> SiteUrl {
        SiteUrl::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_robots_exact_body() {
        assert_eq!(
            render_robots(&example_url()),
            "User-agent: *\nAllow: /\n\nSitemap: https://example.com/sitemap.xml"
        );
    }

    #[test]
    fn test_robots_single_sitemap_line() {
        let body = render_robots(&example_url());
        let sitemap_lines: Vec<&str> = body
            .lines()
            .filter(|l| l.starts_with("Sitemap:"))
            .collect();
        assert_eq!(sitemap_lines, ["Sitemap: https://example.com/sitemap.xml"]);
        assert!(body.lines().any(|l| l == "Allow: /"));
    }

    #[test]
    fn test_robots_uses_trimmed_origin() {
        let url = SiteUrl::parse("https://example.com/").unwrap();
        assert!(render_robots(&url).ends_with("Sitemap: https://example.com/sitemap.xml"));
    }
}
