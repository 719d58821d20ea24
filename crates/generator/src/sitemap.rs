//! Sitemap generation.
//!
//! Lists every configured route, in configuration order:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! No `lastmod`: output depends on configuration only.

use devtools_web_core::{RouteEntry, SiteUrl};
use std::borrow::Cow;

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const SITEMAP_ROUTE: &str = "/sitemap.xml";
pub const SITEMAP_CONTENT_TYPE: &str = "application/xml";
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub fn render_sitemap(url: &SiteUrl, routes: &[RouteEntry]) -> String {
    let mut xml = String::with_capacity(128 + routes.len() * 128);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for (i, route) in routes.iter().enumerate() {
        if i > 0 {
            xml.push('\n');
        }
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&url.join(&route.path)));
        xml.push_str("</loc>\n    <changefreq>");
        xml.push_str(route.changefreq.as_str());
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(route.priority.as_str());
        xml.push_str("</priority>\n  </url>");
    }
    if !routes.is_empty() {
        xml.push('\n');
    }

    xml.push_str("</urlset>");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
