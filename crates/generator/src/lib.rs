// Prerendering of the crawl documents and the styling config

pub mod robots;
pub mod sitemap;
pub mod theme;

use anyhow::{Context, Result};
use bytes::Bytes;
use devtools_web_core::{CACHE_CONTROL, SiteConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Static-host header rules file
pub const HEADERS_FILE: &str = "_headers";

/// A crawl document, rendered once and served as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Absolute request path, e.g. `/robots.txt`
    pub route: &'static str,
    pub content_type: &'static str,
    /// Shared across responses; cloning only bumps a refcount
    pub body: Bytes,
}

impl Document {
    pub fn file_name(&self) -> &'static str {
        self.route.trim_start_matches('/')
    }

    pub fn cache_control(&self) -> &'static str {
        CACHE_CONTROL
    }

    /// Body as text; every document is rendered from UTF-8 strings
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

pub struct GeneratedSite {
    pub documents: Vec<Document>,
    pub assets: Vec<(String, Vec<u8>)>, // (file name, data), build output only
}

impl GeneratedSite {
    pub fn document(&self, route: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.route == route)
    }

    /// Write every document and asset into `output`, creating it if needed.
    ///
    /// Returns the written paths in write order.
    pub fn write_to(&self, output: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;

        let mut files: Vec<(&str, &[u8])> = self
            .documents
            .iter()
            .map(|d| (d.file_name(), &d.body[..]))
            .collect();
        files.extend(self.assets.iter().map(|(n, data)| (n.as_str(), data.as_slice())));

        let mut written = Vec::new();
        for (name, data) in files {
            let path = output.join(name);
            fs::write(&path, data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Render robots.txt, sitemap.xml, the theme config and the header rules.
pub fn generate_site(config: &SiteConfig) -> Result<GeneratedSite> {
    let documents = vec![
        Document {
            route: robots::ROBOTS_ROUTE,
            content_type: robots::ROBOTS_CONTENT_TYPE,
            body: Bytes::from(robots::render_robots(&config.url)),
        },
        Document {
            route: sitemap::SITEMAP_ROUTE,
            content_type: sitemap::SITEMAP_CONTENT_TYPE,
            body: Bytes::from(sitemap::render_sitemap(&config.url, &config.routes)),
        },
    ];

    let theme_json = theme::render_theme_config(&config.theme)?;
    let headers = render_headers(&documents);

    Ok(GeneratedSite {
        documents,
        assets: vec![
            (theme::THEME_CONFIG_FILE.to_string(), theme_json.into_bytes()),
            (HEADERS_FILE.to_string(), headers.into_bytes()),
        ],
    })
}

/// Header rules so a static host serves the prerendered files with the
/// same content type and cache policy as the live handlers.
///
/// ```text
/// /robots.txt
///   Content-Type: text/plain
///   Cache-Control: max-age=0, s-maxage=3600
/// ```
fn render_headers(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| {
            format!(
                "{}\n  Content-Type: {}\n  Cache-Control: {}\n",
                d.route,
                d.content_type,
                d.cache_control()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
