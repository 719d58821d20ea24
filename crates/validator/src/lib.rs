// Route drift checks: the sitemap's route list against the pages actually built

use devtools_web_core::{Result, SiteConfig};
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// Root-level error and SPA fallback pages; not reported when unlisted
const FALLBACK_PAGES: &[&str] = &["404", "500", "200"];

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }
}

/// Checks that need only the configuration.
pub fn lint_config(config: &SiteConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.info.push(format!("Site origin: {}", config.url));
    report
        .info
        .push(format!("{} route(s) listed", config.routes.len()));

    if config.routes.is_empty() {
        report
            .warnings
            .push("No routes configured; sitemap.xml will be empty".to_string());
        return report;
    }

    match config.routes.iter().find(|r| r.is_root()) {
        None => report
            .warnings
            .push("Site root (path = \"\") is not listed".to_string()),
        Some(root) => {
            if let Some(higher) = config
                .routes
                .iter()
                .find(|r| r.priority.value() > root.priority.value())
            {
                report.warnings.push(format!(
                    "Route '{}' has a higher priority ({}) than the site root ({})",
                    higher.path, higher.priority, root.priority
                ));
            }
        }
    }

    report
}

/// Compare the route list with the pages found under a built site directory.
///
/// A page for route `p` is any of `<dir>/p.html` or `<dir>/p/index.html`
/// (`<dir>/index.html` for the root). Routes without a page are errors,
/// pages without a route are warnings. Hidden entries and `_`-prefixed
/// directories (bundler output) are skipped.
pub fn validate_routes(config: &SiteConfig, pages_dir: &Path) -> Result<ValidationReport> {
    let pages = discover_pages(pages_dir)?;
    let mut report = ValidationReport::default();

    report.info.push(format!(
        "{} page(s) found under {}",
        pages.len(),
        pages_dir.display()
    ));

    let listed: BTreeSet<&str> = config.routes.iter().map(|r| r.path.as_str()).collect();

    for route in &config.routes {
        if !pages.contains(&route.path) {
            report.errors.push(format!(
                "Route '{}' has no page ({})",
                display_path(&route.path),
                expected_files(&route.path)
            ));
        }
    }

    for page in &pages {
        if !listed.contains(page.as_str()) && !FALLBACK_PAGES.contains(&page.as_str()) {
            report.warnings.push(format!(
                "Page '{}' is not listed in the sitemap",
                display_path(page)
            ));
        }
    }

    Ok(report)
}

/// Collect route paths for every HTML page under `dir`.
fn discover_pages(dir: &Path) -> Result<BTreeSet<String>> {
    let mut pages = BTreeSet::new();

    let walker = WalkDir::new(dir).follow_links(true).into_iter();
    for entry in walker.filter_entry(|e| e.depth() == 0 || !is_skipped(e.file_name())) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if let Some(route) = page_route(relative) {
            pages.insert(route);
        }
    }

    Ok(pages)
}

fn is_skipped(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}

/// Map a built file (relative to the pages root) to the route it serves.
///
/// ```text
/// index.html          → ""
/// base64.html         → "base64"
/// jwt-rsa/index.html  → "jwt-rsa"
/// robots.txt          → None
/// ```
fn page_route(relative: &Path) -> Option<String> {
    if relative.extension()? != "html" {
        return None;
    }

    let segments: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    match segments.split_last()? {
        (last, parent) if last == "index" => Some(parent.join("/")),
        _ => Some(segments.join("/")),
    }
}

fn display_path(path: &str) -> String {
    format!("/{}", path)
}

fn expected_files(path: &str) -> String {
    if path.is_empty() {
        "expected index.html".to_string()
    } else {
        format!("expected {}.html or {}/index.html", path, path)
    }
}
