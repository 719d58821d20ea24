use anyhow::{Context, Result};
use devtools_web_core::config::DEFAULT_SITE_URL;
use devtools_web_core::{SiteUrl, default_site_toml, parse_site_toml_str};
use std::fs;
use std::path::PathBuf;

use super::SITE_TOML;

/// Write a commented site.toml listing the default routes.
///
/// # Errors
///
/// Returns an error if:
/// - The directory doesn't exist
/// - site.toml already exists in the directory
/// - `url` is not a bare http(s) origin
pub async fn run(path: PathBuf, url: Option<String>) -> Result<()> {
    println!("Initializing site configuration: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    let url = SiteUrl::parse(url.as_deref().unwrap_or(DEFAULT_SITE_URL))
        .context("Invalid --url")?;

    let toml = default_site_toml(url.as_str());

    let config = parse_site_toml_str(&toml)
        .context("Generated site.toml is invalid - this is a bug in the template generator")?;

    fs::write(&site_toml_path, toml)
        .with_context(|| format!("Failed to write {}", site_toml_path.display()))?;

    println!("✓ Wrote {}", site_toml_path.display());
    println!("  Origin: {}", config.url);
    println!("  Routes: {}", config.routes.len());

    println!("\nNext steps:");
    println!("  1. Edit site.toml so the route list matches the published pages");
    println!(
        "  2. Check it: devtools-web validate --config {} --pages <built-site-dir>",
        site_toml_path.display()
    );
    println!(
        "  3. Build: devtools-web build --config {} --output dist",
        site_toml_path.display()
    );

    Ok(())
}
