use anyhow::{Context, Result};
use devtools_web_generator::generate_site;
use std::path::PathBuf;

use super::load_config;

/// Prerender the crawl documents and theme config into `output`
pub async fn run(config: Option<PathBuf>, output: PathBuf) -> Result<()> {
    println!("🔨 Prerendering site documents...");

    let (site_config, source) = load_config(config.as_deref())?;

    println!("   Config: {}", source);
    println!("   Output: {}", output.display());
    println!();
    println!("✓ Origin: {}", site_config.url);
    println!("  Routes: {}", site_config.routes.len());
    println!();

    let site = generate_site(&site_config).context("Failed to render site documents")?;

    println!("📄 Writing files...");
    let written = site.write_to(&output)?;
    for path in &written {
        let size = path.metadata().map(|m| m.len()).unwrap_or(0);
        println!(
            "   ✓ {} ({} bytes)",
            path.file_name().unwrap_or_default().to_string_lossy(),
            size
        );
    }

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To serve locally:");
    println!("   devtools-web serve --static {}", output.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SITE: &str = r#"
[site]
url = "https://example.com"

[[route]]
path = ""
priority = "1.0"
changefreq = "weekly"

[[route]]
path = "base64"
priority = "0.8"
changefreq = "monthly"
"#;

    #[tokio::test]
    async fn test_build_writes_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("site.toml");
        fs::write(&config, SITE).unwrap();
        let output = dir.path().join("dist");

        run(Some(config), output.clone()).await.unwrap();

        let robots = fs::read_to_string(output.join("robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml"));

        let sitemap = fs::read_to_string(output.join("sitemap.xml")).unwrap();
        let root = sitemap.find("<loc>https://example.com/</loc>").unwrap();
        let base64 = sitemap.find("<loc>https://example.com/base64</loc>").unwrap();
        assert!(root < base64);

        assert!(output.join("theme.config.json").exists());
        let headers = fs::read_to_string(output.join("_headers")).unwrap();
        assert!(headers.contains("Cache-Control: max-age=0, s-maxage=3600"));
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("site.toml");
        fs::write(&config, SITE.replace("\"0.8\"", "\"8\"")).unwrap();
        let output = dir.path().join("dist");

        assert!(run(Some(config), output.clone()).await.is_err());
        assert!(!output.exists());
    }
}
