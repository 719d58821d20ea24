use anyhow::{Context, Result};
use devtools_web_validator::{ValidationReport, lint_config, validate_routes};
use std::path::PathBuf;

use super::load_config;

pub async fn run(config: Option<PathBuf>, pages: Option<PathBuf>) -> Result<()> {
    let (site_config, source) = load_config(config.as_deref())?;
    println!("✓ Configuration valid ({})", source);

    let mut report = lint_config(&site_config);

    if let Some(pages_dir) = pages {
        println!("Checking routes against: {}", pages_dir.display());
        let drift = validate_routes(&site_config, &pages_dir)
            .with_context(|| format!("Failed to scan {}", pages_dir.display()))?;
        report.merge(drift);
    }

    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line);
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("✗ {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_site(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("site.toml");
        fs::write(
            &path,
            "[site]\nurl = \"https://example.com\"\n\n[[route]]\npath = \"\"\npriority = \"1.0\"\nchangefreq = \"weekly\"\n\n[[route]]\npath = \"hex\"\npriority = \"0.8\"\nchangefreq = \"monthly\"\n",
        )
        .unwrap();
        path
    }

    #[tokio::test]
    async fn test_validate_config_only() {
        let dir = TempDir::new().unwrap();
        let config = write_site(&dir);
        run(Some(config), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_fails_on_missing_page() {
        let dir = TempDir::new().unwrap();
        let config = write_site(&dir);
        let pages = dir.path().join("build");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("index.html"), "<html></html>").unwrap();

        let err = run(Some(config), Some(pages)).await.unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }

    #[tokio::test]
    async fn test_validate_passes_when_pages_match() {
        let dir = TempDir::new().unwrap();
        let config = write_site(&dir);
        let pages = dir.path().join("build");
        fs::create_dir_all(pages.join("hex")).unwrap();
        fs::write(pages.join("index.html"), "<html></html>").unwrap();
        fs::write(pages.join("hex/index.html"), "<html></html>").unwrap();

        run(Some(config), Some(pages)).await.unwrap();
    }
}
