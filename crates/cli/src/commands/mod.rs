pub mod build;
pub mod init;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use devtools_web_core::{SiteConfig, builtin_site_config, parse_site_toml};
use std::fmt;
use std::path::{Path, PathBuf};

pub const SITE_TOML: &str = "site.toml";

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Builtin => f.write_str("built-in routes"),
        }
    }
}

/// Load the site configuration.
///
/// An explicit path must exist. Without one, `./site.toml` is used when
/// present and the built-in configuration otherwise.
pub fn load_config(path: Option<&Path>) -> Result<(SiteConfig, ConfigSource)> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file does not exist: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let local = PathBuf::from(SITE_TOML);
            if !local.exists() {
                let config = builtin_site_config().context("Built-in configuration is invalid")?;
                return Ok((config, ConfigSource::Builtin));
            }
            local
        }
    };

    let config =
        parse_site_toml(&path).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok((config, ConfigSource::File(path)))
}
