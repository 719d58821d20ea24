pub mod config;
pub mod error;
pub mod types;

pub use config::{builtin_site_config, default_site_toml, parse_site_toml, parse_site_toml_str};
pub use error::{Error, Result};
pub use types::*;

/// Cache policy shared by every crawl document: no browser caching, one hour in shared caches
pub const CACHE_CONTROL: &str = "max-age=0, s-maxage=3600";
