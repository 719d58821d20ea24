use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Complete site configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub url: SiteUrl,
    pub routes: Vec<RouteEntry>,
    pub theme: ThemeConfig,
}

/// Absolute site origin without a trailing slash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl(String);

impl SiteUrl {
    /// Parse an `http`/`https` origin, trimming any trailing slashes.
    ///
    /// The origin may carry a port but no path, query or fragment:
    ///
    /// ```text
    /// SiteUrl::parse("https://example.com/")    → Ok("https://example.com")
    /// SiteUrl::parse("http://localhost:8080")   → Ok("http://localhost:8080")
    /// SiteUrl::parse("example.com")             → Err(...)
    /// SiteUrl::parse("https://example.com/app") → Err(...)
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('/');

        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| {
                Error::InvalidData(format!(
                    "site URL must start with http:// or https://: '{}'",
                    s
                ))
            })?;

        if let Some(c) = host.chars().find(|c| matches!(c, '/' | '?' | '#' | '@')) {
            return Err(Error::InvalidData(format!(
                "site URL must be a bare origin (found {:?}): '{}'",
                c, s
            )));
        }

        let (name, port) = split_port(host).ok_or_else(|| {
            Error::InvalidData(format!("site URL has a malformed host or port: '{}'", s))
        })?;

        if let Some(port) = port
            && (port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(Error::InvalidData(format!(
                "site URL port must be numeric: '{}'",
                s
            )));
        }

        if !is_valid_host(name) {
            return Err(Error::InvalidData(format!(
                "site URL has no valid host: '{}'",
                s
            )));
        }

        Ok(SiteUrl(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute location of a site-relative path.
    ///
    /// The root path (empty string) resolves to `<origin>/`.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path)
    }
}

/// Split `host[:port]`, keeping IPv6 literals (`[::1]:8080`) intact.
fn split_port(authority: &str) -> Option<(&str, Option<&str>)> {
    if authority.starts_with('[') {
        let end = authority.find(']')?;
        let (name, rest) = authority.split_at(end + 1);
        return match rest {
            "" => Some((name, None)),
            _ => Some((name, Some(rest.strip_prefix(':')?))),
        };
    }

    match authority.split_once(':') {
        Some((name, port)) => Some((name, Some(port))),
        None => Some((authority, None)),
    }
}

/// Dot-separated labels of letters, digits and `-`, or a bracketed IPv6 literal.
fn is_valid_host(name: &str) -> bool {
    if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        return !inner.is_empty()
            && inner.contains(':')
            && inner.chars().all(|c| c.is_ascii_hexdigit() || matches!(c, ':' | '.'));
    }

    !name.is_empty()
        && name.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One crawlable page listed in the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    /// Relative path, no leading slash. Empty for the site root.
    pub path: String,
    pub priority: Priority,
    pub changefreq: ChangeFreq,
}

impl RouteEntry {
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// Crawl priority hint in `[0.0, 1.0]`.
///
/// Keeps the literal spelling from the configuration so `"1.0"` is emitted as `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Priority {
    literal: String,
    value: f64,
}

impl Priority {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (int, frac) = s.split_once('.').unwrap_or((s, ""));

        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if int.is_empty() || !digits_only(int) || !digits_only(frac) || s.ends_with('.') {
            return Err(Error::InvalidData(format!(
                "priority must be a decimal number like 0.8: '{}'",
                s
            )));
        }

        // Range is checked on the digits; the float may round 1.000...01 down to 1.0
        let whole = int.trim_start_matches('0');
        let in_range = whole.is_empty() || (whole == "1" && frac.chars().all(|c| c == '0'));
        if !in_range {
            return Err(Error::InvalidData(format!(
                "priority must be between 0.0 and 1.0: '{}'",
                s
            )));
        }

        let value: f64 = s
            .parse()
            .map_err(|_| Error::InvalidData(format!("invalid priority '{}'", s)))?;

        Ok(Priority {
            literal: s.to_string(),
            value,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Change frequency values from the sitemap protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const ALL: [ChangeFreq; 7] = [
        ChangeFreq::Always,
        ChangeFreq::Hourly,
        ChangeFreq::Daily,
        ChangeFreq::Weekly,
        ChangeFreq::Monthly,
        ChangeFreq::Yearly,
        ChangeFreq::Never,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl FromStr for ChangeFreq {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChangeFreq::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = ChangeFreq::ALL.iter().map(|c| c.as_str()).collect();
                Error::InvalidData(format!(
                    "unknown change frequency '{}', expected one of: {}",
                    s,
                    allowed.join(", ")
                ))
            })
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling configuration handed to the external styling build plugin
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub dark_mode: DarkMode,
    /// Content-scan globs: site sources plus the styling library's own files
    pub content: Vec<String>,
    pub presets: Vec<ThemePreset>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            dark_mode: DarkMode::Class,
            content: DEFAULT_CONTENT_GLOBS.iter().map(|g| g.to_string()).collect(),
            presets: vec![ThemePreset {
                name: "skeleton".to_string(),
                enhancements: true,
            }],
        }
    }
}

pub const DEFAULT_CONTENT_GLOBS: &[&str] = &[
    "./src/**/*.{html,js,svelte,ts}",
    "./node_modules/@skeletonlabs/skeleton/**/*.{html,js,svelte,ts}",
];

/// How dark mode is switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Toggled by a `dark` class on the root element
    #[default]
    Class,
    /// Follows `prefers-color-scheme`
    Media,
}

/// Named theme preset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemePreset {
    pub name: String,
    #[serde(default)]
    pub enhancements: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_trims_trailing_slash() {
        let url = SiteUrl::parse("https://example.com/").unwrap();
        assert_eq!(url.as_str(), "https://example.com");

        let url = SiteUrl::parse("https://example.com///").unwrap();
        assert_eq!(url.as_str(), "https://example.com");
    }

    #[test]
    fn test_site_url_accepts_port() {
        let url = SiteUrl::parse("http://localhost:8080").unwrap();
        assert_eq!(url.to_string(), "http://localhost:8080");
    }

    #[test]
    fn test_site_url_rejects_non_origins() {
        assert!(SiteUrl::parse("example.com").is_err());
        assert!(SiteUrl::parse("ftp://example.com").is_err());
        assert!(SiteUrl::parse("https://").is_err());
        assert!(SiteUrl::parse("https://example.com/app").is_err());
        assert!(SiteUrl::parse("https://example.com?x=1").is_err());
        assert!(SiteUrl::parse("https://exa mple.com").is_err());
        assert!(SiteUrl::parse("https://example.com\"").is_err());
    }

    #[test]
    fn test_site_url_rejects_empty_host() {
        assert!(SiteUrl::parse("https://:8080").is_err());
        assert!(SiteUrl::parse("https://.").is_err());
        assert!(SiteUrl::parse("https://:").is_err());
        assert!(SiteUrl::parse("https://example.com:").is_err());
        assert!(SiteUrl::parse("https://example..com").is_err());
        assert!(SiteUrl::parse("https://example.com:80:80").is_err());
        assert!(SiteUrl::parse("https://[]:8080").is_err());
        assert!(SiteUrl::parse("https://user@example.com").is_err());
    }

    #[test]
    fn test_site_url_accepts_ipv6_literal() {
        let url = SiteUrl::parse("http://[::1]:8080/").unwrap();
        assert_eq!(url.as_str(), "http://[::1]:8080");
        assert!(SiteUrl::parse("http://[::1]").is_ok());
        assert!(SiteUrl::parse("http://[::1]x").is_err());
    }

    #[test]
    fn test_site_url_join() {
        let url = SiteUrl::parse("https://example.com").unwrap();
        assert_eq!(url.join(""), "https://example.com/");
        assert_eq!(url.join("base64"), "https://example.com/base64");
        assert_eq!(url.join("sitemap.xml"), "https://example.com/sitemap.xml");
    }

    #[test]
    fn test_priority_keeps_literal() {
        let p = Priority::parse("1.0").unwrap();
        assert_eq!(p.as_str(), "1.0");
        assert_eq!(p.value(), 1.0);

        let p = Priority::parse("0.8").unwrap();
        assert_eq!(p.to_string(), "0.8");

        assert_eq!(Priority::parse("0").unwrap().value(), 0.0);
        assert_eq!(Priority::parse("1").unwrap().value(), 1.0);
        assert_eq!(Priority::parse("1.000").unwrap().as_str(), "1.000");
        assert_eq!(Priority::parse("00.5").unwrap().value(), 0.5);
    }

    #[test]
    fn test_priority_rejects_out_of_range_and_junk() {
        assert!(Priority::parse("1.1").is_err());
        assert!(Priority::parse("1.00000000000000001").is_err());
        assert!(Priority::parse("2").is_err());
        assert!(Priority::parse("10.0").is_err());
        assert!(Priority::parse("-0.5").is_err());
        assert!(Priority::parse("").is_err());
        assert!(Priority::parse(".5").is_err());
        assert!(Priority::parse("5.").is_err());
        assert!(Priority::parse("1e0").is_err());
        assert!(Priority::parse("NaN").is_err());
        assert!(Priority::parse("high").is_err());
    }

    #[test]
    fn test_changefreq_strings() {
        let names: Vec<&str> = ChangeFreq::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"]
        );
        assert_eq!(ChangeFreq::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_changefreq_from_str() {
        assert_eq!("monthly".parse::<ChangeFreq>().unwrap(), ChangeFreq::Monthly);
        assert!("Monthly".parse::<ChangeFreq>().is_err());

        let err = "sometimes".parse::<ChangeFreq>().unwrap_err().to_string();
        assert!(err.contains("sometimes"));
        assert!(err.contains("weekly"));
    }

    #[test]
    fn test_theme_defaults() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.dark_mode, DarkMode::Class);
        assert_eq!(theme.content.len(), 2);
        assert_eq!(theme.presets[0].name, "skeleton");
        assert!(theme.presets[0].enhancements);
    }
}
