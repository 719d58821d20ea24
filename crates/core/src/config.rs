use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Origin the site is deployed to when no site.toml is present
pub const DEFAULT_SITE_URL: &str = "https://devtools.wsgrok.com";

/// Routes published by the developer-tools front-end, in sitemap order
pub const DEFAULT_ROUTES: &[(&str, &str, ChangeFreq)] = &[
    ("", "1.0", ChangeFreq::Weekly),
    ("base64", "0.8", ChangeFreq::Monthly),
    ("url", "0.8", ChangeFreq::Monthly),
    ("json", "0.8", ChangeFreq::Monthly),
    ("json-escape", "0.8", ChangeFreq::Monthly),
    ("regex", "0.8", ChangeFreq::Monthly),
    ("jwt", "0.8", ChangeFreq::Monthly),
    ("jwt-rsa", "0.8", ChangeFreq::Monthly),
    ("hex", "0.8", ChangeFreq::Monthly),
    ("hash", "0.8", ChangeFreq::Monthly),
    ("uuid", "0.8", ChangeFreq::Monthly),
];

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    route: Vec<RawRoute>,
    #[serde(default)]
    theme: Option<RawTheme>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRoute {
    path: String,
    priority: RawPriority,
    changefreq: String,
}

/// Priority may be written as a string ("0.8") or a bare TOML float (0.8)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPriority {
    Text(String),
    Number(f64),
}

impl RawPriority {
    fn into_literal(self) -> String {
        match self {
            RawPriority::Text(s) => s,
            RawPriority::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTheme {
    dark_mode: Option<DarkMode>,
    content: Option<Vec<String>>,
    preset: Option<Vec<ThemePreset>>,
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let url = SiteUrl::parse(&raw.site.url).map_err(|e| field_error("site.url", e))?;

    let mut seen = HashSet::new();
    let routes: Result<Vec<RouteEntry>> = raw
        .route
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let field = format!("route[{}]", i);

            let path = validate_route_path(&r.path, &format!("{}.path", field))?;
            if !seen.insert(path.clone()) {
                return Err(Error::ConfigParse(format!(
                    "Duplicate path in '{}.path': '{}'",
                    field, path
                )));
            }

            let priority = Priority::parse(&r.priority.into_literal())
                .map_err(|e| field_error(&format!("{}.priority", field), e))?;
            let changefreq = r
                .changefreq
                .parse::<ChangeFreq>()
                .map_err(|e| field_error(&format!("{}.changefreq", field), e))?;

            Ok(RouteEntry {
                path,
                priority,
                changefreq,
            })
        })
        .collect();

    let theme = match raw.theme {
        Some(t) => build_theme(t)?,
        None => ThemeConfig::default(),
    };

    Ok(SiteConfig {
        url,
        routes: routes?,
        theme,
    })
}

/// Configuration of the deployed developer-tools site
pub fn builtin_site_config() -> Result<SiteConfig> {
    parse_site_toml_str(&default_site_toml(DEFAULT_SITE_URL))
}

/// Render a commented site.toml carrying the default routes and theme.
///
/// The `url` is escaped for a TOML basic string; it is validated when the
/// result is parsed, not here.
pub fn default_site_toml(url: &str) -> String {
    let mut toml = format!(
        "# Site origin, no trailing slash. Must match the deployed origin exactly.\n\
[site]\n\
url = \"{}\"\n\
\n\
# One entry per published page, in sitemap order.\n\
# Keep this list in sync with the site's routes (check with `devtools-web validate --pages`).\n\
\n",
        toml_escape_string(url)
    );

    for (path, priority, changefreq) in DEFAULT_ROUTES {
        toml.push_str("[[route]]\n");
        toml.push_str(&format!("path = \"{}\"\n", toml_escape_string(path)));
        toml.push_str(&format!("priority = \"{}\"\n", priority));
        toml.push_str(&format!("changefreq = \"{}\"\n", changefreq));
        toml.push('\n');
    }

    let theme = ThemeConfig::default();
    toml.push_str("# Handed to the styling build plugin as theme.config.json\n");
    toml.push_str("[theme]\n");
    toml.push_str("dark_mode = \"class\"  # or \"media\"\n");
    toml.push_str("content = [\n");
    for glob in &theme.content {
        toml.push_str(&format!("    \"{}\",\n", toml_escape_string(glob)));
    }
    toml.push_str("]\n");
    for preset in &theme.presets {
        toml.push_str("\n[[theme.preset]]\n");
        toml.push_str(&format!("name = \"{}\"\n", toml_escape_string(&preset.name)));
        toml.push_str(&format!("enhancements = {}\n", preset.enhancements));
    }

    toml
}

fn build_theme(raw: RawTheme) -> Result<ThemeConfig> {
    let defaults = ThemeConfig::default();

    let content = raw.content.unwrap_or(defaults.content);
    if content.is_empty() {
        return Err(Error::ConfigParse(
            "'theme.content' needs at least one glob".to_string(),
        ));
    }
    if let Some(i) = content.iter().position(|g| g.trim().is_empty()) {
        return Err(Error::ConfigParse(format!(
            "Empty glob in 'theme.content[{}]'",
            i
        )));
    }

    let presets = raw.preset.unwrap_or(defaults.presets);
    if presets.is_empty() {
        return Err(Error::ConfigParse(
            "'theme.preset' needs at least one named preset".to_string(),
        ));
    }
    if let Some(i) = presets.iter().position(|p| p.name.trim().is_empty()) {
        return Err(Error::ConfigParse(format!(
            "Empty name in 'theme.preset[{}].name'",
            i
        )));
    }

    Ok(ThemeConfig {
        dark_mode: raw.dark_mode.unwrap_or(defaults.dark_mode),
        content,
        presets,
    })
}

/// Validate a site-relative route path.
///
/// Accepts the empty string (site root) and slash-separated segments.
/// Rejects:
/// - a leading `/` (paths are joined onto the origin with a single slash)
/// - empty, `.` or `..` segments
/// - anything outside the URL path characters of RFC 3986: control
///   characters, whitespace, `?`, `#`, and non-ASCII (percent-encode it)
///
/// ```text
/// validate_route_path("", "path")            → Ok("")
/// validate_route_path("jwt-rsa", "path")     → Ok("jwt-rsa")
/// validate_route_path("/base64", "path")     → Err("Leading slash ...")
/// validate_route_path("tools//hex", "path")  → Err("Empty segment ...")
/// ```
fn validate_route_path(path: &str, field_name: &str) -> Result<String> {
    if path.is_empty() {
        return Ok(String::new());
    }

    if path.starts_with('/') {
        return Err(Error::ConfigParse(format!(
            "Leading slash not allowed in '{}': '{}'. Use \"\" for the site root.",
            field_name, path
        )));
    }

    if let Some(c) = path
        .chars()
        .find(|c| !is_path_char(*c))
    {
        return Err(Error::ConfigParse(format!(
            "Character {:?} not allowed in '{}': '{}'",
            c, field_name, path
        )));
    }

    for segment in path.split('/') {
        match segment {
            "" => {
                return Err(Error::ConfigParse(format!(
                    "Empty segment in '{}': '{}'",
                    field_name, path
                )));
            }
            "." | ".." => {
                return Err(Error::ConfigParse(format!(
                    "Relative segment '{}' not allowed in '{}': '{}'",
                    segment, field_name, path
                )));
            }
            _ => {}
        }
    }

    Ok(path.to_string())
}

/// Unreserved, sub-delims, `:`, `@`, `/` and `%` for percent-encoded bytes
fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';'
                | '=' | ':' | '@' | '/' | '%'
        )
}

fn field_error(field: &str, err: Error) -> Error {
    match err {
        Error::InvalidData(msg) => Error::ConfigParse(format!("'{}': {}", field, msg)),
        other => other,
    }
}

/// Escape a string for a TOML basic string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
