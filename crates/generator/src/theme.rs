//! Styling plugin configuration.
//!
//! The styling build (an external Node toolchain) reads `theme.config.json`
//! and spreads it into its own config, so field names follow that
//! toolchain's camelCase conventions.

use anyhow::{Context, Result};
use devtools_web_core::{DarkMode, ThemeConfig};
use serde::Serialize;
use std::collections::BTreeMap;

pub const THEME_CONFIG_FILE: &str = "theme.config.json";

/// Plugin that receives the theme presets
const THEME_PLUGIN: &str = "skeleton";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StylingConfig<'a> {
    dark_mode: DarkMode,
    content: &'a [String],
    theme: ThemeSection,
    plugins: Vec<Plugin<'a>>,
}

#[derive(Serialize)]
struct ThemeSection {
    extend: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Plugin<'a> {
    name: &'static str,
    options: PluginOptions<'a>,
}

#[derive(Serialize)]
struct PluginOptions<'a> {
    themes: Themes<'a>,
}

#[derive(Serialize)]
struct Themes<'a> {
    preset: Vec<Preset<'a>>,
}

#[derive(Serialize)]
struct Preset<'a> {
    name: &'a str,
    enhancements: bool,
}

/// Render the theme configuration as pretty-printed JSON with a trailing newline.
pub fn render_theme_config(theme: &ThemeConfig) -> Result<String> {
    let config = StylingConfig {
        dark_mode: theme.dark_mode,
        content: &theme.content,
        theme: ThemeSection {
            extend: BTreeMap::new(),
        },
        plugins: vec![Plugin {
            name: THEME_PLUGIN,
            options: PluginOptions {
                themes: Themes {
                    preset: theme
                        .presets
                        .iter()
                        .map(|p| Preset {
                            name: &p.name,
                            enhancements: p.enhancements,
                        })
                        .collect(),
                },
            },
        }],
    };

    let mut json =
        serde_json::to_string_pretty(&config).context("Failed to serialize theme config")?;
    json.push('\n');
    Ok(json)
}
