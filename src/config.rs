//! Configuration handling for mdtemplate.
//! Loads the optional `mdtemplate.json` / `mdtemplate.yml` / `mdtemplate.yaml` file
//! that controls unit naming and the Markdown converter.

use crate::constants::{CONFIG_FILES, DEFAULT_SUFFIX};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Suffix stripped from base file names to derive template names.
    pub suffix: String,
    /// Options handed to the Markdown converter.
    pub markdown: MarkdownOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self { suffix: DEFAULT_SUFFIX.to_string(), markdown: MarkdownOptions::default() }
    }
}

/// Markdown converter switches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownOptions {
    /// Substitute typographic quotes, dashes and ellipses.
    pub smart: bool,
    /// Pass raw HTML through instead of omitting it.
    pub unsafe_html: bool,
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
    pub footnotes: bool,
    /// Render soft line breaks as `<br />`.
    pub hardbreaks: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            smart: true,
            unsafe_html: true,
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            hardbreaks: false,
        }
    }
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigurationError` if the content is neither valid JSON nor valid YAML
///   for the configuration schema
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content).map_err(|e| {
            Error::ConfigurationError(format!("invalid configuration format: {e}"))
        }),
    }
}

/// Loads the configuration from an explicit file.
///
/// # Errors
/// * `Error::ConfigurationError` if the file does not exist or cannot be parsed
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigurationError(format!(
            "configuration file '{}' does not exist",
            path.display()
        )));
    }
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Looks for one of the known configuration files in `dir`.
///
/// Returns the default configuration when none of them exists.
pub fn load_config<P: AsRef<Path>>(dir: P) -> Result<Config> {
    for file in CONFIG_FILES {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            return load_config_file(&config_path);
        }
    }

    debug!("No configuration file found (tried: {}), using defaults", CONFIG_FILES.join(", "));
    Ok(Config::default())
}
