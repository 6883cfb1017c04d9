//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>` if given, else `$XDG_CONFIG_HOME/treemenu/treemenu.toml`
//! 3. Environment variables: `TREEMENU_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;

/// How trees are rendered by the interactive menu.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// One value per line, indented by one space per level
    #[default]
    Indent,
    /// Box-drawing connectors
    Pretty,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub style: DisplayStyle,
    /// Colored notices (NO_COLOR / CLICOLOR are honoured as well)
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            style: DisplayStyle::Indent,
            color: true,
        }
    }
}

/// Unified configuration for treemenu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Value of the root node the session starts with
    pub root: String,
    pub display: DisplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: "A".into(),
            display: DisplaySettings::default(),
        }
    }
}

/// Get the XDG config directory for treemenu.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treemenu").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treemenu.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
///
/// Unset variables leave the path as given.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_path` - Explicit config file; must exist. Without it the
    ///   global config file is used if present.
    #[instrument(level = "debug")]
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("root", defaults.root.clone())
            .map_err(config_err)?
            .set_default("display.style", "indent")
            .map_err(config_err)?
            .set_default("display.color", defaults.display.color)
            .map_err(config_err)?;

        match config_path {
            Some(path) => {
                let path = expand_path(path);
                if !path.is_file() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                debug!("Using config file: {}", path.display());
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("Using global config file: {}", global_path.display());
                        builder = builder.add_source(File::from(global_path).required(false));
                    }
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TREEMENU")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treemenu configuration
#
# Locations (by precedence, lowest to highest):
#   File: --config <path>, or ~/.config/treemenu/treemenu.toml
#   Env:  TREEMENU_* environment variables, e.g. TREEMENU_DISPLAY__STYLE=pretty

# Value of the root node the menu starts with
# root = "A"

[display]
# "indent" (one space per level) or "pretty" (box-drawing connectors)
# style = "indent"

# Colored notices
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_then_root_is_a_and_indent_style() {
        let settings = Settings::default();
        assert_eq!(settings.root, "A");
        assert_eq!(settings.display.style, DisplayStyle::Indent);
        assert!(settings.display.color);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("parse template");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips() {
        let settings = Settings {
            root: "root".to_string(),
            display: DisplaySettings {
                style: DisplayStyle::Pretty,
                color: false,
            },
        };
        let toml = settings.to_toml().expect("serialize");
        assert!(toml.contains("style = \"pretty\""));
        let parsed: Settings = toml::from_str(&toml).expect("parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_tilde_path_when_expanded_then_starts_with_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/treemenu.toml"));
        assert!(expanded.starts_with(&home));
        assert!(!expanded.to_string_lossy().contains('~'));
    }
}
