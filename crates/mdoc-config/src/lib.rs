//! Configuration management for mdoc.
//!
//! Parses `mdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.chrome_path`
//! - `render.mermaid_script`
//! - `render.katex_script`
//! - `render.katex_stylesheet`
//! - `export.pandoc_path`
//! - `export.format`
//! - `export.extra_args` (each entry)
//!
//! Every unset reference is reported at once in [`ConfigError::EnvVar`].

mod expand;

pub use expand::UnsetVar;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdoc.toml";

/// Default Mermaid library location.
pub const DEFAULT_MERMAID_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Default `KaTeX` library location.
pub const DEFAULT_KATEX_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js";

/// Default `KaTeX` stylesheet location.
pub const DEFAULT_KATEX_STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the Chrome/Chromium executable.
    pub chrome_path: Option<PathBuf>,
    /// Override the pandoc executable.
    pub pandoc_path: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Rasterizer settings as written in TOML.
    render: RenderConfigRaw,
    /// Image output settings.
    pub images: ImagesConfig,
    /// Document export settings.
    pub export: ExportConfig,

    /// Resolved rasterizer configuration (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw render configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RenderConfigRaw {
    chrome_path: Option<String>,
    diagram_timeout_ms: Option<u64>,
    math_timeout_ms: Option<u64>,
    mermaid_theme: Option<String>,
    mermaid_script: Option<String>,
    katex_script: Option<String>,
    katex_stylesheet: Option<String>,
}

/// Resolved rasterizer configuration.
///
/// Script and stylesheet locations are either `http(s)://` URLs or absolute
/// paths to local files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Chrome/Chromium executable (auto-detected when `None`).
    pub chrome_path: Option<PathBuf>,
    /// How long to wait for a rendered diagram to appear.
    pub diagram_timeout: Duration,
    /// How long to wait for an equation page to finish loading.
    pub math_timeout: Duration,
    /// Mermaid theme name.
    pub mermaid_theme: String,
    /// Mermaid library location.
    pub mermaid_script: String,
    /// `KaTeX` library location.
    pub katex_script: String,
    /// `KaTeX` stylesheet location.
    pub katex_stylesheet: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            diagram_timeout: Duration::from_millis(5000),
            math_timeout: Duration::from_millis(10_000),
            mermaid_theme: "default".to_owned(),
            mermaid_script: DEFAULT_MERMAID_SCRIPT.to_owned(),
            katex_script: DEFAULT_KATEX_SCRIPT.to_owned(),
            katex_stylesheet: DEFAULT_KATEX_STYLESHEET.to_owned(),
        }
    }
}

/// Where rendered images go in file mode.
///
/// Both directories are relative to the output document's directory.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ImagesConfig {
    /// Directory for `diagram_NNN.png` files.
    pub diagram_dir: String,
    /// Directory for `eq_display_NNN.png` / `eq_inline_NNN.png` files.
    pub equation_dir: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            diagram_dir: "mermaid_diagrams".to_owned(),
            equation_dir: "latex_equations".to_owned(),
        }
    }
}

/// Document export configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Pandoc executable name or path.
    pub pandoc_path: String,
    /// Pandoc output format (writer name).
    pub format: String,
    /// Extra arguments appended to the pandoc command line.
    pub extra_args: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pandoc_path: "pandoc".to_owned(),
            format: "docx".to_owned(),
            extra_args: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Referenced environment variables are not set.
    #[error("Unset environment variables: {}", join_unset(.0))]
    EnvVar(Vec<UnsetVar>),
}

fn join_unset(unset: &[UnsetVar]) -> String {
    unset
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an image directory to stay below the output directory.
fn require_relative_dir(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    let path = Path::new(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path without '..'"
        )));
    }
    Ok(())
}

/// Whether a script location is a remote URL rather than a file.
fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdoc.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(chrome_path) = &settings.chrome_path {
            self.render_resolved.chrome_path = Some(chrome_path.clone());
        }
        if let Some(pandoc_path) = &settings.pandoc_path {
            self.export.pandoc_path.clone_from(pandoc_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        require_relative_dir(&self.images.diagram_dir, "images.diagram_dir")?;
        require_relative_dir(&self.images.equation_dir, "images.equation_dir")?;
        require_non_empty(&self.export.pandoc_path, "export.pandoc_path")?;
        require_non_empty(&self.export.format, "export.format")?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        let render = &self.render_resolved;
        if render.diagram_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "render.diagram_timeout_ms must be greater than 0".to_owned(),
            ));
        }
        if render.math_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "render.math_timeout_ms must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&render.mermaid_theme, "render.mermaid_theme")?;
        require_non_empty(&render.mermaid_script, "render.mermaid_script")?;
        require_non_empty(&render.katex_script, "render.katex_script")?;
        require_non_empty(&render.katex_stylesheet, "render.katex_stylesheet")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.expand_with(expand::process_env)
    }

    fn expand_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let mut expansion = expand::EnvExpansion::new(lookup);
        let render = &mut self.render;
        expansion.optional("render.chrome_path", &mut render.chrome_path);
        expansion.optional("render.mermaid_script", &mut render.mermaid_script);
        expansion.optional("render.katex_script", &mut render.katex_script);
        expansion.optional("render.katex_stylesheet", &mut render.katex_stylesheet);

        let export = &mut self.export;
        expansion.string("export.pandoc_path", &mut export.pandoc_path);
        expansion.string("export.format", &mut export.format);
        expansion.list("export.extra_args", &mut export.extra_args);
        expansion.finish()
    }

    /// Fill [`RenderConfig`] from the raw section.
    ///
    /// Local script paths are resolved against the config directory; URLs
    /// pass through unchanged.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = RenderConfig::default();
        let raw = &self.render;
        let locate = |value: Option<&String>, default: String| match value {
            Some(v) if is_url(v) => v.clone(),
            Some(v) => config_dir.join(v).display().to_string(),
            None => default,
        };

        self.render_resolved = RenderConfig {
            chrome_path: raw.chrome_path.as_ref().map(|p| config_dir.join(p)),
            diagram_timeout: raw
                .diagram_timeout_ms
                .map_or(defaults.diagram_timeout, Duration::from_millis),
            math_timeout: raw
                .math_timeout_ms
                .map_or(defaults.math_timeout, Duration::from_millis),
            mermaid_theme: raw.mermaid_theme.clone().unwrap_or(defaults.mermaid_theme),
            mermaid_script: locate(raw.mermaid_script.as_ref(), defaults.mermaid_script),
            katex_script: locate(raw.katex_script.as_ref(), defaults.katex_script),
            katex_stylesheet: locate(raw.katex_stylesheet.as_ref(), defaults.katex_stylesheet),
        };
    }
}
