//! Configuration for advisor page builds.
//!
//! Parses `advisor.toml` with serde and discovers it in the current directory
//! or its parents. CLI flags are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `build.output_dir`
//! - `edit.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "advisor.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the related-content sections flag.
    pub related_content: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stream: StreamSettings,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildSettingsRaw,
    pub edit: EditSettings,
    pub sections: SectionsSettings,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Which entities the content stream selects.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Stream identifier.
    pub id: String,
    pub entity_types: Vec<String>,
    pub saved_filter_ids: Vec<String>,
    /// Locales pages are generated for; the first is the default.
    pub locales: Vec<String>,
    /// Generate pages for the primary profile only.
    pub primary: bool,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            id: "my-stream-id-1".to_owned(),
            entity_types: vec!["financialProfessional".to_owned()],
            saved_filter_ids: vec!["1306250257".to_owned()],
            locales: vec!["en".to_owned()],
            primary: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildSettingsRaw {
    output_dir: Option<String>,
    stylesheet: Option<String>,
}

/// Resolved build configuration.
#[derive(Debug, Default)]
pub struct BuildSettings {
    /// Directory pages and `_redirects` are written to.
    pub output_dir: PathBuf,
    /// Stylesheet path relative to the site root.
    pub stylesheet: Option<String>,
}

/// Edit link shown on preview deployments.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// Entity editor URL; the entity id is appended as `?entityIds=`.
    pub base_url: String,
    /// Substring of the page URL that marks a preview deployment.
    pub preview_marker: String,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            base_url: "https://sandbox.yext.com/s/3194448/entity/edit3".to_owned(),
            preview_marker: "preview".to_owned(),
        }
    }
}

/// Optional page sections.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SectionsSettings {
    /// Render blogs, client stories, insights, FAQs and solutions.
    pub related_content: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`edit.base_url`").
        field: String,
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_entries(values: &[String], field: &str) -> Result<(), ConfigError> {
    if values.iter().all(String::is_empty) {
        return Err(ConfigError::Validation(format!(
            "{field} must list at least one value"
        )));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `advisor.toml` in the current directory and parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing,
    /// expansion or validation fails.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(related_content) = settings.related_content {
            self.sections.related_content = related_content;
        }
    }

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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            stream: StreamSettings::default(),
            build: BuildSettingsRaw::default(),
            edit: EditSettings::default(),
            sections: SectionsSettings::default(),
            build_resolved: BuildSettings {
                output_dir: base.join("dist"),
                stylesheet: None,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Paths may come from the environment, so expand first
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.stream.id, "stream.id")?;
        require_entries(&self.stream.entity_types, "stream.entity_types")?;
        require_entries(&self.stream.locales, "stream.locales")?;
        require_non_empty(&self.edit.base_url, "edit.base_url")?;
        require_http_url(&self.edit.base_url, "edit.base_url")?;
        require_non_empty(&self.edit.preview_marker, "edit.preview_marker")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.edit.base_url = expand::expand_env(&self.edit.base_url, "edit.base_url")?;
        if let Some(ref dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(dir, "build.output_dir")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildSettings {
            output_dir: config_dir.join(self.build.output_dir.as_deref().unwrap_or("dist")),
            stylesheet: self.build.stylesheet.clone().filter(|s| !s.is_empty()),
        };
    }
}
