//! Configuration management for texsnap.
//!
//! Parses `texsnap.toml` configuration files with serde and provides
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
//! - `engine.command`
//! - `engine.args`
//! - `export.output_dir`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use texsnap_export::{ExportOptions, Scale};
use texsnap_svg::Rgb;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override typesetting engine program.
    pub engine_command: Option<String>,
    /// Override export scale.
    pub scale: Option<Scale>,
    /// Override text color.
    pub text_color: Option<Rgb>,
    /// Override background color.
    pub background_color: Option<Rgb>,
    /// Override transparent background flag.
    pub transparent: Option<bool>,
    /// Override download directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "texsnap.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Typesetting engine configuration.
    pub engine: EngineConfig,
    /// Export defaults as parsed from TOML.
    export: ExportConfigRaw,

    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// External typesetting engine configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program converting markup to SVG.
    pub command: String,
    /// Extra arguments placed before the markup.
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: "tex2svg".to_owned(),
            args: Vec::new(),
        }
    }
}

/// Raw export configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    scale: Option<u32>,
    text_color: Option<String>,
    background_color: Option<String>,
    transparent: Option<bool>,
    output_dir: Option<String>,
}

/// Resolved export configuration.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Initial export options.
    pub options: ExportOptions,
    /// Directory downloads are written to.
    pub output_dir: PathBuf,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`export.output_dir`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `texsnap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and resolution, allowing CLI
    /// arguments to take precedence over config file values.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let options = &mut self.export_resolved.options;
        if let Some(command) = &settings.engine_command {
            self.engine.command.clone_from(command);
        }
        if let Some(scale) = settings.scale {
            options.scale = scale;
        }
        if let Some(color) = settings.text_color {
            options.text_color = color;
        }
        if let Some(color) = settings.background_color {
            options.background_color = color;
        }
        if let Some(transparent) = settings.transparent {
            options.transparent = transparent;
        }
        if let Some(dir) = &settings.output_dir {
            self.export_resolved.output_dir.clone_from(dir);
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            engine: EngineConfig::default(),
            export: ExportConfigRaw::default(),
            export_resolved: ExportConfig {
                options: ExportOptions::default(),
                output_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
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
        if self.engine.command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "engine.command cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.engine.command = expand::expand_env(&self.engine.command, "engine.command")?;
        for arg in &mut self.engine.args {
            *arg = expand::expand_env(arg, "engine.args")?;
        }
        if let Some(ref dir) = self.export.output_dir {
            self.export.output_dir = Some(expand::expand_env(dir, "export.output_dir")?);
        }
        Ok(())
    }

    /// Parse raw export values and resolve the output directory.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let defaults = ExportOptions::default();

        let scale = match self.export.scale {
            Some(percent) => Scale::from_percent(percent)
                .map_err(|e| ConfigError::Validation(format!("export.scale: {e}")))?,
            None => defaults.scale,
        };
        let text_color = parse_color(self.export.text_color.as_deref(), "export.text_color")?
            .unwrap_or(defaults.text_color);
        let background_color =
            parse_color(self.export.background_color.as_deref(), "export.background_color")?
                .unwrap_or(defaults.background_color);

        self.export_resolved = ExportConfig {
            options: ExportOptions {
                scale,
                text_color,
                background_color,
                transparent: self.export.transparent.unwrap_or(defaults.transparent),
            },
            output_dir: config_dir.join(self.export.output_dir.as_deref().unwrap_or(".")),
        };
        Ok(())
    }
}

fn parse_color(value: Option<&str>, field: &str) -> Result<Option<Rgb>, ConfigError> {
    value
        .map(|v| {
            v.parse()
                .map_err(|e| ConfigError::Validation(format!("{field}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.engine.command, "tex2svg");
        assert!(config.engine.args.is_empty());
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/test"));
        assert_eq!(config.export_resolved.options, ExportOptions::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(Path::new("/project")).unwrap();
        assert_eq!(config.engine.command, "tex2svg");
        assert_eq!(config.export_resolved.options, ExportOptions::default());
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/project/."));
    }

    #[test]
    fn test_parse_export_config() {
        let toml = r##"
[engine]
command = "npx"
args = ["tex2svg"]

[export]
scale = 200
text_color = "#FF0000"
background_color = "#0f0"
transparent = false
output_dir = "images"
"##;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(config.engine.command, "npx");
        assert_eq!(config.engine.args, vec!["tex2svg".to_owned()]);
        let options = &config.export_resolved.options;
        assert_eq!(options.scale.percent(), 200);
        assert_eq!(options.text_color, Rgb::new(0xff, 0, 0));
        assert_eq!(options.background_color, Rgb::new(0, 0xff, 0));
        assert!(!options.transparent);
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/project/images")
        );
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let mut config: Config = toml::from_str("[export]\nscale = 0\n").unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("export.scale"));
    }

    #[test]
    fn test_oversized_scale_is_rejected() {
        let mut config: Config = toml::from_str("[export]\nscale = 1000000\n").unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();
        assert!(err.to_string().contains("from 50 to 500"));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let mut config: Config = toml::from_str("[export]\ntext_color = \"red\"\n").unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();
        assert!(err.to_string().contains("export.text_color"));
    }

    #[test]
    fn test_empty_engine_command_is_invalid() {
        let config: Config = toml::from_str("[engine]\ncommand = \"  \"\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            scale: Some(Scale::from_percent(300).unwrap()),
            background_color: Some(Rgb::new(1, 2, 3)),
            transparent: Some(false),
            output_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        let options = &config.export_resolved.options;
        assert_eq!(options.scale.percent(), 300);
        assert_eq!(options.background_color, Rgb::new(1, 2, 3));
        assert!(!options.transparent);
        assert_eq!(options.text_color, Rgb::BLACK); // Unchanged
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(config.engine.command, "tex2svg"); // Unchanged
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[export]\noutput_dir = \"${TEXSNAP_UNSET_LOAD_TEST:-renders}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path, Some(path.clone()));
        assert_eq!(
            config.export_resolved.output_dir,
            temp_dir.path().join("renders")
        );
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/texsnap.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
