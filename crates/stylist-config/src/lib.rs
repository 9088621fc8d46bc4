//! Configuration management for Stylist.
//!
//! Parses `stylist.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [project]
//! name = "ol-react"
//! version = "2.1.0"
//!
//! [theme]
//! external_cross_links = "links.toml"
//! cross_links_dupe_warning = false
//! extra_css = "brand.css"
//!
//! [theme.classes]
//! container = "container-fluid"
//!
//! [output]
//! dir = "docs"
//! ```
//!
//! The theme keys also accept their camelCase spellings (`externalCrossLinks`,
//! `dumpAST`, `crossLinksDupeWarning`, `extraCss`).
//!
//! ## Environment Variable Expansion
//!
//! Every path value supports `${VAR}` and `${VAR:-default}`.

mod classes;
mod expand;
mod links;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use classes::ClassNames;
pub use links::ExternalLinks;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override raw input dump path.
    pub dump_ast: Option<PathBuf>,
    /// Override external link table path.
    pub external_cross_links: Option<PathBuf>,
    /// Override duplicate-name warning flag.
    pub cross_links_dupe_warning: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "stylist.toml";

/// File names of the built-in theme assets; overrides may not reuse them.
const RESERVED_ASSET_NAMES: &[&str] = &["index.html", "stylist.css", "stylist.js"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project metadata shown in the page header.
    pub project: ProjectConfig,
    /// Theme options (paths are relative strings from TOML).
    theme: ThemeConfigRaw,
    /// Output options (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved theme configuration (set after loading).
    #[serde(skip)]
    pub theme_resolved: ThemeConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Project metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Raw theme configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeConfigRaw {
    #[serde(alias = "externalCrossLinks")]
    external_cross_links: Option<String>,
    #[serde(alias = "dumpAST")]
    dump_ast: Option<String>,
    #[serde(alias = "crossLinksDupeWarning")]
    cross_links_dupe_warning: Option<bool>,
    css: Option<String>,
    #[serde(alias = "extraCss")]
    extra_css: Option<String>,
    classes: BTreeMap<String, String>,
}

/// Resolved theme configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// TOML table of names documented elsewhere.
    pub external_cross_links: Option<PathBuf>,
    /// Where to write the raw input tree before processing.
    pub dump_ast: Option<PathBuf>,
    /// Warn when a declaration name is not unique.
    pub cross_links_dupe_warning: bool,
    /// Stylesheet replacing the built-in one.
    pub css: Option<PathBuf>,
    /// Stylesheet loaded after the built-in one.
    pub extra_css: Option<PathBuf>,
    /// Class names with overrides applied.
    pub classes: ClassNames,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            external_cross_links: None,
            dump_ast: None,
            cross_links_dupe_warning: true,
            css: None,
            extra_css: None,
            classes: ClassNames::default(),
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Destination directory. `None` renders to a string instead.
    pub dir: Option<PathBuf>,
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
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_OUT`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
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
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `stylist.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir = Some(dir.clone());
        }
        if let Some(dump) = &settings.dump_ast {
            self.theme_resolved.dump_ast = Some(dump.clone());
        }
        if let Some(links) = &settings.external_cross_links {
            self.theme_resolved.external_cross_links = Some(links.clone());
        }
        if let Some(warn) = settings.cross_links_dupe_warning {
            self.theme_resolved.cross_links_dupe_warning = warn;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
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
        self.validate_output()?;
        self.validate_theme()?;
        Ok(())
    }

    fn validate_output(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output_resolved.dir
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "output.dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_theme(&self) -> Result<(), ConfigError> {
        let theme = &self.theme_resolved;
        for (field, path) in [("theme.css", &theme.css), ("theme.extra_css", &theme.extra_css)] {
            if let Some(path) = path
                && path.file_name().is_none()
            {
                return Err(ConfigError::Validation(format!(
                    "{field} must name a file, got {}",
                    path.display()
                )));
            }
        }

        if let Some(extra) = &theme.extra_css
            && let Some(name) = extra.file_name().and_then(|n| n.to_str())
            && RESERVED_ASSET_NAMES.contains(&name)
        {
            return Err(ConfigError::Validation(format!(
                "theme.extra_css cannot be named {name}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let theme = &mut self.theme;
        expand::expand_opt(&mut theme.external_cross_links, "theme.external_cross_links")?;
        expand::expand_opt(&mut theme.dump_ast, "theme.dump_ast")?;
        expand::expand_opt(&mut theme.css, "theme.css")?;
        expand::expand_opt(&mut theme.extra_css, "theme.extra_css")?;
        expand::expand_opt(&mut self.output.dir, "output.dir")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory and apply class
    /// overrides.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>| path.map(|p| config_dir.join(p));
        let theme = &self.theme;

        self.theme_resolved = ThemeConfig {
            external_cross_links: resolve(theme.external_cross_links.as_deref()),
            dump_ast: resolve(theme.dump_ast.as_deref()),
            cross_links_dupe_warning: theme.cross_links_dupe_warning.unwrap_or(true),
            css: resolve(theme.css.as_deref()),
            extra_css: resolve(theme.extra_css.as_deref()),
            classes: ClassNames::with_overrides(&theme.classes)?,
        };
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref()),
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.project.name.is_none());
        assert!(config.output_resolved.dir.is_none());
        assert!(config.theme_resolved.cross_links_dupe_warning);
        assert!(config.theme_resolved.external_cross_links.is_none());
        assert_eq!(config.theme_resolved.classes, ClassNames::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert!(config.output_resolved.dir.is_none());
        assert!(config.theme_resolved.cross_links_dupe_warning);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[project]
name = "ol-react"
version = "2.1.0"

[theme]
external_cross_links = "links.toml"
dump_ast = "build/ast.json"
cross_links_dupe_warning = false
css = "theme/main.css"
extra_css = "theme/brand.css"

[theme.classes]
container = "container-fluid"
mainItem = "card"

[output]
dir = "docs"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(config.project.name.as_deref(), Some("ol-react"));
        assert_eq!(config.project.version.as_deref(), Some("2.1.0"));
        let theme = &config.theme_resolved;
        assert_eq!(
            theme.external_cross_links,
            Some(PathBuf::from("/project/links.toml"))
        );
        assert_eq!(theme.dump_ast, Some(PathBuf::from("/project/build/ast.json")));
        assert!(!theme.cross_links_dupe_warning);
        assert_eq!(theme.css, Some(PathBuf::from("/project/theme/main.css")));
        assert_eq!(
            theme.extra_css,
            Some(PathBuf::from("/project/theme/brand.css"))
        );
        assert_eq!(theme.classes.container, "container-fluid");
        assert_eq!(theme.classes.main_item, "card");
        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/project/docs")));
    }

    #[test]
    fn test_parse_camel_case_aliases() {
        let toml = r#"
[theme]
externalCrossLinks = "links.toml"
dumpAST = "ast.json"
crossLinksDupeWarning = false
extraCss = "extra.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/p")).unwrap();

        let theme = &config.theme_resolved;
        assert_eq!(theme.external_cross_links, Some(PathBuf::from("/p/links.toml")));
        assert_eq!(theme.dump_ast, Some(PathBuf::from("/p/ast.json")));
        assert!(!theme.cross_links_dupe_warning);
        assert_eq!(theme.extra_css, Some(PathBuf::from("/p/extra.css")));
    }

    #[test]
    fn test_unknown_class_key_fails_resolution() {
        let toml = r#"
[theme.classes]
sidebar = "x"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/p")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let toml = r#"
[output]
dir = "/var/www/api"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/var/www/api")));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/out")),
            dump_ast: Some(PathBuf::from("/tmp/ast.json")),
            external_cross_links: Some(PathBuf::from("/links.toml")),
            cross_links_dupe_warning: Some(false),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/out")));
        assert_eq!(
            config.theme_resolved.dump_ast,
            Some(PathBuf::from("/tmp/ast.json"))
        );
        assert_eq!(
            config.theme_resolved.external_cross_links,
            Some(PathBuf::from("/links.toml"))
        );
        assert!(!config.theme_resolved.cross_links_dupe_warning);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.output_resolved.dir = Some(PathBuf::from("/docs"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/docs")));
        assert!(config.theme_resolved.cross_links_dupe_warning);
    }

    #[test]
    fn test_expand_env_vars_output_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("STYLIST_TEST_OUT", "/srv/site");
        }

        let toml = r#"
[output]
dir = "${STYLIST_TEST_OUT}/api"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/srv/site/api")));

        unsafe {
            std::env::remove_var("STYLIST_TEST_OUT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("STYLIST_TEST_NO_CSS");
        }

        let toml = r#"
[theme]
css = "${STYLIST_TEST_NO_CSS}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("theme.css"));
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_output_dir_empty() {
        let mut config = Config::default();
        config.output_resolved.dir = Some(PathBuf::new());
        assert_validation_error(&config, &["output.dir", "empty"]);
    }

    #[test]
    fn test_validate_extra_css_reserved_name() {
        let mut config = Config::default();
        config.theme_resolved.extra_css = Some(PathBuf::from("/theme/stylist.css"));
        assert_validation_error(&config, &["theme.extra_css", "stylist.css"]);
    }

    #[test]
    fn test_validate_css_must_name_file() {
        let mut config = Config::default();
        config.theme_resolved.css = Some(PathBuf::from("/"));
        assert_validation_error(&config, &["theme.css"]);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/stylist.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\ndir = \"site\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.output_resolved.dir, Some(dir.path().join("site")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[theme]\ncross_links_dupe_warning = true\n").unwrap();

        let settings = CliSettings {
            cross_links_dupe_warning: Some(false),
            ..Default::default()
        };
        let config = Config::load(Some(path.as_path()), Some(&settings)).unwrap();

        assert!(!config.theme_resolved.cross_links_dupe_warning);
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nested = dir.path().join("packages/ui");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
