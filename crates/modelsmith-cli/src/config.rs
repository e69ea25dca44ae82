//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `MODELSMITH_SECTION__KEY`
//! 3. `.modelsmith.toml` in the current directory
//! 4. The `--config` file, or the user config file when present
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use modelsmith_adapters::source::{DEFAULT_API_URL, DEFAULT_RAW_URL};

/// File name of the per-directory config.
pub const LOCAL_CONFIG_FILE: &str = ".modelsmith.toml";

const ENV_PREFIX: &str = "MODELSMITH";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the model comes from.
    pub source: SourceConfig,
    /// Artifact cache.
    pub cache: CacheConfig,
    /// Model generation.
    pub generation: GenerationConfig,
    /// Consumer project scaffolding.
    pub scaffold: ScaffoldConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub owner: String,
    pub repository: String,
    /// Path of the XMI file inside the repository.
    pub artifact_path: String,
    pub api_url: String,
    pub raw_url: String,
    /// GitHub token; `GITHUB_TOKEN` is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory; the system temp dir is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Generated area, relative to the cache root unless absolute.
    pub base_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub project_prefix: String,
    pub output_dir: PathBuf,
    /// Directory copied as the project skeleton instead of the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton_dir: Option<PathBuf>,
    pub author_name: String,
    pub author_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: "FINTmodels".into(),
            repository: "fint-informasjonsmodell".into(),
            artifact_path: "FINT-informasjonsmodell.xml".into(),
            api_url: DEFAULT_API_URL.into(),
            raw_url: DEFAULT_RAW_URL.into(),
            token: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("fint-model"),
        }
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            project_prefix: "fint-consumer-".into(),
            output_dir: PathBuf::from("."),
            skeleton_dir: None,
            author_name: "modelsmith".into(),
            author_email: "scaffold@modelsmith.dev".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.
    /// Without it the user config file is read if present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::from(Self::config_path()).required(false)),
        };

        let config = builder
            .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.modelsmith.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "modelsmith", "modelsmith")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Effective cache directory.
    pub fn cache_root(&self) -> PathBuf {
        self.cache
            .root
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("modelsmith"))
    }

    /// Effective generated area.
    pub fn generated_area(&self) -> PathBuf {
        // `join` keeps an absolute base_path as is
        self.cache_root().join(&self.generation.base_path)
    }

    /// Token from config, then from `GITHUB_TOKEN`.
    pub fn token(&self) -> Option<String> {
        self.source
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_information_model() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.source.owner, "FINTmodels");
        assert_eq!(cfg.source.repository, "fint-informasjonsmodell");
        assert_eq!(cfg.source.artifact_path, "FINT-informasjonsmodell.xml");
        assert_eq!(cfg.scaffold.project_prefix, "fint-consumer-");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn cache_root_falls_back_to_temp_dir() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.cache_root(), std::env::temp_dir().join("modelsmith"));
        assert_eq!(
            cfg.generated_area(),
            std::env::temp_dir().join("modelsmith").join("fint-model")
        );
    }

    #[test]
    fn absolute_base_path_is_kept() {
        let mut cfg = AppConfig::default();
        cfg.cache.root = Some(PathBuf::from("/var/cache/ms"));
        cfg.generation.base_path = PathBuf::from("/srv/models");
        assert_eq!(cfg.generated_area(), PathBuf::from("/srv/models"));
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[source]\nowner = \"acme\"\n\n[cache]\nroot = \"/tmp/acme-cache\"\n"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.source.owner, "acme");
        // Untouched keys keep their defaults
        assert_eq!(cfg.source.repository, "fint-informasjonsmodell");
        assert_eq!(cfg.cache.root, Some(PathBuf::from("/tmp/acme-cache")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn defaults_serialize_to_toml() {
        let toml = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml.contains("[source]"));
        assert!(toml.contains("owner = \"FINTmodels\""));
        assert!(!toml.contains("token"));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
