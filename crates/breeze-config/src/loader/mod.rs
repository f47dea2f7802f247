//! Configuration file discovery and loading

use camino::{Utf8Path, Utf8PathBuf};
use breeze_core::error::BreezeError;
use tracing::{debug, info};

use crate::{raw::RawConfig, ConfigResult};

/// Preferred configuration file name
pub const TOML_CONFIG_FILE: &str = "breeze.toml";

/// JSON configuration file name, used when no breeze.toml exists
pub const JSON_CONFIG_FILE: &str = "breeze.config.json";

/// Main configuration loading interface
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Where a configuration was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// breeze.toml (or any non-JSON file given explicitly)
    Toml(Utf8PathBuf),
    /// breeze.config.json (or any *.json file given explicitly)
    Json(Utf8PathBuf),
}

impl ConfigSource {
    /// Pick the format from the file extension
    pub fn for_path(path: Utf8PathBuf) -> Self {
        if path.extension() == Some("json") {
            ConfigSource::Json(path)
        } else {
            ConfigSource::Toml(path)
        }
    }

    /// Path of the configuration file
    pub fn path(&self) -> &Utf8Path {
        match self {
            ConfigSource::Toml(path) | ConfigSource::Json(path) => path,
        }
    }

    /// Directory containing the configuration file
    pub fn dir(&self) -> &Utf8Path {
        self.path().parent().unwrap_or_else(|| Utf8Path::new("."))
    }

    /// Read and parse the file
    pub async fn load(&self) -> ConfigResult<RawConfig> {
        let path = self.path();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BreezeError::io(format!("Failed to read {}", path), e))?;

        match self {
            ConfigSource::Toml(_) => crate::toml::parse_toml_config(&content, path.as_str()),
            ConfigSource::Json(_) => crate::json::parse_json_config(&content, path.as_str()),
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Create a loader from a std path, which must be valid UTF-8
    pub fn from_std(cwd: std::path::PathBuf) -> ConfigResult<Self> {
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| BreezeError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory is not valid UTF-8: {}", e),
        })?;
        Ok(Self::new(cwd))
    }

    /// Working directory the loader searches from
    pub fn cwd(&self) -> &Utf8Path {
        &self.cwd
    }

    /// Find a configuration file (walks up directory tree, TOML before JSON)
    pub fn find_config_file(&self) -> Option<ConfigSource> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let toml_path = dir.join(TOML_CONFIG_FILE);
            if toml_path.is_file() {
                return Some(ConfigSource::Toml(toml_path));
            }

            let json_path = dir.join(JSON_CONFIG_FILE);
            if json_path.is_file() {
                return Some(ConfigSource::Json(json_path));
            }

            current = dir.parent();
        }

        None
    }

    /// Load project configuration, searching upwards from the working directory
    pub async fn load_project_config(&self) -> ConfigResult<(RawConfig, ConfigSource)> {
        let source = self.find_config_file().ok_or_else(|| BreezeError::ConfigNotFound {
            dir: self.cwd.to_string(),
        })?;

        info!(path = %source.path(), "loading configuration");
        let config = source.load().await?;
        Ok((config, source))
    }

    /// Load a configuration file given explicitly (relative to the working directory)
    pub async fn load_file(&self, path: &Utf8Path) -> ConfigResult<(RawConfig, ConfigSource)> {
        let source = ConfigSource::for_path(self.cwd.join(path));

        info!(path = %source.path(), "loading configuration");
        let config = source.load().await?;
        Ok((config, source))
    }

    /// Directory that content patterns resolve against
    pub fn content_root(&self, config: &RawConfig, source: &ConfigSource) -> Utf8PathBuf {
        let root = if config.content_is_relative() {
            source.dir().to_path_buf()
        } else {
            self.cwd.clone()
        };
        debug!(root = %root, relative = config.content_is_relative(), "content root");
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, temp_path)
    }

    #[tokio::test]
    async fn test_find_config_walks_up() {
        let (_guard, temp_path) = utf8_temp_dir();
        tokio::fs::write(temp_path.join(TOML_CONFIG_FILE), "content = []").await.unwrap();
        let nested = temp_path.join("src").join("ui");
        tokio::fs::create_dir_all(&nested).await.unwrap();

        let loader = ConfigLoader::new(nested);
        let source = loader.find_config_file().unwrap();

        assert_eq!(source, ConfigSource::Toml(temp_path.join(TOML_CONFIG_FILE)));
        assert_eq!(source.dir(), temp_path.as_path());
    }

    #[tokio::test]
    async fn test_toml_preferred_over_json() {
        let (_guard, temp_path) = utf8_temp_dir();
        tokio::fs::write(temp_path.join(TOML_CONFIG_FILE), "content = [\"a.html\"]").await.unwrap();
        tokio::fs::write(temp_path.join(JSON_CONFIG_FILE), "{\"content\": [\"b.html\"]}").await.unwrap();

        let loader = ConfigLoader::new(temp_path);
        let (config, source) = loader.load_project_config().await.unwrap();

        assert!(matches!(source, ConfigSource::Toml(_)));
        assert_eq!(config.content_patterns(), ["a.html"]);
    }

    #[tokio::test]
    async fn test_json_fallback() {
        let (_guard, temp_path) = utf8_temp_dir();
        let json = r##"{"content": {"files": ["*.html"]}, "theme": {"extend": {"colors": {"black": "#1b1b1b"}}}}"##;
        tokio::fs::write(temp_path.join(JSON_CONFIG_FILE), json).await.unwrap();

        let loader = ConfigLoader::new(temp_path);
        let (config, source) = loader.load_project_config().await.unwrap();

        assert!(matches!(source, ConfigSource::Json(_)));
        assert_eq!(config.content_patterns(), ["*.html"]);
    }

    #[tokio::test]
    async fn test_missing_config() {
        let (_guard, temp_path) = utf8_temp_dir();
        let loader = ConfigLoader::new(temp_path.join("no-config-here"));

        // A parent of the temp dir could in theory hold a breeze.toml; only
        // assert the error shape when nothing was found.
        if loader.find_config_file().is_none() {
            let err = loader.load_project_config().await.unwrap_err();
            assert!(matches!(err, BreezeError::ConfigNotFound { .. }));
        }
    }

    #[tokio::test]
    async fn test_load_explicit_file_by_extension() {
        let (_guard, temp_path) = utf8_temp_dir();
        tokio::fs::write(temp_path.join("custom.json"), "{\"content\": [\"x.html\"]}").await.unwrap();

        let loader = ConfigLoader::new(temp_path.clone());
        let (config, source) = loader.load_file(Utf8Path::new("custom.json")).await.unwrap();

        assert_eq!(source, ConfigSource::Json(temp_path.join("custom.json")));
        assert_eq!(config.content_patterns(), ["x.html"]);
    }

    #[tokio::test]
    async fn test_load_explicit_missing_file_is_io_error() {
        let (_guard, temp_path) = utf8_temp_dir();
        let loader = ConfigLoader::new(temp_path);
        let err = loader.load_file(Utf8Path::new("absent.toml")).await.unwrap_err();
        assert!(matches!(err, BreezeError::Io { .. }));
    }

    #[test]
    fn test_content_root_relative_flag() {
        let loader = ConfigLoader::new(Utf8PathBuf::from("/work"));
        let source = ConfigSource::Toml(Utf8PathBuf::from("/work/site/breeze.toml"));

        let plain: RawConfig = serde_json::from_str(r#"{"content": ["*.html"]}"#).unwrap();
        assert_eq!(loader.content_root(&plain, &source), Utf8PathBuf::from("/work"));

        let relative: RawConfig =
            serde_json::from_str(r#"{"content": {"files": ["*.html"], "relative": true}}"#).unwrap();
        assert_eq!(loader.content_root(&relative, &source), Utf8PathBuf::from("/work/site"));
    }
}
