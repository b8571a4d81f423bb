/// Analyser configuration.
///
/// Resolved once per session instead of re-probing the environment on every
/// call. The file format is JSON; every field is optional and missing
/// fields take their defaults.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration version understood by this build.
pub const CONFIG_VERSION: u32 = 1;

/// Platform whose importer overrides are inspected by default.
pub const DEFAULT_PLATFORM: &str = "WebGL";

/// Model file extensions treated as models (lower-case, with dot).
pub const DEFAULT_MODEL_EXTENSIONS: [&str; 5] = [".fbx", ".dae", ".3ds", ".dxf", ".obj"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Schema version of this config.
    pub version: u32,
    /// Platform identifier passed to the attribute provider.
    pub platform: String,
    /// Keep `Packages/`-rooted paths in results.
    pub include_packages: bool,
    /// Extensions accepted by the model analysis.
    pub model_extensions: Vec<String>,
    /// Explicit editor log location. `None` uses the per-OS default.
    pub editor_log: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            platform: DEFAULT_PLATFORM.to_string(),
            include_packages: false,
            model_extensions: DEFAULT_MODEL_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            editor_log: None,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a config from JSON text, rejecting unknown versions.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The editor log to analyse: the explicit override, else the OS default.
    pub fn editor_log_path(&self) -> Option<PathBuf> {
        self.editor_log.clone().or_else(default_editor_log_path)
    }
}

/// Where the editor writes its log on this OS.
///
/// Returns `None` when the relevant environment variable is unset.
pub fn default_editor_log_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        let local = std::env::var_os("LOCALAPPDATA")?;
        Some(
            PathBuf::from(local)
                .join("Unity")
                .join("Editor")
                .join("Editor.log"),
        )
    } else if cfg!(target_os = "macos") {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join("Library")
                .join("Logs")
                .join("Unity")
                .join("Editor.log"),
        )
    } else {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("unity3d")
                .join("Editor.log"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_takes_defaults() {
        let config = AnalyzerConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.platform, "WebGL");
        assert!(!config.include_packages);
        assert_eq!(config.model_extensions.len(), 5);
    }

    #[test]
    fn fields_override_defaults() {
        let config = AnalyzerConfig::from_json(
            r#"{ "include_packages": true, "platform": "Android", "editor_log": "/tmp/Editor.log" }"#,
        )
        .unwrap();
        assert!(config.include_packages);
        assert_eq!(config.platform, "Android");
        assert_eq!(
            config.editor_log_path(),
            Some(PathBuf::from("/tmp/Editor.log"))
        );
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = AnalyzerConfig::from_json(r#"{ "version": 7 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion {
                found: 7,
                supported: 1
            }
        ));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = AnalyzerConfig::from_json(r#"{ "platfrom": "WebGL" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
