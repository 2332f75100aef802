//! Configuration schema (pdm2.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when the report file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Prompt on the terminal; only an explicit "n" declines
    #[default]
    Ask,

    /// Overwrite without asking
    Always,

    /// Never touch an existing report
    Never,
}

impl std::fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ask => write!(f, "ask"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Overwrite policy for an existing report
    #[serde(default)]
    pub overwrite: OverwritePolicy,

    /// Directory receiving the report; the working directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from TOML file
    ///
    /// A relative `output_dir` is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut config = Self::from_toml(&contents)?;

        if let (Some(dir), Some(parent)) = (config.output_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = parent.join(&*dir);
            }
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.overwrite, OverwritePolicy::Ask);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn full_toml() {
        let config = Config::from_toml(
            r#"
            overwrite = "always"
            output_dir = "docs"
            "#,
        )
        .unwrap();

        assert_eq!(config.overwrite, OverwritePolicy::Always);
        assert_eq!(config.output_dir, Some(PathBuf::from("docs")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("overwrites = \"never\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_policy_is_rejected() {
        assert!(Config::from_toml("overwrite = \"sometimes\"").is_err());
    }

    #[test]
    fn missing_file() {
        let err = Config::from_file(Path::new("does/not/exist/pdm2.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn policy_display() {
        assert_eq!(OverwritePolicy::Never.to_string(), "never");
    }
}
