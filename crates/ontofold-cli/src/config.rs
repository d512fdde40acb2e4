//! Configuration file loading for the CLI
//!
//! This module finds and loads the TOML configuration file from the
//! explicit path, the local directory or the platform config directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use ontofold::{OntofoldError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for OntofoldError {
    fn from(err: ConfigError) -> Self {
        OntofoldError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (ontofold/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, OntofoldError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("ontofold/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "ontofold", "ontofold") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - The attribute height is negative or not finite
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, OntofoldError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let height = config.abstraction().attribute_height();
    if !height.is_finite() || height < 0.0 {
        return Err(ConfigError::Validation(format!(
            "attribute_height must be a non-negative number, got {height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use ontofold::options::AbstractionRule;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config");
        file
    }

    #[test]
    fn test_load_explicit_config() {
        let file = config_file(
            r#"
[abstraction]
attribute_height = 32.5
default_rule = "hierarchy"
"#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.abstraction().attribute_height(), 32.5);
        assert_eq!(
            config.abstraction().default_rule(),
            AbstractionRule::Hierarchy
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = config_file("[abstraction]\ndefault_rule = \"aspects\"\n");

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.abstraction().attribute_height(), 20.0);
        assert_eq!(config.abstraction().default_rule(), AbstractionRule::Aspects);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let result = load_config(Some("does/not/exist.toml"));
        match result {
            Err(OntofoldError::Io(err)) => {
                assert!(err.to_string().contains("Missing configuration file"));
            }
            other => panic!("expected a missing file error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let file = config_file("[abstraction\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_unknown_rule_is_error() {
        let file = config_file("[abstraction]\ndefault_rule = \"everything\"\n");
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_negative_height_fails_validation() {
        let file = config_file("[abstraction]\nattribute_height = -4.0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("attribute_height"));
    }
}
