use std::fs;
use std::path::{Path, PathBuf};

use fieldgate_spec::{ContainerDefinition, DefinitionError, EvaluatorConfig};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path} is not a valid config: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{path}: {source}")]
    Definition {
        path: PathBuf,
        source: DefinitionError,
    },
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_json(path: &Path) -> Result<Value, LoadError> {
    let raw = read(path)?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_definition(path: &Path) -> Result<ContainerDefinition, LoadError> {
    let raw = read(path)?;
    ContainerDefinition::from_json_str(&raw).map_err(|source| LoadError::Definition {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an evaluator config; no path means defaults.
pub fn load_config(path: Option<&Path>) -> Result<EvaluatorConfig, LoadError> {
    let Some(path) = path else {
        return Ok(EvaluatorConfig::default());
    };
    let raw = read(path)?;
    toml::from_str(&raw).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fieldgate.toml");
        fs::write(&path, "relation_separator = \"::\"\n").expect("write config");

        let config = load_config(Some(path.as_path())).expect("config");
        assert_eq!(config.relation_separator, "::");
        assert_eq!(config.required_marker_prefix, "sometimes:required:");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_json(Path::new("/nonexistent/record.json")).expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/record.json"));
    }
}
