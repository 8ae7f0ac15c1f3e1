use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "conf/model-properties.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Paths and knobs of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub train_ds_path: PathBuf,
    pub test_ds_path: PathBuf,
    pub output_path: PathBuf,
    /// Directory for dataset profiling reports; no reports when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
    /// Seed shared by the imputer draws and the classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Environment {
    #[serde(rename = "model-arguments")]
    model_arguments: PipelineConfig,
}

#[derive(Debug, Deserialize, Serialize)]
struct ConfigFile {
    environment: Environment,
}

impl PipelineConfig {
    pub fn new(
        train_ds_path: impl Into<PathBuf>,
        test_ds_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        PipelineConfig {
            train_ds_path: train_ds_path.into(),
            test_ds_path: test_ds_path.into(),
            output_path: output_path.into(),
            report_dir: None,
            seed: None,
        }
    }

    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = Some(dir.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse `{"environment": {"model-arguments": {...}}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Ok(file.environment.model_arguments)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render in the same nested shape `from_json` reads.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ConfigFile {
            environment: Environment {
                model_arguments: self.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{
            "environment": {
                "model-arguments": {
                    "train_ds_path": "data/input/train.csv",
                    "test_ds_path": "data/input/test.csv",
                    "output_path": "data/output/predictions.csv"
                }
            }
        }"#;
        let config = PipelineConfig::from_json(json).unwrap();
        assert_eq!(config.train_ds_path, PathBuf::from("data/input/train.csv"));
        assert_eq!(config.output_path, PathBuf::from("data/output/predictions.csv"));
        assert_eq!(config.report_dir, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model-properties.json");
        let config = PipelineConfig::new("train.csv", "test.csv", "out/predictions.csv")
            .with_report_dir("out/report")
            .with_seed(42);
        fs::write(&path, config.to_json().unwrap()).unwrap();

        assert_eq!(PipelineConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_key_and_missing_file() {
        let err = PipelineConfig::from_json(r#"{"environment": {"model-arguments": {}}}"#);
        assert!(err.is_err());

        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
