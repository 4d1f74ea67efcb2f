use super::models::ValidationPreset;
use crate::error::{CliError, Result};
use foldkit::core::models::measurement::LengthUnit;
use foldkit::engine::config::UnknownResiduePolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileValidationConfig {
    pub preset: Option<ValidationPreset>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub unknown_residues: Option<UnknownResiduePolicy>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGenerationConfig {
    pub coords: Option<String>,
    pub seed: Option<u64>,
    pub chain_id: Option<char>,
    pub header: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileMeasurementConfig {
    pub unit: Option<LengthUnit>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRemoteConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub validation: Option<FileValidationConfig>,
    pub generation: Option<FileGenerationConfig>,
    pub measurement: Option<FileMeasurementConfig>,
    pub remote: Option<FileRemoteConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
