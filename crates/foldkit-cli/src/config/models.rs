use foldkit::core::models::measurement::LengthUnit;
use foldkit::engine::config::{FoldConfig, ValidationPolicy};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPreset {
    /// 10 to 1200 residues, unknown residues rejected.
    Strict,
    /// No length bounds, unknown residues replaced with 'X'.
    Permissive,
}

impl ValidationPreset {
    pub fn policy(self) -> ValidationPolicy {
        match self {
            ValidationPreset::Strict => ValidationPolicy::strict(),
            ValidationPreset::Permissive => ValidationPolicy::permissive(),
        }
    }
}

impl std::str::FromStr for ValidationPreset {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ValidationPreset::Strict),
            "permissive" => Ok(ValidationPreset::Permissive),
            other => Err(format!(
                "unknown preset '{}'. Expected 'strict' or 'permissive'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fold: FoldConfig,
    pub unit: LengthUnit,
    pub remote_timeout: Duration,
}
