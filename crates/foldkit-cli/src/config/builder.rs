use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileValidationConfig};
use super::models::{AppConfig, ValidationPreset};
use crate::error::{CliError, Result};
use crate::utils::parser;
use foldkit::core::models::measurement::LengthUnit;
use foldkit::engine::config::{
    FoldConfig, GenerationConfigBuilder, InputFormat, UnknownResiduePolicy, ValidationPolicy,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Explicit command-line flags; these win over `--set` values and the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub preset: Option<ValidationPreset>,
    pub three_letter: bool,
    pub coords: Option<String>,
    pub seed: Option<u64>,
    pub chain_id: Option<char>,
    pub unit: Option<String>,
}

pub fn build_config(
    config_path: Option<&Path>,
    set_values: &[String],
    overrides: &CliOverrides,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(path) = config_path {
        FileConfig::from_file(path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, set_values)?;

    let validation = merge_validation(
        file_config.validation.take().unwrap_or_default(),
        overrides.preset,
        &defaults,
    )?;

    let gen_file = file_config.generation.take().unwrap_or_default();
    let coords = overrides
        .coords
        .as_deref()
        .or(gen_file.coords.as_deref())
        .unwrap_or(defaults.coords.as_str());
    let policy =
        parser::parse_coordinate_policy(coords).map_err(|e| CliError::Argument(e.to_string()))?;

    let generation = GenerationConfigBuilder::new()
        .policy(policy)
        .seed(overrides.seed.or(gen_file.seed))
        .chain_id(
            overrides
                .chain_id
                .or(gen_file.chain_id)
                .unwrap_or(defaults.chain_id),
        )
        .header(gen_file.header.unwrap_or(defaults.header))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let unit = match overrides.unit.as_deref() {
        Some(symbol) => {
            LengthUnit::from_str(symbol).map_err(|e| CliError::Argument(e.to_string()))?
        }
        None => file_config
            .measurement
            .take()
            .and_then(|m| m.unit)
            .unwrap_or(defaults.unit),
    };

    let timeout_secs = file_config
        .remote
        .take()
        .and_then(|r| r.timeout_secs)
        .unwrap_or(defaults.timeout_secs);
    if timeout_secs == 0 {
        return Err(CliError::Config(
            "`remote.timeout-secs` must be at least 1".to_string(),
        ));
    }

    let input_format = if overrides.three_letter {
        InputFormat::ThreeLetter
    } else {
        InputFormat::OneLetter
    };

    Ok(AppConfig {
        fold: FoldConfig {
            input_format,
            validation,
            generation,
        },
        unit,
        remote_timeout: Duration::from_secs(timeout_secs),
    })
}

/// The chosen preset provides the base policy; explicit length and unknown-residue keys refine it.
fn merge_validation(
    file_val: FileValidationConfig,
    cli_preset: Option<ValidationPreset>,
    defaults: &DefaultsConfig,
) -> Result<ValidationPolicy> {
    let base = cli_preset
        .or(file_val.preset)
        .unwrap_or(defaults.preset)
        .policy();

    ValidationPolicy::new(
        file_val.min_length.or(base.min_length),
        file_val.max_length.or(base.max_length),
        file_val.unknown_residues.unwrap_or(base.unknown_residues),
    )
    .map_err(|e| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "validation.preset" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .preset = Some(
                    ValidationPreset::from_str(value_str)
                        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?,
                );
            }
            "validation.min-length" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .min_length = Some(parse_value(key, value_str, "integer")?);
            }
            "validation.max-length" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .max_length = Some(parse_value(key, value_str, "integer")?);
            }
            "validation.unknown-residues" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .unknown_residues = Some(
                    UnknownResiduePolicy::from_str(value_str)
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "generation.coords" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .coords = Some(value_str.to_string());
            }
            "generation.seed" => {
                config.generation.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "generation.chain-id" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .chain_id = Some(parse_value(key, value_str, "character")?);
            }
            "generation.header" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .header = Some(value_str.to_string());
            }
            "measurement.unit" => {
                config.measurement.get_or_insert_with(Default::default).unit = Some(
                    LengthUnit::from_str(value_str).map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "remote.timeout-secs" => {
                config
                    .remote
                    .get_or_insert_with(Default::default)
                    .timeout_secs = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
