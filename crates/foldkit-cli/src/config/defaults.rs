use super::models::ValidationPreset;
use foldkit::core::io::pdb::DEFAULT_HEADER;
use foldkit::core::models::measurement::LengthUnit;

pub struct DefaultsConfig {
    pub preset: ValidationPreset,
    pub coords: String,
    pub chain_id: char,
    pub header: String,
    pub unit: LengthUnit,
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preset: ValidationPreset::Strict,
            coords: "helical".to_string(),
            chain_id: 'A',
            header: DEFAULT_HEADER.to_string(),
            unit: LengthUnit::Millimeter,
            timeout_secs: 60,
        }
    }
}
