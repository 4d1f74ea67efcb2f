use crate::core::io::pdb::DEFAULT_HEADER;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const STRICT_MIN_LENGTH: usize = 10;
pub const STRICT_MAX_LENGTH: usize = 1200;

/// Largest coordinate that fits the eight-column `%8.3f` fields of a structure file.
pub const MAX_COORDINATE: f64 = 9999.999;
/// Most negative coordinate that fits; the sign takes one of the eight columns.
pub const MIN_COORDINATE: f64 = -999.999;
/// Largest residue number the four-column residue field holds.
pub const MAX_RESIDUES: usize = 9999;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown unknown-residue policy '{0}'. Expected 'reject' or 'replace'")]
    UnknownResiduePolicy(String),
}

/// What to do with characters or tokens outside the 20-residue alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownResiduePolicy {
    #[default]
    Reject,
    /// Substitute the `X` sentinel and carry on.
    Replace,
}

impl FromStr for UnknownResiduePolicy {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(UnknownResiduePolicy::Reject),
            "replace" => Ok(UnknownResiduePolicy::Replace),
            other => Err(ConfigError::UnknownResiduePolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub unknown_residues: UnknownResiduePolicy,
}

impl ValidationPolicy {
    /// Creates a policy, checking that the bounds are ordered.
    pub fn new(
        min_length: Option<usize>,
        max_length: Option<usize>,
        unknown_residues: UnknownResiduePolicy,
    ) -> Result<Self, ConfigError> {
        if let (Some(min), Some(max)) = (min_length, max_length) {
            if min > max {
                return Err(ConfigError::InvalidParameter {
                    name: "min_length",
                    reason: format!("minimum length {} exceeds maximum length {}", min, max),
                });
            }
        }
        Ok(Self {
            min_length,
            max_length,
            unknown_residues,
        })
    }

    /// Bounds of 10..=1200 residues, unknown residues rejected.
    pub fn strict() -> Self {
        Self {
            min_length: Some(STRICT_MIN_LENGTH),
            max_length: Some(STRICT_MAX_LENGTH),
            unknown_residues: UnknownResiduePolicy::Reject,
        }
    }

    /// No length bounds, unknown residues replaced with `X`.
    pub fn permissive() -> Self {
        Self {
            min_length: None,
            max_length: None,
            unknown_residues: UnknownResiduePolicy::Replace,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

/// How pseudo-atom coordinates are laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinatePolicy {
    /// Angle advances by `degrees_per_residue`, z by `pitch`; the radius is jittered.
    Helical {
        radius: f64,
        jitter: f64,
        pitch: f64,
        degrees_per_residue: f64,
    },
    /// Residue `n` sits at `x = n * step`.
    Linear { step: f64 },
    /// Uniform placement in the cube `[-half_extent, half_extent]^3`.
    Random { half_extent: f64 },
}

impl CoordinatePolicy {
    pub const DEFAULT_HELIX_RADIUS: f64 = 2.3;
    pub const DEFAULT_HELIX_JITTER: f64 = 0.3;
    pub const DEFAULT_HELIX_PITCH: f64 = 1.5;
    pub const DEFAULT_HELIX_DEGREES: f64 = 100.0;
    pub const DEFAULT_LINEAR_STEP: f64 = 1.5;
    pub const DEFAULT_RANDOM_HALF_EXTENT: f64 = 10.0;

    pub fn helical() -> Self {
        CoordinatePolicy::Helical {
            radius: Self::DEFAULT_HELIX_RADIUS,
            jitter: Self::DEFAULT_HELIX_JITTER,
            pitch: Self::DEFAULT_HELIX_PITCH,
            degrees_per_residue: Self::DEFAULT_HELIX_DEGREES,
        }
    }

    pub fn linear(step: f64) -> Self {
        CoordinatePolicy::Linear { step }
    }

    pub fn random(half_extent: f64) -> Self {
        CoordinatePolicy::Random { half_extent }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("must be a positive finite number (got {})", value),
                })
            }
        };
        let at_most = |name: &'static str, value: f64, limit: f64| {
            if value <= limit {
                Ok(())
            } else {
                Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("must not exceed {} (got {})", limit, value),
                })
            }
        };
        match *self {
            CoordinatePolicy::Helical {
                radius,
                jitter,
                pitch,
                degrees_per_residue,
            } => {
                positive("radius", radius)?;
                positive("pitch", pitch)?;
                positive("degrees_per_residue", degrees_per_residue)?;
                if !jitter.is_finite() || jitter < 0.0 || jitter >= radius {
                    return Err(ConfigError::InvalidParameter {
                        name: "jitter",
                        reason: format!("must be in [0, radius) (got {})", jitter),
                    });
                }
                // x and y swing to -(radius + jitter).
                at_most("radius", radius + jitter, -MIN_COORDINATE)?;
                at_most("pitch", pitch, MAX_COORDINATE)
            }
            CoordinatePolicy::Linear { step } => {
                positive("step", step)?;
                at_most("step", step, MAX_COORDINATE)
            }
            CoordinatePolicy::Random { half_extent } => {
                positive("half_extent", half_extent)?;
                at_most("half_extent", half_extent, -MIN_COORDINATE)
            }
        }
    }

    /// Checks that a chain of `residues` laid out with this policy stays inside the
    /// coordinate and residue-number ranges a structure file can represent.
    pub fn check_extent(&self, residues: usize) -> Result<(), ConfigError> {
        if residues > MAX_RESIDUES {
            return Err(ConfigError::InvalidParameter {
                name: "residues",
                reason: format!(
                    "{} residues exceed the {} a structure file can number",
                    residues, MAX_RESIDUES
                ),
            });
        }
        let (name, reach) = match *self {
            CoordinatePolicy::Linear { step } => ("step", step * residues as f64),
            CoordinatePolicy::Helical { pitch, .. } => {
                ("pitch", pitch * residues.saturating_sub(1) as f64)
            }
            CoordinatePolicy::Random { .. } => return Ok(()),
        };
        if reach > MAX_COORDINATE {
            return Err(ConfigError::InvalidParameter {
                name,
                reason: format!(
                    "{} residues reach {:.3} A, beyond the {} A a structure file can hold",
                    residues, reach, MAX_COORDINATE
                ),
            });
        }
        Ok(())
    }
}

impl Default for CoordinatePolicy {
    fn default() -> Self {
        Self::helical()
    }
}

impl fmt::Display for CoordinatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatePolicy::Helical {
                radius,
                degrees_per_residue,
                pitch,
                ..
            } => write!(
                f,
                "helical (r={} A, {} deg/residue, pitch={} A)",
                radius, degrees_per_residue, pitch
            ),
            CoordinatePolicy::Linear { step } => write!(f, "linear (step={} A)", step),
            CoordinatePolicy::Random { half_extent } => {
                write!(f, "random (cube half-extent={} A)", half_extent)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub policy: CoordinatePolicy,
    pub seed: Option<u64>,
    pub chain_id: char,
    pub header: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            policy: CoordinatePolicy::default(),
            seed: None,
            chain_id: 'A',
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

#[derive(Default)]
pub struct GenerationConfigBuilder {
    policy: Option<CoordinatePolicy>,
    seed: Option<u64>,
    chain_id: Option<char>,
    header: Option<String>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(mut self, policy: CoordinatePolicy) -> Self {
        self.policy = Some(policy);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn chain_id(mut self, chain_id: char) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        let defaults = GenerationConfig::default();

        let policy = self.policy.unwrap_or(defaults.policy);
        policy.validate()?;

        let chain_id = self.chain_id.unwrap_or(defaults.chain_id);
        if !chain_id.is_ascii_alphanumeric() {
            return Err(ConfigError::InvalidParameter {
                name: "chain_id",
                reason: format!("must be a single ASCII letter or digit (got '{}')", chain_id),
            });
        }

        let header = self.header.unwrap_or(defaults.header);
        if header.contains('\n') {
            return Err(ConfigError::InvalidParameter {
                name: "header",
                reason: "must be a single line".to_string(),
            });
        }

        Ok(GenerationConfig {
            policy,
            seed: self.seed,
            chain_id,
            header,
        })
    }
}

/// Whether raw sequence input is one-letter text or three-letter tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    OneLetter,
    ThreeLetter,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoldConfig {
    pub input_format: InputFormat,
    pub validation: ValidationPolicy,
    pub generation: GenerationConfig,
}
