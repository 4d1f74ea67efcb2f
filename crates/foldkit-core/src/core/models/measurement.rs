use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasurementError {
    #[error("Reference length in pixels must be positive (got {0})")]
    NonPositivePixels(f64),

    #[error("Reference physical length must be positive (got {0})")]
    NonPositivePhysical(f64),

    #[error("Value for '{name}' is not a finite number")]
    NonFinite { name: &'static str },

    #[error("Length for '{name}' cannot be negative (got {value})")]
    NegativeLength { name: &'static str, value: f64 },

    #[error("Pixel measurements require a calibration")]
    MissingCalibration,

    #[error("Unknown length unit '{0}'. Expected one of: um, mm, cm, in")]
    UnknownUnit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "um")]
    Micrometer,
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "in")]
    Inch,
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Micrometer => "um",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Inch => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = MeasurementError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "um" | "µm" | "micrometer" | "micrometers" => Ok(LengthUnit::Micrometer),
            "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeter),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeter),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inch),
            other => Err(MeasurementError::UnknownUnit(other.to_string())),
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<f64, MeasurementError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MeasurementError::NonFinite { name })
    }
}

fn check_length(name: &'static str, value: f64) -> Result<f64, MeasurementError> {
    let value = check_finite(name, value)?;
    if value < 0.0 {
        return Err(MeasurementError::NegativeLength { name, value });
    }
    Ok(value)
}

/// Scale factor from pixel distance to physical distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRatio {
    units_per_pixel: f64,
    unit: LengthUnit,
}

impl CalibrationRatio {
    /// Derives the ratio `physical / pixels` from a reference of known length.
    ///
    /// # Errors
    ///
    /// Fails when either value is non-finite or not strictly positive.
    pub fn from_reference(
        pixels: f64,
        physical: f64,
        unit: LengthUnit,
    ) -> Result<Self, MeasurementError> {
        let pixels = check_finite("reference pixels", pixels)?;
        let physical = check_finite("reference length", physical)?;
        if pixels <= 0.0 {
            return Err(MeasurementError::NonPositivePixels(pixels));
        }
        if physical <= 0.0 {
            return Err(MeasurementError::NonPositivePhysical(physical));
        }
        Ok(Self {
            units_per_pixel: physical / pixels,
            unit,
        })
    }

    /// Derives the ratio from "how many pixels make one unit".
    pub fn from_pixels_per_unit(
        pixels_per_unit: f64,
        unit: LengthUnit,
    ) -> Result<Self, MeasurementError> {
        Self::from_reference(pixels_per_unit, 1.0, unit)
    }

    pub fn units_per_pixel(&self) -> f64 {
        self.units_per_pixel
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn to_physical(&self, pixels: f64) -> f64 {
        pixels * self.units_per_pixel
    }
}

/// `100 * segment / total`, or `0.0` when `total` is not positive.
pub fn percentage(segment: f64, total: f64) -> f64 {
    if !(total > 0.0) {
        return 0.0;
    }
    100.0 * segment / total
}

/// Measured length of a ruler rectangle: its larger side, whatever its rotation.
pub fn ruler_length(width: f64, height: f64) -> f64 {
    width.max(height)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementResult {
    pub unit: LengthUnit,
    pub total_px: Option<f64>,
    pub segment_px: Option<f64>,
    pub total: f64,
    pub segment: f64,
    pub percentage: f64,
}

impl MeasurementResult {
    /// Converts two pixel lengths with `ratio` and relates them.
    pub fn measure(
        ratio: &CalibrationRatio,
        total_px: f64,
        segment_px: f64,
    ) -> Result<Self, MeasurementError> {
        let total_px = check_length("total", total_px)?;
        let segment_px = check_length("segment", segment_px)?;
        let total = ratio.to_physical(total_px);
        let segment = ratio.to_physical(segment_px);
        Ok(Self {
            unit: ratio.unit(),
            total_px: Some(total_px),
            segment_px: Some(segment_px),
            total,
            segment,
            percentage: percentage(segment, total),
        })
    }

    /// Relates two lengths that are already in physical units.
    pub fn from_physical(
        total: f64,
        segment: f64,
        unit: LengthUnit,
    ) -> Result<Self, MeasurementError> {
        let total = check_length("total", total)?;
        let segment = check_length("segment", segment)?;
        Ok(Self {
            unit,
            total_px: None,
            segment_px: None,
            total,
            segment,
            percentage: percentage(segment, total),
        })
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {:.2} {unit}, segment {:.2} {unit} ({:.2}%)",
            self.total,
            self.segment,
            self.percentage,
            unit = self.unit
        )
    }
}
