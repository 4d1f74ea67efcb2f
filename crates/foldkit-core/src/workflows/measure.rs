use crate::core::models::measurement::{
    CalibrationRatio, LengthUnit, MeasurementError, MeasurementResult,
};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info};

/// How the pixel-to-unit scale is established.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    /// A reference object of `physical` length spans `pixels` pixels.
    Reference { pixels: f64, physical: f64 },
    /// This many pixels make up one unit.
    PixelsPerUnit(f64),
}

impl Calibration {
    pub fn ratio(&self, unit: LengthUnit) -> Result<CalibrationRatio, MeasurementError> {
        match *self {
            Calibration::Reference { pixels, physical } => {
                CalibrationRatio::from_reference(pixels, physical, unit)
            }
            Calibration::PixelsPerUnit(ppu) => CalibrationRatio::from_pixels_per_unit(ppu, unit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lengths {
    Pixels { total: f64, segment: f64 },
    Physical { total: f64, segment: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRequest {
    pub calibration: Option<Calibration>,
    pub unit: LengthUnit,
    pub lengths: Lengths,
}

/// Converts the requested lengths to physical units and computes the segment percentage.
///
/// # Errors
///
/// Returns [`EngineError::Measurement`] for a degenerate calibration, negative or
/// non-finite lengths, or pixel lengths supplied without any calibration.
pub fn run(
    request: &MeasureRequest,
    reporter: &ProgressReporter,
) -> Result<MeasurementResult, EngineError> {
    let result = match request.lengths {
        Lengths::Pixels { total, segment } => {
            let calibration = request
                .calibration
                .ok_or(MeasurementError::MissingCalibration)?;
            let ratio = reporter.phase("Calibrating", || calibration.ratio(request.unit))?;
            debug!(
                units_per_pixel = ratio.units_per_pixel(),
                unit = %ratio.unit(),
                "Calibration established"
            );
            reporter.phase("Measuring", || {
                MeasurementResult::measure(&ratio, total, segment)
            })?
        }
        Lengths::Physical { total, segment } => reporter.phase("Measuring", || {
            MeasurementResult::from_physical(total, segment, request.unit)
        })?,
    };

    info!("Measured {}", result);
    reporter.report(Progress::Message(result.to_string()));
    Ok(result)
}
