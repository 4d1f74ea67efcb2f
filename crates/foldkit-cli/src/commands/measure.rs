use crate::cli::MeasureArgs;
use crate::config::{self, CliOverrides};
use crate::error::{CliError, Result};
use crate::utils::parser;
use foldkit::core::io::csv_export;
use foldkit::core::models::measurement::{LengthUnit, ruler_length};
use foldkit::engine::progress::ProgressReporter;
use foldkit::workflows::measure::{self, Calibration, Lengths, MeasureRequest};
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: MeasureArgs, config_path: Option<&Path>, set_values: &[String]) -> Result<()> {
    let overrides = CliOverrides {
        unit: args.unit.clone(),
        ..Default::default()
    };
    let app_config = config::load(config_path, set_values, &overrides)?;

    let total = resolve_length("total", args.total, args.total_rect.as_deref())?;
    let segment = resolve_length("segment", args.segment, args.segment_rect.as_deref())?;
    let request = build_request(&args, app_config.unit, total, segment);
    debug!("Measurement request: {:?}", request);

    let result = measure::run(&request, &ProgressReporter::new())?;

    if let Some(Ok(ratio)) = request.calibration.map(|c| c.ratio(request.unit)) {
        println!("Scale:      {:.4} {}/px", ratio.units_per_pixel(), ratio.unit());
    }
    println!("Total:      {:.2} {}", result.total, result.unit);
    println!("Segment:    {:.2} {}", result.segment, result.unit);
    println!("Percentage: {:.2}%", result.percentage);

    if let Some(path) = &args.csv {
        csv_export::write_measurements_to_path(&[result], path).map_err(|e| {
            CliError::FileWriting {
                path: path.clone(),
                source: e.into(),
            }
        })?;
        info!("Measurement exported to {:?}", path);
        println!("✓ CSV written to: {}", path.display());
    }
    Ok(())
}

/// A length given directly, or as the longer side of a `WxH` ruler rectangle.
fn resolve_length(name: &str, value: Option<f64>, rect: Option<&str>) -> Result<f64> {
    match (value, rect) {
        (Some(value), _) => Ok(value),
        (None, Some(rect)) => {
            let (width, height) =
                parser::parse_rectangle(rect).map_err(|e| CliError::Argument(e.to_string()))?;
            Ok(ruler_length(width, height))
        }
        (None, None) => Err(CliError::Argument(format!(
            "--{name} or --{name}-rect is required"
        ))),
    }
}

fn build_request(args: &MeasureArgs, unit: LengthUnit, total: f64, segment: f64) -> MeasureRequest {
    let lengths = if args.physical {
        Lengths::Physical { total, segment }
    } else {
        Lengths::Pixels { total, segment }
    };
    let calibration = match (args.px_per_unit, args.ref_px, args.ref_length) {
        (Some(ppu), _, _) => Some(Calibration::PixelsPerUnit(ppu)),
        (None, Some(pixels), Some(physical)) => Some(Calibration::Reference { pixels, physical }),
        _ => None,
    };
    MeasureRequest {
        calibration,
        unit,
        lengths,
    }
}
