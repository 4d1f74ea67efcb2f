use crate::core::models::measurement::MeasurementResult;
use std::io::Write;
use std::path::Path;

/// Writes measurement results as CSV with the columns
/// `unit,total_px,segment_px,total,segment,percentage`.
///
/// Pixel columns are left empty for results measured directly in physical units.
pub fn write_measurements<W: Write>(
    results: &[MeasurementResult],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_measurements_to_path<P: AsRef<Path>>(
    results: &[MeasurementResult],
    path: P,
) -> Result<(), csv::Error> {
    let wtr = std::fs::File::create(path)?;
    write_measurements(results, wtr)
}
