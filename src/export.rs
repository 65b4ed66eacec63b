// src/export.rs
use crate::errors::Result;
use crate::runner::GradingResult;

/// Column headers of the exported feedback file.
pub const CSV_HEADER: [&str; 2] = ["Essay (excerpt)", "Feedback"];

/// Filename offered to the browser for the exported feedback file.
pub const EXPORT_FILENAME: &str = "graded_essays.csv";

/// Serializes graded results into CSV bytes: a fixed two-column header, then
/// one row per result in collection order. Fields containing commas, quotes
/// or newlines are quoted with embedded quotes doubled. Deterministic: the
/// same collection always yields byte-identical output.
pub fn export_csv(results: &[GradingResult]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for result in results {
        writer.write_record([result.excerpt.as_str(), result.feedback.as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}
