// src/ingest.rs
use crate::errors::{GradeError, Result};

/// Header label the uploaded batch file must carry.
const ESSAY_COLUMN: &str = "Essay";

/// Extracts the essay texts from an uploaded CSV, in file order.
///
/// The header row must contain a column literally named `Essay`; its position
/// does not matter and extra columns are ignored. Rows shorter than the
/// header contribute an empty essay rather than failing the upload — empty
/// rows are submitted for grading like any other text (only the single-essay
/// path rejects empty input up front).
pub fn essays_from_csv(bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let essay_idx = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == ESSAY_COLUMN)
        .ok_or(GradeError::MissingEssayColumn)?;

    let mut essays = Vec::new();
    for record in reader.records() {
        let record = record?;
        essays.push(record.get(essay_idx).unwrap_or("").to_string());
    }

    Ok(essays)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_essays_in_file_order() {
        let csv = b"Essay\nfirst essay\nsecond essay\n";
        let essays = essays_from_csv(csv).unwrap();
        assert_eq!(essays, vec!["first essay", "second essay"]);
    }

    #[test]
    fn essay_column_may_appear_anywhere() {
        let csv = b"Student,Essay,Submitted\nalice,her essay,2024-01-01\nbob,his essay,2024-01-02\n";
        let essays = essays_from_csv(csv).unwrap();
        assert_eq!(essays, vec!["her essay", "his essay"]);
    }

    #[test]
    fn missing_essay_column_is_reported() {
        let csv = b"Text,Author\nsome text,someone\n";
        let err = essays_from_csv(csv).unwrap_err();
        assert!(matches!(err, GradeError::MissingEssayColumn));
        assert_eq!(err.to_string(), "CSV must contain a column labeled 'Essay'.");
    }

    #[test]
    fn empty_upload_is_reported_as_missing_column() {
        let err = essays_from_csv(b"").unwrap_err();
        assert!(matches!(err, GradeError::MissingEssayColumn));
    }

    #[test]
    fn quoted_multiline_essays_survive_parsing() {
        let csv = b"Essay\n\"line one\nline two, with a comma\"\n";
        let essays = essays_from_csv(csv).unwrap();
        assert_eq!(essays, vec!["line one\nline two, with a comma"]);
    }

    #[test]
    fn short_rows_yield_empty_essays() {
        let csv = b"Student,Essay\nalice,her essay\nbob\n";
        let essays = essays_from_csv(csv).unwrap();
        assert_eq!(essays, vec!["her essay", ""]);
    }
}
