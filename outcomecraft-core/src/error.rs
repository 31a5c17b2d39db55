//! Error kinds surfaced per file
//!
//! Only two things can fail for a file: turning its bytes into a grid
//! ([`LoadError`]) and anchoring the cohort header inside that grid
//! ([`ExtractionError`]). Missing cells inside a recognized layout are
//! never errors.

use thiserror::Error;

/// The file's bytes could not be turned into a grid.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "unsupported file type '{extension}' (expected csv, tsv, txt, xlsx, xlsm, xlsb, xls or ods)"
    )]
    UnsupportedFormat { extension: String },

    #[error("file is not valid UTF-8 text (invalid byte at offset {offset})")]
    Decode { offset: usize },

    #[error("malformed delimited text on line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook contains no sheets")]
    EmptyWorkbook,

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// The grid was loaded but the expected layout could not be anchored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no cohort header row found in the first {scanned} rows")]
    HeaderNotFound { scanned: usize },

    #[error("configured header row {row} is outside the sheet ({height} rows)")]
    HeaderOutOfRange { row: usize, height: usize },
}

/// Per-file failure, keeping the two kinds distinguishable
#[derive(Debug, Error)]
pub enum OutcomeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl OutcomeError {
    /// Short label for reports
    pub fn kind(&self) -> &'static str {
        match self {
            OutcomeError::Load(_) => "LoadError",
            OutcomeError::Extraction(_) => "ExtractionError",
        }
    }

    /// Suggestion shown to the user next to the error
    pub fn hint(&self) -> &'static str {
        match self {
            OutcomeError::Load(_) => "check file integrity",
            OutcomeError::Extraction(_) => "check export format",
        }
    }

    pub fn is_extraction(&self) -> bool {
        matches!(self, OutcomeError::Extraction(_))
    }
}
