//! Batch processing of uploaded exports
//!
//! Files are handled one at a time, in the order given, and each has its
//! own failure domain: one bad file never aborts the rest.

use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;

use crate::config::OutcomesConfig;
use crate::error::OutcomeError;
use crate::record::OutcomeRecord;

/// Raw bytes of one uploaded export plus its file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it by its file name
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::new(display_name(path), bytes))
    }
}

/// Result of processing one file
#[derive(Debug)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: Result<OutcomeRecord, OutcomeError>,
}

impl FileReport {
    pub fn record(&self) -> Option<&OutcomeRecord> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&OutcomeError> {
        self.outcome.as_ref().err()
    }
}

/// Successful records, in report order
pub fn records(reports: &[FileReport]) -> Vec<OutcomeRecord> {
    reports
        .iter()
        .filter_map(FileReport::record)
        .cloned()
        .collect()
}

/// Outcome name for a file: a configured override for its stem, else the stem itself
pub fn outcome_name(file_name: &str, config: &OutcomesConfig) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    config
        .outcome_name_for(stem)
        .unwrap_or(stem)
        .to_string()
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn log_outcome(file_name: &str, outcome: &Result<OutcomeRecord, OutcomeError>) {
    match outcome {
        Ok(record) => info!("{}: extracted '{}'", file_name, record.outcome_name),
        Err(e) => warn!("{}: {} ({}): {}", file_name, e.kind(), e.hint(), e),
    }
}
