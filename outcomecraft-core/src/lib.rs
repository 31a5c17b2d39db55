//! outcomecraft-core: Core library for TriNetX outcome tables
//!
//! This library turns spreadsheet exports of a cohort comparison into a
//! fixed [`OutcomeRecord`] (two cohort rows and three association
//! statistics) and renders those records as HTML tables or CSV.

pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod locator;
pub mod order;
pub mod present;
pub mod reader;
pub mod record;

use std::path::Path;

pub use batch::{FileReport, UploadedFile};
pub use config::OutcomesConfig;
pub use error::{ExtractionError, LoadError, OutcomeError};
pub use extract::{ExtractionOptions, ExtractionStrategy, Extractor};
pub use order::DisplayOrder;
pub use reader::{FileKind, Grid};
pub use record::{CohortRow, Coerced, OutcomeRecord, StatRow, StatisticKind};

/// Main table generator interface
pub struct TableGenerator {
    config: OutcomesConfig,
    extractor: Extractor,
}

impl TableGenerator {
    /// Create a new generator with the default (canonical export) configuration
    pub fn new() -> Self {
        Self::with_config(OutcomesConfig::default())
    }

    /// Create a new generator with custom configuration
    pub fn with_config(config: OutcomesConfig) -> Self {
        let extractor = Extractor::new(config.extraction.clone());
        Self { config, extractor }
    }

    pub fn config(&self) -> &OutcomesConfig {
        &self.config
    }

    /// Load and extract a single uploaded file
    pub fn process_file(&self, file: &UploadedFile) -> Result<OutcomeRecord, OutcomeError> {
        let kind = FileKind::from_file_name(&file.name)?;
        let grid = reader::load_grid(&file.bytes, kind, &self.config.loader)?;
        let outcome_name = batch::outcome_name(&file.name, &self.config);
        let record = self.extractor.extract(&grid, &outcome_name)?;
        Ok(record)
    }

    /// Process files in order. A failure in one file never stops the others.
    pub fn process_batch(&self, files: &[UploadedFile]) -> Vec<FileReport> {
        files
            .iter()
            .map(|file| {
                let outcome = self.process_file(file);
                batch::log_outcome(&file.name, &outcome);
                FileReport {
                    file_name: file.name.clone(),
                    outcome,
                }
            })
            .collect()
    }

    /// Read files from disk and process them in order.
    ///
    /// A file that cannot be read is reported as a [`LoadError::Io`] for that
    /// file only.
    pub fn process_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<FileReport> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let file_name = batch::display_name(path);
                let outcome = UploadedFile::read(path)
                    .map_err(|e| OutcomeError::Load(LoadError::Io(e)))
                    .and_then(|file| self.process_file(&file));
                batch::log_outcome(&file_name, &outcome);
                FileReport { file_name, outcome }
            })
            .collect()
    }
}

impl Default for TableGenerator {
    fn default() -> Self {
        Self::new()
    }
}
