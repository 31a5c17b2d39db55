//! Cohort header location
//!
//! Exports put a few metadata lines before the cohort block, and that
//! narrative can mention cohorts too. The header is always the first
//! matching row, so the scan is linear with an early exit.

use log::debug;

use crate::reader::Grid;

/// Bounds for the header scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Rows examined per pass
    pub scan_limit: usize,
    /// Start of the second pass; 0 disables it
    pub fallback_skip_rows: usize,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            scan_limit: 40,
            fallback_skip_rows: 9,
        }
    }
}

impl LocatorOptions {
    /// Number of distinct rows a failed search examined in `grid`
    pub fn rows_scanned(&self, grid: &Grid) -> usize {
        let first = self.scan_limit.min(grid.height());
        if self.fallback_skip_rows == 0 {
            return first;
        }
        let second_end = self
            .fallback_skip_rows
            .saturating_add(self.scan_limit)
            .min(grid.height());
        first.max(second_end)
    }
}

/// True for a cell that starts the cohort header block
pub fn is_header_cell(text: &str) -> bool {
    text.trim().to_lowercase().starts_with("cohort")
}

/// Row index of the cohort header block, if any
pub fn locate_header(grid: &Grid, options: &LocatorOptions) -> Option<usize> {
    if let Some(row) = scan(grid, 0, options.scan_limit) {
        debug!("cohort header found at row {}", row);
        return Some(row);
    }

    if options.fallback_skip_rows > 0 {
        debug!(
            "no cohort header in the first {} rows, retrying after {} metadata rows",
            options.scan_limit, options.fallback_skip_rows
        );
        if let Some(row) = scan(grid, options.fallback_skip_rows, options.scan_limit) {
            debug!("cohort header found at row {} on fallback scan", row);
            return Some(row);
        }
    }

    None
}

fn scan(grid: &Grid, start: usize, limit: usize) -> Option<usize> {
    grid.rows()
        .enumerate()
        .skip(start)
        .take(limit)
        .find(|(_, cells)| cells.iter().any(|c| is_header_cell(c)))
        .map(|(index, _)| index)
}
