//! Export layouts
//!
//! A layout answers two questions about a grid: where the cohort header row
//! is, and which cell holds each statistic's point estimate. Everything
//! else about reading a record is shared.

use super::{ExtractionOptions, ExtractionStrategy};
use crate::error::ExtractionError;
use crate::format::parse_number;
use crate::locator::locate_header;
use crate::reader::Grid;
use crate::record::StatisticKind;

/// Trait implemented by each extraction strategy
pub trait Layout {
    fn name(&self) -> &str;

    /// Row of the cohort header block
    fn header_row(&self, grid: &Grid) -> Result<usize, ExtractionError>;

    /// (row, col) of the statistic's value cell, or `None` when it cannot be placed
    fn statistic_anchor(
        &self,
        grid: &Grid,
        header: usize,
        kind: StatisticKind,
    ) -> Option<(usize, usize)>;
}

/// Create the layout selected by the configuration
pub fn layout_for(options: &ExtractionOptions) -> Box<dyn Layout + '_> {
    match options.strategy {
        ExtractionStrategy::FixedOffset => Box::new(FixedOffsetLayout { options }),
        ExtractionStrategy::HeaderRelative => Box::new(HeaderRelativeLayout { options }),
        ExtractionStrategy::LabelScan => Box::new(LabelScanLayout { options }),
    }
}

/// Header at a configured absolute row, statistics at fixed offsets below it
pub struct FixedOffsetLayout<'a> {
    options: &'a ExtractionOptions,
}

impl Layout for FixedOffsetLayout<'_> {
    fn name(&self) -> &str {
        "fixed-offset"
    }

    fn header_row(&self, grid: &Grid) -> Result<usize, ExtractionError> {
        let row = self.options.fixed_header_row;
        if row < grid.height() {
            Ok(row)
        } else {
            Err(ExtractionError::HeaderOutOfRange {
                row,
                height: grid.height(),
            })
        }
    }

    fn statistic_anchor(
        &self,
        _grid: &Grid,
        header: usize,
        kind: StatisticKind,
    ) -> Option<(usize, usize)> {
        Some(offset_anchor(self.options, header, kind))
    }
}

/// Header found by scanning, statistics at fixed offsets below it
pub struct HeaderRelativeLayout<'a> {
    options: &'a ExtractionOptions,
}

impl Layout for HeaderRelativeLayout<'_> {
    fn name(&self) -> &str {
        "header-relative"
    }

    fn header_row(&self, grid: &Grid) -> Result<usize, ExtractionError> {
        scanned_header(self.options, grid)
    }

    fn statistic_anchor(
        &self,
        _grid: &Grid,
        header: usize,
        kind: StatisticKind,
    ) -> Option<(usize, usize)> {
        Some(offset_anchor(self.options, header, kind))
    }
}

/// Header found by scanning, statistics found by their section label
pub struct LabelScanLayout<'a> {
    options: &'a ExtractionOptions,
}

impl Layout for LabelScanLayout<'_> {
    fn name(&self) -> &str {
        "label-scan"
    }

    fn header_row(&self, grid: &Grid) -> Result<usize, ExtractionError> {
        scanned_header(self.options, grid)
    }

    fn statistic_anchor(
        &self,
        grid: &Grid,
        header: usize,
        kind: StatisticKind,
    ) -> Option<(usize, usize)> {
        let label_row = (header + 1..grid.height()).find(|&row| mentions(grid, row, kind))?;

        for row in label_row + 1..grid.height() {
            // Never read into the next statistic's section.
            if StatisticKind::ALL
                .iter()
                .any(|&other| other != kind && mentions(grid, row, other))
            {
                return None;
            }
            if let Some(col) = grid.first_filled_column(row) {
                if parse_number(grid.cell(row, col)).is_some() {
                    return Some((row, col));
                }
            }
        }
        None
    }
}

fn scanned_header(options: &ExtractionOptions, grid: &Grid) -> Result<usize, ExtractionError> {
    let locator = options.locator();
    locate_header(grid, &locator).ok_or(ExtractionError::HeaderNotFound {
        scanned: locator.rows_scanned(grid),
    })
}

fn offset_anchor(options: &ExtractionOptions, header: usize, kind: StatisticKind) -> (usize, usize) {
    (
        header.saturating_add(options.stat_offset(kind)),
        options.stat_value_column,
    )
}

fn mentions(grid: &Grid, row: usize, kind: StatisticKind) -> bool {
    let label = kind.label().to_lowercase();
    grid.row(row)
        .iter()
        .any(|cell| cell.to_lowercase().contains(&label))
}
