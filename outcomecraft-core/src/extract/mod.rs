//! Outcome record extraction
//!
//! Reads the two cohort rows and three statistic rows of an export into an
//! [`OutcomeRecord`]. Missing cells become empty strings; only a header that
//! cannot be anchored is an error.

use log::debug;
use serde::{Deserialize, Serialize};

pub mod layout;

use self::layout::layout_for;
use crate::error::ExtractionError;
use crate::locator::LocatorOptions;
use crate::reader::Grid;
use crate::record::{CohortRow, Coerced, OutcomeRecord, StatRow, StatisticKind};

/// How the header row and statistic cells are found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// Header at `fixed_header_row`, no search
    FixedOffset,
    /// Header located by scanning, statistics at configured offsets below it
    #[default]
    HeaderRelative,
    /// Header located by scanning, statistics found by their section labels
    LabelScan,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            ExtractionStrategy::FixedOffset => "fixed-offset",
            ExtractionStrategy::HeaderRelative => "header-relative",
            ExtractionStrategy::LabelScan => "label-scan",
        }
    }
}

/// Extraction configuration. Defaults match the canonical export layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    pub strategy: ExtractionStrategy,
    /// Rows examined per header scan pass
    pub scan_limit: usize,
    /// First row of the fallback scan; 0 disables it
    pub fallback_skip_rows: usize,
    /// Absolute header row for [`ExtractionStrategy::FixedOffset`]
    pub fixed_header_row: usize,
    /// Rows below the header holding the two cohorts
    pub cohort_offsets: [usize; 2],
    pub risk_difference_offset: usize,
    pub risk_ratio_offset: usize,
    pub odds_ratio_offset: usize,
    /// Column of each statistic's point estimate; the interval follows it
    pub stat_value_column: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            strategy: ExtractionStrategy::HeaderRelative,
            scan_limit: 40,
            fallback_skip_rows: 9,
            fixed_header_row: 9,
            cohort_offsets: [1, 2],
            risk_difference_offset: 6,
            risk_ratio_offset: 11,
            odds_ratio_offset: 16,
            stat_value_column: 0,
        }
    }
}

impl ExtractionOptions {
    pub fn locator(&self) -> LocatorOptions {
        LocatorOptions {
            scan_limit: self.scan_limit,
            fallback_skip_rows: self.fallback_skip_rows,
        }
    }

    pub fn stat_offset(&self, kind: StatisticKind) -> usize {
        match kind {
            StatisticKind::RiskDifference => self.risk_difference_offset,
            StatisticKind::RiskRatio => self.risk_ratio_offset,
            StatisticKind::OddsRatio => self.odds_ratio_offset,
        }
    }
}

/// Column positions of the cohort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CohortColumns {
    name: usize,
    n: usize,
    events: usize,
    risk: usize,
}

impl CohortColumns {
    /// Map columns by header label, falling back to positions 1..4
    fn from_header(header: &[String]) -> Self {
        let find = |label: &str, fallback: usize| {
            header
                .iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(label))
                .unwrap_or(fallback)
        };
        Self {
            name: find("Cohort Name", 1),
            n: find("Patients in Cohort", 2),
            events: find("Patients with Outcome", 3),
            risk: find("Risk", 4),
        }
    }
}

/// Extractor running one configured strategy
pub struct Extractor {
    options: ExtractionOptions,
}

impl Extractor {
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub fn extract(&self, grid: &Grid, outcome_name: &str) -> Result<OutcomeRecord, ExtractionError> {
        let layout = layout_for(&self.options);
        let header = layout.header_row(grid)?;
        debug!(
            "extracting '{}' with {} layout, header at row {}",
            outcome_name,
            layout.name(),
            header
        );

        let columns = CohortColumns::from_header(grid.row(header));
        let cohorts = self
            .options
            .cohort_offsets
            .map(|offset| read_cohort(grid, header.saturating_add(offset), &columns));

        let stats = StatisticKind::ALL.map(|kind| match layout.statistic_anchor(grid, header, kind) {
            Some((row, col)) => read_statistic(grid, kind, row, col),
            None => {
                debug!("no {} section found", kind);
                StatRow::blank(kind)
            }
        });

        Ok(OutcomeRecord {
            outcome_name: outcome_name.to_string(),
            cohorts,
            stats,
        })
    }
}

/// Extract a record with the given options
pub fn extract(
    grid: &Grid,
    outcome_name: &str,
    options: &ExtractionOptions,
) -> Result<OutcomeRecord, ExtractionError> {
    Extractor::new(options.clone()).extract(grid, outcome_name)
}

fn read_cohort(grid: &Grid, row: usize, columns: &CohortColumns) -> CohortRow {
    CohortRow {
        name: grid.cell(row, columns.name).trim().to_string(),
        n: Coerced::count(grid.cell(row, columns.n)),
        events: Coerced::count(grid.cell(row, columns.events)),
        risk: Coerced::number(grid.cell(row, columns.risk)),
    }
}

fn read_statistic(grid: &Grid, kind: StatisticKind, row: usize, col: usize) -> StatRow {
    let optional = |offset: usize| {
        let text = grid.cell(row, col.saturating_add(offset)).trim();
        (!text.is_empty()).then(|| text.to_string())
    };
    StatRow {
        label: kind,
        value: Coerced::number(grid.cell(row, col)),
        ci_low: Coerced::number(grid.cell(row, col.saturating_add(1))),
        ci_high: Coerced::number(grid.cell(row, col.saturating_add(2))),
        z: optional(3),
        p: optional(4),
    }
}
