//! Extracted outcome records

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::{parse_count, parse_number};

/// Cell text together with its parsed value, if it parsed
///
/// Display always shows the original text, so a cell that failed to coerce
/// still renders as it appeared in the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coerced<T> {
    pub raw: String,
    pub value: Option<T>,
}

impl<T> Coerced<T> {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl<T: Copy> Coerced<T> {
    pub fn value(&self) -> Option<T> {
        self.value
    }
}

impl Coerced<u64> {
    /// Patient counts
    pub fn count(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_string(),
            value: parse_count(raw),
        }
    }
}

impl Coerced<f64> {
    /// Risks, estimates and interval bounds
    pub fn number(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_string(),
            value: parse_number(raw),
        }
    }
}

impl<T> fmt::Display for Coerced<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

/// One compared patient group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    pub name: String,
    pub n: Coerced<u64>,
    pub events: Coerced<u64>,
    pub risk: Coerced<f64>,
}

/// Association statistics reported by the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatisticKind {
    RiskDifference,
    RiskRatio,
    OddsRatio,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 3] = [
        StatisticKind::RiskDifference,
        StatisticKind::RiskRatio,
        StatisticKind::OddsRatio,
    ];

    /// Label as it appears in exports and rendered tables
    pub fn label(&self) -> &'static str {
        match self {
            StatisticKind::RiskDifference => "Risk Difference",
            StatisticKind::RiskRatio => "Risk Ratio",
            StatisticKind::OddsRatio => "Odds Ratio",
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub label: StatisticKind,
    pub value: Coerced<f64>,
    pub ci_low: Coerced<f64>,
    pub ci_high: Coerced<f64>,
    /// `None` when the export has no z cell for this statistic
    pub z: Option<String>,
    /// `None` when the export has no p cell for this statistic
    pub p: Option<String>,
}

impl StatRow {
    /// A row with every cell empty
    pub fn blank(label: StatisticKind) -> Self {
        Self {
            label,
            value: Coerced::default(),
            ci_low: Coerced::default(),
            ci_high: Coerced::default(),
            z: None,
            p: None,
        }
    }
}

/// Everything extracted from one export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub outcome_name: String,
    /// Exposed cohort first, control second, as ordered in the export
    pub cohorts: [CohortRow; 2],
    /// Risk difference, risk ratio, odds ratio
    pub stats: [StatRow; 3],
}

impl OutcomeRecord {
    pub fn stat(&self, kind: StatisticKind) -> &StatRow {
        match kind {
            StatisticKind::RiskDifference => &self.stats[0],
            StatisticKind::RiskRatio => &self.stats[1],
            StatisticKind::OddsRatio => &self.stats[2],
        }
    }
}
