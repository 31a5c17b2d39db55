//! Value coercion and display formatting

use serde::{Deserialize, Serialize};

use crate::record::Coerced;

/// How cohort risks are displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskStyle {
    /// `0.2` renders as `20.0%`
    #[default]
    Percent,
    /// `20%` renders as `0.200`
    Decimal,
    /// Cell text as exported
    Raw,
}

/// Display options shared by the HTML and CSV presenters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub risk_style: RiskStyle,
    pub risk_decimals: usize,
    pub stat_decimals: usize,
    pub show_p_values: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            risk_style: RiskStyle::Percent,
            risk_decimals: 1,
            stat_decimals: 2,
            show_p_values: true,
        }
    }
}

impl FormatOptions {
    pub fn risk(&self, risk: &Coerced<f64>) -> String {
        match (self.risk_style, risk.value()) {
            (RiskStyle::Percent, Some(v)) => format_percent(v, self.risk_decimals),
            (RiskStyle::Decimal, Some(v)) => format_decimal(v, self.risk_decimals),
            _ => risk.raw().to_string(),
        }
    }

    pub fn statistic(&self, value: &Coerced<f64>) -> String {
        display_decimal(value, self.stat_decimals)
    }

    pub fn interval(&self, low: &Coerced<f64>, high: &Coerced<f64>) -> String {
        format_ci(low, high, self.stat_decimals)
    }
}

/// Parse a count, accepting thousands separators and integral floats like `100.0`
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(n) = cleaned.parse::<u64>() {
        return Some(n);
    }
    let f = cleaned.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Parse a number. A trailing `%` divides by 100, so `"12.5%"` reads as `0.125`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (body, scale) = match trimmed.strip_suffix('%') {
        Some(body) => (body.trim_end(), 100.0),
        None => (trimmed, 1.0),
    };
    if body.is_empty() {
        return None;
    }
    let value = body
        .parse::<f64>()
        .or_else(|_| body.replace(',', "").parse::<f64>())
        .ok()?;
    value.is_finite().then_some(value / scale)
}

/// `0.2` with 1 decimal gives `"20.0%"`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Parsed values use fixed decimals; anything else keeps its cell text
pub fn display_decimal(value: &Coerced<f64>, decimals: usize) -> String {
    match value.value() {
        Some(v) => format_decimal(v, decimals),
        None => value.raw().to_string(),
    }
}

/// Confidence interval as `"(low, high)"`, or empty when both bounds are missing
pub fn format_ci(low: &Coerced<f64>, high: &Coerced<f64>, decimals: usize) -> String {
    if low.is_empty() && high.is_empty() {
        return String::new();
    }
    format!(
        "({}, {})",
        display_decimal(low, decimals),
        display_decimal(high, decimals)
    )
}

/// Classify a p-value for display
///
/// Values below 0.001 render as `"<.001"`, other numbers as `"p="` with three
/// decimals, non-numeric text as `"p="` followed by the text, and an empty
/// cell stays empty.
pub fn format_p_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_number(trimmed) {
        Some(p) if p.abs() < 0.001 => "<.001".to_string(),
        Some(p) => format!("p={:.3}", p),
        None => format!("p={}", trimmed),
    }
}
