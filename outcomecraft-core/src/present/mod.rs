//! Presentation of extracted records as HTML and CSV

pub mod csv;
pub mod html;
pub mod style;

pub use style::TableStyle;

use crate::format::FormatOptions;

pub const COHORT_HEADERS: [&str; 4] = [
    "Cohort Name",
    "Patients in Cohort",
    "Patients with Outcome",
    "Risk",
];

/// Statistic table columns; the p-value column follows the format options
pub fn statistic_headers(format: &FormatOptions) -> Vec<&'static str> {
    let mut headers = vec!["Statistic", "Value", "95% CI"];
    if format.show_p_values {
        headers.push("p-value");
    }
    headers
}
