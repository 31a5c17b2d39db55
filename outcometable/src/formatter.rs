//! Output formatters for extracted records and per-file failures

use anyhow::Result;
use colored::*;
use outcomecraft_core::format::{FormatOptions, format_p_value};
use outcomecraft_core::{FileReport, OutcomeRecord};
use std::fmt::Write;

/// Records and failures as a human-readable colored summary
pub fn render_human(
    records: &[&OutcomeRecord],
    reports: &[FileReport],
    format: &FormatOptions,
) -> String {
    let mut out = String::new();

    for record in records {
        let _ = writeln!(out, "{}", record.outcome_name.bold().underline());
        for cohort in &record.cohorts {
            let _ = writeln!(
                out,
                "  {:<24} n={:<8} events={:<8} risk={}",
                cohort.name.cyan(),
                cohort.n,
                cohort.events,
                format.risk(&cohort.risk)
            );
        }
        for stat in &record.stats {
            let p = format_p_value(stat.p.as_deref().unwrap_or(""));
            let _ = writeln!(
                out,
                "  {:<16} {:<8} {:<18} {}",
                stat.label.label(),
                format.statistic(&stat.value),
                format.interval(&stat.ci_low, &stat.ci_high),
                p.bright_black()
            );
        }
        let _ = writeln!(out);
    }

    let failures: Vec<&FileReport> = reports.iter().filter(|r| r.outcome.is_err()).collect();
    for report in &failures {
        if let Some(error) = report.error() {
            let _ = writeln!(
                out,
                "{} {} [{}] {} ({})",
                "ERROR".red().bold(),
                report.file_name.yellow(),
                error.kind().bright_black(),
                error,
                error.hint()
            );
        }
    }

    let _ = writeln!(out, "{}", "Summary:".bold().underline());
    let _ = writeln!(out, "  {} {}", "Tables:".green().bold(), records.len());
    if !failures.is_empty() {
        let _ = writeln!(out, "  {} {}", "Failed:".red().bold(), failures.len());
    }
    out
}

/// Records in display order plus every failure, as pretty JSON
pub fn to_json(records: &[&OutcomeRecord], reports: &[FileReport]) -> Result<String> {
    let errors: Vec<_> = reports
        .iter()
        .filter_map(|report| {
            report.error().map(|error| {
                serde_json::json!({
                    "file": report.file_name,
                    "kind": error.kind(),
                    "message": error.to_string(),
                    "hint": error.hint(),
                })
            })
        })
        .collect();

    let output = serde_json::json!({
        "records": records,
        "errors": errors,
        "summary": {
            "files": reports.len(),
            "tables": records.len(),
            "failed": errors.len(),
        }
    });

    let mut json = serde_json::to_string_pretty(&output)?;
    json.push('\n');
    Ok(json)
}

/// Print per-file failures to stderr
pub fn report_failures(reports: &[FileReport]) {
    for report in reports {
        if let Some(error) = report.error() {
            eprintln!(
                "{} {}: {} ({})",
                "error:".red().bold(),
                report.file_name,
                error,
                error.hint()
            );
        }
    }
}
