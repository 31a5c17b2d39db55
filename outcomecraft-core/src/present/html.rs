//! HTML table rendering

use std::fmt::Write;

use super::style::TableStyle;
use super::{COHORT_HEADERS, statistic_headers};
use crate::format::{FormatOptions, format_p_value};
use crate::record::OutcomeRecord;

/// Render one record as an embeddable HTML fragment
pub fn render_record(record: &OutcomeRecord, format: &FormatOptions, style: &TableStyle) -> String {
    let mut out = String::new();
    let cell = escape_html(&style.cell_css());

    let _ = writeln!(out, "<div class=\"outcome-table\">");
    let _ = writeln!(
        out,
        "<h3 style=\"font-family:{};\">{}</h3>",
        escape_html(&style.font_family),
        escape_html(&record.outcome_name)
    );

    // Cohort table
    let cohort_rows: Vec<Vec<String>> = record
        .cohorts
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.n.to_string(),
                c.events.to_string(),
                format.risk(&c.risk),
            ]
        })
        .collect();
    write_table(&mut out, style, &cell, &COHORT_HEADERS, &cohort_rows);

    // Statistics table
    let stat_rows: Vec<Vec<String>> = record
        .stats
        .iter()
        .map(|s| {
            let mut row = vec![
                s.label.label().to_string(),
                format.statistic(&s.value),
                format.interval(&s.ci_low, &s.ci_high),
            ];
            if format.show_p_values {
                row.push(format_p_value(s.p.as_deref().unwrap_or("")));
            }
            row
        })
        .collect();
    write_table(
        &mut out,
        style,
        &cell,
        &statistic_headers(format),
        &stat_rows,
    );

    let _ = writeln!(out, "</div>");
    out
}

/// Render records as a standalone HTML page, in the given order
pub fn render_document<'a, I>(
    records: I,
    title: &str,
    format: &FormatOptions,
    style: &TableStyle,
) -> String
where
    I: IntoIterator<Item = &'a OutcomeRecord>,
{
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html>");
    let _ = writeln!(
        out,
        "<head><meta charset=\"utf-8\"><title>{}</title></head>",
        escape_html(title)
    );
    let _ = writeln!(out, "<body>");
    for record in records {
        out.push_str(&render_record(record, format, style));
    }
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

fn write_table(
    out: &mut String,
    style: &TableStyle,
    cell_css: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) {
    let _ = writeln!(out, "<table style=\"{}\">", escape_html(&style.table_css()));
    let _ = write!(
        out,
        "<thead><tr style=\"{}\">",
        escape_html(&style.header_row_css())
    );
    for header in headers {
        let _ = write!(
            out,
            "<th style=\"{}\">{}</th>",
            cell_css,
            escape_html(header)
        );
    }
    let _ = writeln!(out, "</tr></thead>");

    let _ = writeln!(out, "<tbody>");
    for (index, row) in rows.iter().enumerate() {
        let _ = write!(
            out,
            "<tr style=\"{}\">",
            escape_html(&style.body_row_css(index))
        );
        for value in row {
            let _ = write!(
                out,
                "<td style=\"{}\">{}</td>",
                cell_css,
                escape_html(value)
            );
        }
        let _ = writeln!(out, "</tr>");
    }
    let _ = writeln!(out, "</tbody>");
    let _ = writeln!(out, "</table>");
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
