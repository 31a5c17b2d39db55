//! CSV re-export of formatted records
//!
//! One block per outcome, blocks separated by a blank line.

use csv::{Terminator, WriterBuilder};

use super::{COHORT_HEADERS, statistic_headers};
use crate::format::{FormatOptions, format_p_value};
use crate::record::OutcomeRecord;

/// Export records in the given order
pub fn export_csv<'a, I>(records: I, format: &FormatOptions) -> Result<String, csv::Error>
where
    I: IntoIterator<Item = &'a OutcomeRecord>,
{
    let blocks = records
        .into_iter()
        .map(|record| record_block(record, format))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(blocks.join("\n"))
}

fn record_block(record: &OutcomeRecord, format: &FormatOptions) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record([record.outcome_name.as_str()])?;

    writer.write_record(COHORT_HEADERS)?;
    for cohort in &record.cohorts {
        writer.write_record([
            cohort.name.clone(),
            cohort.n.to_string(),
            cohort.events.to_string(),
            format.risk(&cohort.risk),
        ])?;
    }

    writer.write_record(statistic_headers(format))?;
    for stat in &record.stats {
        let mut row = vec![
            stat.label.label().to_string(),
            format.statistic(&stat.value),
            format.interval(&stat.ci_low, &stat.ci_high),
        ];
        if format.show_p_values {
            row.push(format_p_value(stat.p.as_deref().unwrap_or("")));
        }
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CohortRow, Coerced, StatRow, StatisticKind};

    fn record(name: &str) -> OutcomeRecord {
        let mut stats = StatisticKind::ALL.map(StatRow::blank);
        stats[1].value = Coerced::number("2.0");
        stats[1].ci_low = Coerced::number("0.99");
        stats[1].ci_high = Coerced::number("4.05");
        stats[1].p = Some("0.045".to_string());
        OutcomeRecord {
            outcome_name: name.to_string(),
            cohorts: [
                CohortRow {
                    name: "CohortA".to_string(),
                    n: Coerced::count("100"),
                    events: Coerced::count("20"),
                    risk: Coerced::number("20.0%"),
                },
                CohortRow {
                    name: "CohortB".to_string(),
                    n: Coerced::count("1,000"),
                    events: Coerced::count("10"),
                    risk: Coerced::number("0.01"),
                },
            ],
            stats,
        }
    }

    #[test]
    fn test_block_layout() {
        let out = export_csv([&record("Stroke")], &FormatOptions::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Stroke",
                "Cohort Name,Patients in Cohort,Patients with Outcome,Risk",
                "CohortA,100,20,20.0%",
                "CohortB,\"1,000\",10,1.0%",
                "Statistic,Value,95% CI,p-value",
                "Risk Difference,,,",
                "Risk Ratio,2.00,\"(0.99, 4.05)\",p=0.045",
                "Odds Ratio,,,",
            ]
        );
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let a = record("Stroke");
        let b = record("Death");
        let out = export_csv([&a, &b], &FormatOptions::default()).unwrap();
        let blocks: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Stroke\n"));
        assert!(blocks[1].starts_with("Death\n"));
    }

    #[test]
    fn test_empty_export() {
        let records: Vec<OutcomeRecord> = Vec::new();
        assert_eq!(export_csv(&records, &FormatOptions::default()).unwrap(), "");
    }
}
