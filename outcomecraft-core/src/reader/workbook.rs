//! Workbook loader using calamine

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use log::debug;
use std::io::Cursor;

use super::{Grid, GridLoader};
use crate::error::LoadError;

/// Reads the first sheet of an xlsx/xlsm/xlsb/xls/ods workbook
pub struct WorkbookLoader;

impl GridLoader for WorkbookLoader {
    fn load(&self, bytes: &[u8]) -> Result<Grid, LoadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;

        // Keep absolute positions so row/column offsets match the sheet.
        let Some((end_row, end_col)) = range.end() else {
            return Ok(Grid::default());
        };

        let mut rows = Vec::with_capacity(end_row as usize + 1);
        for row in 0..=end_row {
            let cells = (0..=end_col)
                .map(|col| range.get_value((row, col)).map(cell_text).unwrap_or_default())
                .collect();
            rows.push(cells);
        }

        debug!(
            "loaded first sheet with {} rows and {} columns",
            end_row + 1,
            end_col + 1
        );
        Ok(Grid::from_rows(rows))
    }
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::String(s) => s.clone(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
        Data::DateTime(dt) => number_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Integral floats print without a fractional part, matching how they display in the sheet
fn number_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
