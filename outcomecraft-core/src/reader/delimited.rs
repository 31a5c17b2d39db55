//! Delimited text loader
//!
//! Exports arrive as comma separated text, but some were re-saved as tab
//! separated. Each line is parsed with both delimiters and the wider parse
//! wins, so mixed files still produce sensible rows.

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::WINDOWS_1252;
use log::debug;
use std::borrow::Cow;

use super::{Grid, GridLoader, TextEncoding};
use crate::error::LoadError;

pub struct DelimitedLoader {
    encoding: TextEncoding,
}

impl DelimitedLoader {
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }
}

impl GridLoader for DelimitedLoader {
    fn load(&self, bytes: &[u8]) -> Result<Grid, LoadError> {
        let text = decode(bytes, self.encoding)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text.as_ref());

        let mut rows = Vec::new();
        let mut tab_rows = 0usize;
        for (index, line) in text.lines().enumerate() {
            let (fields, used_tab) = split_line(line, index + 1)?;
            if used_tab {
                tab_rows += 1;
            }
            rows.push(fields);
        }

        debug!(
            "parsed {} delimited rows ({} tab separated)",
            rows.len(),
            tab_rows
        );
        Ok(Grid::from_rows(rows))
    }
}

fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<Cow<'_, str>, LoadError> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| LoadError::Decode {
                offset: e.valid_up_to(),
            }),
        TextEncoding::Windows1252 => Ok(WINDOWS_1252.decode_without_bom_handling(bytes).0),
        TextEncoding::Auto => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Cow::Borrowed(text)),
            Err(_) => {
                debug!("input is not UTF-8, decoding as Windows-1252");
                Ok(WINDOWS_1252.decode_without_bom_handling(bytes).0)
            }
        },
    }
}

/// Split one line, returning the fields and whether the tab parse was chosen
fn split_line(line: &str, line_number: usize) -> Result<(Vec<String>, bool), LoadError> {
    let to_error = |source: csv::Error| LoadError::Csv {
        line: line_number,
        source,
    };
    let by_comma = parse_record(line, b',').map_err(to_error)?;
    let by_tab = parse_record(line, b'\t').map_err(to_error)?;

    if by_tab.len() > by_comma.len() {
        Ok((by_tab, true))
    } else {
        Ok((by_comma, false))
    }
}

fn parse_record(line: &str, delimiter: u8) -> Result<Vec<String>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record.iter().map(str::to_string).collect())
    } else {
        // A blank line still occupies a row.
        Ok(vec![String::new()])
    }
}
