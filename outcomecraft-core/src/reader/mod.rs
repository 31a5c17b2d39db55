//! Export file loaders
//!
//! Every supported input ends up as a [`Grid`] of strings. The file
//! extension only picks the loader; content is never validated against it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LoadError;

pub mod delimited;
pub mod grid;
pub mod workbook;

use self::delimited::DelimitedLoader;
use self::workbook::WorkbookLoader;
pub use grid::Grid;

/// Trait for the format-specific loaders
pub trait GridLoader {
    fn load(&self, bytes: &[u8]) -> Result<Grid, LoadError>;
}

/// Which loader handles a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Comma or tab separated text
    Delimited,
    /// Binary or zipped spreadsheet workbook
    Workbook,
}

impl FileKind {
    /// Select the loader from a file name's extension
    pub fn from_file_name(name: &str) -> Result<Self, LoadError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "csv" | "tsv" | "txt" => Ok(FileKind::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(FileKind::Workbook),
            _ => Err(LoadError::UnsupportedFormat { extension }),
        }
    }
}

/// How delimited text bytes are decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// Strict UTF-8. Invalid input is a load error.
    #[default]
    Utf8,
    /// Windows-1252, as written by Excel's "CSV" on Windows
    #[serde(rename = "windows-1252")]
    Windows1252,
    /// UTF-8, falling back to Windows-1252 when the bytes are not valid UTF-8
    Auto,
}

/// Loader configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    pub encoding: TextEncoding,
}

/// Load raw bytes of the given kind into a grid
pub fn load_grid(bytes: &[u8], kind: FileKind, options: &LoaderOptions) -> Result<Grid, LoadError> {
    let loader: Box<dyn GridLoader> = match kind {
        FileKind::Delimited => Box::new(DelimitedLoader::new(options.encoding)),
        FileKind::Workbook => Box::new(WorkbookLoader),
    };
    loader.load(bytes)
}
