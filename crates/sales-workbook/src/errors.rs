use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("could not open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook is missing required sheet '{sheet}' (found: {available:?})")]
    MissingSheet {
        sheet: &'static str,
        available: Vec<String>,
    },

    #[error("sheet '{sheet}' could not be read: {source}")]
    Sheet {
        sheet: &'static str,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet '{sheet}' has no header row")]
    EmptySheet { sheet: &'static str },

    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn {
        sheet: &'static str,
        column: &'static str,
    },

    #[error("sheet '{sheet}' column '{column}' row {row} invalid: {message}")]
    InvalidCell {
        sheet: &'static str,
        column: &'static str,
        row: usize,
        message: String,
    },

    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}
