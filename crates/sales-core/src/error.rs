// crates/sales-core/src/error.rs

use sales_workbook::WorkbookError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Data load failed: {0}")]
    DataLoad(#[from] WorkbookError),

    #[error("Computation failed: sheet '{sheet}' column '{column}' is empty at row {row}")]
    Computation {
        sheet: &'static str,
        column: &'static str,
        row: usize,
    },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
