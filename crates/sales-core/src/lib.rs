pub mod config;
pub mod date_dimension;
pub mod derive;
pub mod enricher;
pub mod error;
pub mod kpi;
pub mod pipelines;
pub mod presentation;

pub use config::ReportConfig;
pub use error::{PipelineError, Result};
pub use kpi::{KpiRecord, YearlyKpis};
pub use pipelines::{process_workbook, run_pipeline, PipelineOutput};
