//! Charts and the console summary built from pipeline output. Nothing here feeds back into
//! the pipeline.

pub mod aggregates;
pub mod charts;
pub mod style;
pub mod summary;

pub use charts::{render_chart, render_charts, ChartId, ChartReport, PresentationError};
pub use style::{ChartStyle, CHART_STYLE};
pub use summary::{kpi_summary_table, print_summary, render_summary, SUMMARY_BANNER};
