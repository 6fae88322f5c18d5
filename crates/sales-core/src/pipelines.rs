use polars::prelude::DataFrame;
use sales_workbook::{load_workbook, SalesWorkbook};
use tracing::info;

use crate::{
    config::ReportConfig,
    date_dimension::build_date_dimension,
    derive::derive_order_fields,
    enricher::enrich_orders,
    error::Result,
    kpi::{aggregate_yearly_kpis, YearlyKpis},
};

/// Tables produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Orders with derived fields and all dimension attributes joined on.
    pub orders: DataFrame,
    pub dates: DataFrame,
    pub kpis: YearlyKpis,
}

/// Loads the workbook named by `config` and runs every pipeline stage over it.
pub fn run_pipeline(config: &ReportConfig) -> Result<PipelineOutput> {
    info!(path = %config.input_path.display(), "loading sales workbook");
    let workbook = load_workbook(&config.input_path)?;
    process_workbook(&workbook)
}

/// Derive, join, build the date dimension and aggregate, in that order.
pub fn process_workbook(workbook: &SalesWorkbook) -> Result<PipelineOutput> {
    let derived = derive_order_fields(&workbook.orders)?;
    let orders = enrich_orders(
        &derived,
        &workbook.products,
        &workbook.customers,
        &workbook.regions,
    )?;
    let dates = build_date_dimension(&orders)?;
    let kpis = aggregate_yearly_kpis(&orders)?;

    info!(
        orders = orders.height(),
        days = dates.height(),
        years = kpis.len(),
        "pipeline complete"
    );

    Ok(PipelineOutput {
        orders,
        dates,
        kpis,
    })
}
