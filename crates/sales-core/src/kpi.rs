use polars::prelude::*;

use crate::derive::{COST, PROFIT, QUANTITY, SALES, YEAR};
use crate::error::Result;

/// Yearly totals plus the period-over-period comparison against the previous year present
/// in the data. `None` marks a value that is undefined (first year, or zero sales).
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRecord {
    pub year: i32,
    pub sales: f64,
    pub profit: f64,
    pub cost: f64,
    pub quantity: i64,
    pub profit_margin_pct: Option<f64>,
    pub sales_py: Option<f64>,
    pub sales_var: Option<f64>,
    pub sales_var_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyKpis {
    pub records: Vec<KpiRecord>,
}

impl YearlyKpis {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KpiRecord> {
        self.records.iter()
    }

    pub fn get(&self, year: i32) -> Option<&KpiRecord> {
        self.records.iter().find(|record| record.year == year)
    }

    /// The KPI table as a frame; undefined values become nulls.
    pub fn to_frame(&self) -> std::result::Result<DataFrame, PolarsError> {
        let pick = |f: fn(&KpiRecord) -> Option<f64>| -> Vec<Option<f64>> {
            self.records.iter().map(f).collect()
        };

        DataFrame::new(vec![
            Series::new(
                YEAR.into(),
                self.records.iter().map(|r| r.year).collect::<Vec<_>>(),
            )
            .into(),
            Series::new(SALES.into(), pick(|r| Some(r.sales))).into(),
            Series::new(PROFIT.into(), pick(|r| Some(r.profit))).into(),
            Series::new(COST.into(), pick(|r| Some(r.cost))).into(),
            Series::new(
                QUANTITY.into(),
                self.records.iter().map(|r| r.quantity).collect::<Vec<_>>(),
            )
            .into(),
            Series::new("profit_margin_pct".into(), pick(|r| r.profit_margin_pct)).into(),
            Series::new("sales_py".into(), pick(|r| r.sales_py)).into(),
            Series::new("sales_var".into(), pick(|r| r.sales_var)).into(),
            Series::new("sales_var_pct".into(), pick(|r| r.sales_var_pct)).into(),
        ])
    }
}

/// Groups enriched orders by year, sums the money columns and quantity, and derives the
/// margin and prior-year comparison on the year-sorted totals.
pub fn aggregate_yearly_kpis(orders: &DataFrame) -> Result<YearlyKpis> {
    let totals = orders
        .clone()
        .lazy()
        .group_by([col(YEAR)])
        .agg([
            col(SALES).sum(),
            col(PROFIT).sum(),
            col(COST).sum(),
            col(QUANTITY).sum(),
        ])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    let years = totals.column(YEAR)?.as_materialized_series().i32()?;
    let sales = totals.column(SALES)?.as_materialized_series().f64()?;
    let profit = totals.column(PROFIT)?.as_materialized_series().f64()?;
    let cost = totals.column(COST)?.as_materialized_series().f64()?;
    let quantity = totals.column(QUANTITY)?.as_materialized_series().i64()?;

    let mut records = Vec::with_capacity(totals.height());
    let mut previous_sales: Option<f64> = None;

    for idx in 0..totals.height() {
        let Some(year) = years.get(idx) else {
            continue;
        };
        let year_sales = sales.get(idx).unwrap_or(0.0);
        let year_profit = profit.get(idx).unwrap_or(0.0);
        let sales_py = previous_sales;
        let sales_var = sales_py.map(|py| year_sales - py);

        records.push(KpiRecord {
            year,
            sales: year_sales,
            profit: year_profit,
            cost: cost.get(idx).unwrap_or(0.0),
            quantity: quantity.get(idx).unwrap_or(0),
            profit_margin_pct: percentage(year_profit, year_sales),
            sales_py,
            sales_var,
            sales_var_pct: sales_var.and_then(|var| percentage(var, year_sales)),
        });
        previous_sales = Some(year_sales);
    }

    tracing::info!(years = records.len(), "aggregated yearly KPIs");
    Ok(YearlyKpis { records })
}

/// `100 * numerator / denominator`, undefined when the denominator is zero.
pub fn percentage(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(100.0 * numerator / denominator)
    }
}
