//! Chart-ready totals computed from the enriched orders frame.

use std::collections::BTreeSet;

use polars::prelude::*;

use crate::derive::{CHANNEL, MONTH, PROFIT, SALES, YEAR};
use crate::enricher::{CITY, CUSTOMER_NAME, PRODUCT_NAME};

/// One value per category label, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Values indexed as `values[category][group]`; `None` where a category has no orders in a
/// group. Groups are order years, ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedTotals {
    pub categories: Vec<String>,
    pub groups: Vec<i32>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl GroupedTotals {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.groups.is_empty()
    }

    /// Values of one group across all categories.
    pub fn group_values(&self, group_idx: usize) -> Vec<Option<f64>> {
        self.values
            .iter()
            .map(|row| row.get(group_idx).copied().flatten())
            .collect()
    }

    /// Keeps only `labels`, in the order given. Labels without data are skipped.
    pub fn select(&self, labels: &[String]) -> GroupedTotals {
        let mut categories = Vec::with_capacity(labels.len());
        let mut values = Vec::with_capacity(labels.len());
        for label in labels {
            if let Some(pos) = self.categories.iter().position(|c| c == label) {
                categories.push(label.clone());
                values.push(self.values[pos].clone());
            }
        }
        GroupedTotals {
            categories,
            groups: self.groups.clone(),
            values,
        }
    }
}

pub fn sales_by_product_year(orders: &DataFrame) -> PolarsResult<GroupedTotals> {
    grouped_totals(orders, PRODUCT_NAME, SALES)
}

/// Sales per month (1..=12) with one group per year.
pub fn monthly_sales_by_year(orders: &DataFrame) -> PolarsResult<GroupedTotals> {
    let monthly = grouped_totals(orders, MONTH, SALES)?;
    let labels: Vec<String> = (1..=12).map(|month| month.to_string()).collect();
    let mut calendar = GroupedTotals {
        categories: labels.clone(),
        groups: monthly.groups.clone(),
        values: vec![vec![None; monthly.groups.len()]; labels.len()],
    };
    for (category, row) in monthly.categories.iter().zip(monthly.values) {
        if let Some(pos) = labels.iter().position(|label| label == category) {
            calendar.values[pos] = row;
        }
    }
    Ok(calendar)
}

pub fn top_cities(orders: &DataFrame, n: usize) -> PolarsResult<CategoryTotals> {
    ranked_totals(orders, CITY, SALES, n, true)
}

pub fn profit_by_channel_year(orders: &DataFrame) -> PolarsResult<GroupedTotals> {
    grouped_totals(orders, CHANNEL, PROFIT)
}

/// The `n` customers with the highest sales over all years, with their per-year sales.
pub fn top_customers(orders: &DataFrame, n: usize) -> PolarsResult<GroupedTotals> {
    ranked_customers(orders, n, true)
}

/// The `n` customers with the lowest sales over all years, with their per-year sales.
pub fn bottom_customers(orders: &DataFrame, n: usize) -> PolarsResult<GroupedTotals> {
    ranked_customers(orders, n, false)
}

fn ranked_customers(orders: &DataFrame, n: usize, descending: bool) -> PolarsResult<GroupedTotals> {
    let ranking = ranked_totals(orders, CUSTOMER_NAME, SALES, n, descending)?;
    let per_year = grouped_totals(orders, CUSTOMER_NAME, SALES)?;
    Ok(per_year.select(&ranking.labels))
}

/// Sums `value` per non-null `category`, ranks by the sum and keeps the first `n`.
/// Equal sums are ordered by label, ascending.
pub fn ranked_totals(
    orders: &DataFrame,
    category: &str,
    value: &str,
    n: usize,
    descending: bool,
) -> PolarsResult<CategoryTotals> {
    let ranked = orders
        .clone()
        .lazy()
        .filter(col(category).is_not_null())
        .group_by([col(category)])
        .agg([col(value).sum()])
        .sort(
            [value, category],
            SortMultipleOptions::default().with_order_descending_multi([descending, false]),
        )
        .limit(n as IdxSize)
        .with_column(col(category).cast(DataType::String))
        .collect()?;

    let labels = ranked.column(category)?.as_materialized_series().str()?;
    let totals = ranked.column(value)?.as_materialized_series().f64()?;

    let mut result = CategoryTotals::default();
    for idx in 0..ranked.height() {
        if let Some(label) = labels.get(idx) {
            result.labels.push(label.to_string());
            result.values.push(totals.get(idx).unwrap_or(0.0));
        }
    }
    Ok(result)
}

/// Sums `value` per (`category`, year). Categories keep the sort order of the source column;
/// rows with a null category are left out.
pub fn grouped_totals(
    orders: &DataFrame,
    category: &str,
    value: &str,
) -> PolarsResult<GroupedTotals> {
    let totals = orders
        .clone()
        .lazy()
        .filter(col(category).is_not_null())
        .group_by([col(category), col(YEAR)])
        .agg([col(value).sum()])
        .sort([category, YEAR], SortMultipleOptions::default())
        .with_column(col(category).cast(DataType::String))
        .collect()?;

    let labels = totals.column(category)?.as_materialized_series().str()?;
    let years = totals.column(YEAR)?.as_materialized_series().i32()?;
    let sums = totals.column(value)?.as_materialized_series().f64()?;

    let groups: Vec<i32> = years
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut grouped = GroupedTotals {
        groups,
        ..GroupedTotals::default()
    };

    for idx in 0..totals.height() {
        let (Some(label), Some(year)) = (labels.get(idx), years.get(idx)) else {
            continue;
        };
        let Ok(group_idx) = grouped.groups.binary_search(&year) else {
            continue;
        };
        if grouped.categories.last().map(String::as_str) != Some(label) {
            grouped.categories.push(label.to_string());
            grouped.values.push(vec![None; grouped.groups.len()]);
        }
        if let Some(row) = grouped.values.last_mut() {
            row[group_idx] = sums.get(idx);
        }
    }

    Ok(grouped)
}
