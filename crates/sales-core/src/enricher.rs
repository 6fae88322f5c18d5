use std::collections::HashMap;

use polars::prelude::*;
use sales_workbook::{CustomerRow, OrderColumn, ProductRow, RegionRow};
use tracing::warn;

use crate::error::Result;

pub const PRODUCT_NAME: &str = "product_name";
pub const CUSTOMER_NAME: &str = "customer_name";
pub const CITY: &str = "city";
pub const COUNTY: &str = "county";
pub const STATE_CODE: &str = "state_code";
pub const STATE: &str = "state";
pub const TIME_ZONE: &str = "time_zone";

/// A lookup table that can be left-joined onto the orders frame.
pub trait Dimension {
    const NAME: &'static str;
    /// Foreign-key column in the orders frame.
    const ORDER_KEY: &'static str;
    /// Columns added to the orders frame, in the order returned by [`Dimension::attributes`].
    const ATTRIBUTES: &'static [&'static str];

    fn key(&self) -> i64;
    fn attributes(&self) -> Vec<Option<String>>;
}

impl Dimension for ProductRow {
    const NAME: &'static str = "products";
    const ORDER_KEY: &'static str = OrderColumn::ProductIndex.canonical_name();
    const ATTRIBUTES: &'static [&'static str] = &[PRODUCT_NAME];

    fn key(&self) -> i64 {
        self.index
    }

    fn attributes(&self) -> Vec<Option<String>> {
        vec![self.product_name.clone()]
    }
}

impl Dimension for CustomerRow {
    const NAME: &'static str = "customers";
    const ORDER_KEY: &'static str = OrderColumn::CustomerIndex.canonical_name();
    const ATTRIBUTES: &'static [&'static str] = &[CUSTOMER_NAME];

    fn key(&self) -> i64 {
        self.customer_index
    }

    fn attributes(&self) -> Vec<Option<String>> {
        vec![self.customer_name.clone()]
    }
}

impl Dimension for RegionRow {
    const NAME: &'static str = "regions";
    const ORDER_KEY: &'static str = OrderColumn::RegionIndex.canonical_name();
    const ATTRIBUTES: &'static [&'static str] = &[CITY, COUNTY, STATE_CODE, STATE, TIME_ZONE];

    fn key(&self) -> i64 {
        self.index
    }

    fn attributes(&self) -> Vec<Option<String>> {
        vec![
            self.city.clone(),
            self.county.clone(),
            self.state_code.clone(),
            self.state.clone(),
            self.time_zone.clone(),
        ]
    }
}

/// Left-joins products, customers and regions onto the orders frame.
pub fn enrich_orders(
    orders: &DataFrame,
    products: &[ProductRow],
    customers: &[CustomerRow],
    regions: &[RegionRow],
) -> Result<DataFrame> {
    let enriched = left_join_dimension(orders, products)?;
    let enriched = left_join_dimension(&enriched, customers)?;
    left_join_dimension(&enriched, regions)
}

/// Left join through a key -> rows index built once from `rows`.
///
/// Orders whose key is null or unknown keep a row with null attributes. A key that occurs
/// more than once in the dimension yields one output row per match, in dimension order.
pub fn left_join_dimension<D: Dimension>(orders: &DataFrame, rows: &[D]) -> Result<DataFrame> {
    let mut index: HashMap<i64, Vec<&D>> = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(row.key()).or_default().push(row);
    }

    let duplicate_keys = index.values().filter(|matches| matches.len() > 1).count();
    if duplicate_keys > 0 {
        warn!(
            dimension = D::NAME,
            duplicate_keys, "duplicate dimension keys; matching orders are repeated per match"
        );
    }

    let keys = orders
        .column(D::ORDER_KEY)?
        .as_materialized_series()
        .i64()?;

    let height = orders.height();
    let mut take: Vec<IdxSize> = Vec::with_capacity(height);
    let mut attribute_columns: Vec<Vec<Option<String>>> = D::ATTRIBUTES
        .iter()
        .map(|_| Vec::with_capacity(height))
        .collect();
    let mut unmatched = 0usize;

    for idx in 0..height {
        match keys.get(idx).and_then(|key| index.get(&key)) {
            Some(matches) => {
                for row in matches {
                    take.push(idx as IdxSize);
                    for (values, value) in attribute_columns.iter_mut().zip(row.attributes()) {
                        values.push(value);
                    }
                }
            }
            None => {
                unmatched += 1;
                take.push(idx as IdxSize);
                for values in attribute_columns.iter_mut() {
                    values.push(None);
                }
            }
        }
    }

    let mut enriched = if take.len() == height {
        orders.clone()
    } else {
        orders.take(&IdxCa::from_vec("take".into(), take))?
    };

    for (name, values) in D::ATTRIBUTES.iter().zip(attribute_columns) {
        enriched.with_column(Series::new((*name).into(), values))?;
    }

    tracing::debug!(
        dimension = D::NAME,
        rows = enriched.height(),
        unmatched,
        "joined dimension"
    );
    Ok(enriched)
}
