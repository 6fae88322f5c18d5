use polars::prelude::*;
use sales_workbook::{OrderColumn, SALES_ORDERS_SHEET, SHEET_ROW};

use crate::error::{PipelineError, Result};

pub const ORDER_DATE: &str = OrderColumn::OrderDate.canonical_name();
pub const QUANTITY: &str = OrderColumn::Quantity.canonical_name();
pub const CHANNEL: &str = OrderColumn::Channel.canonical_name();
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const SALES: &str = "sales";
pub const COST: &str = "cost";
pub const PROFIT: &str = "profit";

const REQUIRED_NUMERIC: [OrderColumn; 3] = [
    OrderColumn::Quantity,
    OrderColumn::UnitPrice,
    OrderColumn::UnitCost,
];

/// Adds `year`, `month`, `sales`, `cost` and `profit` to the orders frame.
///
/// `profit` is computed as `sales - cost` so the two always reconcile exactly. A null in any
/// of the numeric inputs aborts with [`PipelineError::Computation`] naming the spreadsheet
/// header and row.
pub fn derive_order_fields(orders: &DataFrame) -> Result<DataFrame> {
    for column in REQUIRED_NUMERIC {
        let values = orders.column(column.canonical_name())?;
        if values.null_count() == 0 {
            continue;
        }
        let position = values
            .as_materialized_series()
            .is_null()
            .into_iter()
            .position(|is_null| is_null == Some(true))
            .unwrap_or_default();
        return Err(PipelineError::Computation {
            sheet: SALES_ORDERS_SHEET,
            column: column.header(),
            row: sheet_row(orders, position)?,
        });
    }

    let quantity = col(QUANTITY).cast(DataType::Float64);

    let derived = orders
        .clone()
        .lazy()
        .with_columns([
            col(ORDER_DATE).dt().year().cast(DataType::Int32).alias(YEAR),
            col(ORDER_DATE).dt().month().cast(DataType::Int32).alias(MONTH),
            (quantity.clone() * col(OrderColumn::UnitPrice.canonical_name())).alias(SALES),
            (quantity * col(OrderColumn::UnitCost.canonical_name())).alias(COST),
        ])
        .with_column((col(SALES) - col(COST)).alias(PROFIT))
        .collect()?;

    tracing::debug!(rows = derived.height(), "derived order fields");
    Ok(derived)
}

/// Spreadsheet row of the order at `position`. Frames built without [`SHEET_ROW`] are taken
/// to start right below a header on row 1.
fn sheet_row(orders: &DataFrame, position: usize) -> Result<usize> {
    let recorded = match orders.column(SHEET_ROW) {
        Ok(rows) => rows
            .as_materialized_series()
            .i64()?
            .get(position)
            .map(|row| row as usize),
        Err(_) => None,
    };
    Ok(recorded.unwrap_or(position + 2))
}
