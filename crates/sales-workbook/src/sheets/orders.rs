use std::collections::HashMap;

use calamine::{Data, Range};
use polars::prelude::*;

use super::common::SheetTable;
use crate::errors::WorkbookError;
use crate::model::{date_to_epoch_days, OrderColumn, SALES_ORDERS_SHEET, SHEET_ROW};

struct OrderColumns {
    order_number: Vec<Option<String>>,
    order_date: Vec<i32>,
    ship_date: Vec<i32>,
    channel: Vec<Option<String>>,
    quantity: Vec<Option<i64>>,
    unit_price: Vec<Option<f64>>,
    unit_cost: Vec<Option<f64>>,
    product_index: Vec<Option<i64>>,
    customer_index: Vec<Option<i64>>,
    region_index: Vec<Option<i64>>,
    sheet_row: Vec<i64>,
}

impl OrderColumns {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            order_number: Vec::with_capacity(capacity),
            order_date: Vec::with_capacity(capacity),
            ship_date: Vec::with_capacity(capacity),
            channel: Vec::with_capacity(capacity),
            quantity: Vec::with_capacity(capacity),
            unit_price: Vec::with_capacity(capacity),
            unit_cost: Vec::with_capacity(capacity),
            product_index: Vec::with_capacity(capacity),
            customer_index: Vec::with_capacity(capacity),
            region_index: Vec::with_capacity(capacity),
            sheet_row: Vec::with_capacity(capacity),
        }
    }

    fn into_frame(self) -> Result<DataFrame, PolarsError> {
        let date_type = DataType::Date;
        DataFrame::new(vec![
            Series::new(
                OrderColumn::OrderNumber.canonical_name().into(),
                self.order_number,
            )
            .into(),
            Series::new(OrderColumn::OrderDate.canonical_name().into(), self.order_date)
                .cast(&date_type)?
                .into(),
            Series::new(OrderColumn::ShipDate.canonical_name().into(), self.ship_date)
                .cast(&date_type)?
                .into(),
            Series::new(OrderColumn::Channel.canonical_name().into(), self.channel).into(),
            Series::new(OrderColumn::Quantity.canonical_name().into(), self.quantity).into(),
            Series::new(OrderColumn::UnitPrice.canonical_name().into(), self.unit_price).into(),
            Series::new(OrderColumn::UnitCost.canonical_name().into(), self.unit_cost).into(),
            Series::new(
                OrderColumn::ProductIndex.canonical_name().into(),
                self.product_index,
            )
            .into(),
            Series::new(
                OrderColumn::CustomerIndex.canonical_name().into(),
                self.customer_index,
            )
            .into(),
            Series::new(
                OrderColumn::RegionIndex.canonical_name().into(),
                self.region_index,
            )
            .into(),
            Series::new(SHEET_ROW.into(), self.sheet_row).into(),
        ])
    }
}

/// Reads the `Sales Orders` sheet into the orders frame.
pub fn read_orders(range: &Range<Data>) -> Result<DataFrame, WorkbookError> {
    let table = SheetTable::new(SALES_ORDERS_SHEET, range)?;

    let mut positions: HashMap<OrderColumn, usize> = HashMap::new();
    for column in OrderColumn::ALL {
        let position = if column.is_required() {
            Some(table.require(column.header())?)
        } else {
            table.optional(column.header())
        };
        if let Some(position) = position {
            positions.insert(column, position);
        }
    }
    // required columns are always present past this point
    let at = |column: OrderColumn| positions.get(&column).copied().unwrap_or_default();

    let mut columns = OrderColumns::with_capacity(table.data_row_count());

    for row in table.data_rows() {
        columns
            .order_number
            .push(row.text(positions.get(&OrderColumn::OrderNumber).copied()));
        columns.order_date.push(date_to_epoch_days(
            row.date(OrderColumn::OrderDate.header(), at(OrderColumn::OrderDate))?,
        ));
        columns.ship_date.push(date_to_epoch_days(
            row.date(OrderColumn::ShipDate.header(), at(OrderColumn::ShipDate))?,
        ));
        columns
            .channel
            .push(row.text(Some(at(OrderColumn::Channel))));
        columns
            .quantity
            .push(row.integer(OrderColumn::Quantity.header(), at(OrderColumn::Quantity))?);
        columns
            .unit_price
            .push(row.float(OrderColumn::UnitPrice.header(), at(OrderColumn::UnitPrice))?);
        columns
            .unit_cost
            .push(row.float(OrderColumn::UnitCost.header(), at(OrderColumn::UnitCost))?);
        columns.product_index.push(
            row.integer(OrderColumn::ProductIndex.header(), at(OrderColumn::ProductIndex))?,
        );
        columns.customer_index.push(
            row.integer(OrderColumn::CustomerIndex.header(), at(OrderColumn::CustomerIndex))?,
        );
        columns
            .region_index
            .push(row.integer(OrderColumn::RegionIndex.header(), at(OrderColumn::RegionIndex))?);
        columns.sheet_row.push(row.row_number() as i64);
    }

    let frame = columns.into_frame()?;
    tracing::debug!(sheet = table.sheet(), rows = frame.height(), "loaded orders");
    Ok(frame)
}
