use std::fmt;

use chrono::{Duration, NaiveDate};
use polars::prelude::DataFrame;

pub const SALES_ORDERS_SHEET: &str = "Sales Orders";
pub const CUSTOMERS_SHEET: &str = "Customers";
pub const REGIONS_SHEET: &str = "Regions";
pub const PRODUCTS_SHEET: &str = "Products";

/// Orders-frame column holding the 1-based spreadsheet row each order was read from.
pub const SHEET_ROW: &str = "sheet_row";

/// Columns of the `Sales Orders` sheet and the names they carry in the orders frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderColumn {
    OrderNumber,
    OrderDate,
    ShipDate,
    Channel,
    Quantity,
    UnitPrice,
    UnitCost,
    ProductIndex,
    CustomerIndex,
    RegionIndex,
}

impl OrderColumn {
    pub const ALL: [OrderColumn; 10] = [
        OrderColumn::OrderNumber,
        OrderColumn::OrderDate,
        OrderColumn::ShipDate,
        OrderColumn::Channel,
        OrderColumn::Quantity,
        OrderColumn::UnitPrice,
        OrderColumn::UnitCost,
        OrderColumn::ProductIndex,
        OrderColumn::CustomerIndex,
        OrderColumn::RegionIndex,
    ];

    /// Header text as it appears in the spreadsheet.
    pub const fn header(&self) -> &'static str {
        match self {
            OrderColumn::OrderNumber => "OrderNumber",
            OrderColumn::OrderDate => "OrderDate",
            OrderColumn::ShipDate => "Ship Date",
            OrderColumn::Channel => "Channel",
            OrderColumn::Quantity => "Order Quantity",
            OrderColumn::UnitPrice => "Unit Selling Price",
            OrderColumn::UnitCost => "Unit Cost",
            OrderColumn::ProductIndex => "Product Description Index",
            OrderColumn::CustomerIndex => "Customer Name Index",
            OrderColumn::RegionIndex => "Delivery Region Index",
        }
    }

    pub const fn canonical_name(&self) -> &'static str {
        match self {
            OrderColumn::OrderNumber => "order_number",
            OrderColumn::OrderDate => "order_date",
            OrderColumn::ShipDate => "ship_date",
            OrderColumn::Channel => "channel",
            OrderColumn::Quantity => "order_quantity",
            OrderColumn::UnitPrice => "unit_price",
            OrderColumn::UnitCost => "unit_cost",
            OrderColumn::ProductIndex => "product_index",
            OrderColumn::CustomerIndex => "customer_index",
            OrderColumn::RegionIndex => "region_index",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, OrderColumn::OrderNumber)
    }
}

impl fmt::Display for OrderColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub index: i64,
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub customer_index: i64,
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    pub index: i64,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state_code: Option<String>,
    pub state: Option<String>,
    pub time_zone: Option<String>,
}

/// Everything read from one workbook. `orders` holds one row per sales order with the
/// columns named by [`OrderColumn::canonical_name`] followed by [`SHEET_ROW`]; dates use the
/// polars `Date` type.
#[derive(Debug, Clone)]
pub struct SalesWorkbook {
    pub orders: DataFrame,
    pub products: Vec<ProductRow>,
    pub customers: Vec<CustomerRow>,
    pub regions: Vec<RegionRow>,
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn date_to_epoch_days(date: NaiveDate) -> i32 {
    // NaiveDate::default() is 1970-01-01
    (date - NaiveDate::default()).num_days() as i32
}

pub fn epoch_days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(Duration::days(i64::from(days)))
}
