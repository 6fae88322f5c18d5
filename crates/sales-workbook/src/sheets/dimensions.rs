use calamine::{Data, Range};

use super::common::SheetTable;
use crate::errors::WorkbookError;
use crate::model::{
    CustomerRow, ProductRow, RegionRow, CUSTOMERS_SHEET, PRODUCTS_SHEET, REGIONS_SHEET,
};

const PRODUCT_INDEX: &str = "Index";
const PRODUCT_NAME: &str = "Product Name";
const CUSTOMER_INDEX: &str = "Customer Index";
const CUSTOMER_NAME: &str = "Customer Names";
const REGION_INDEX: &str = "Index";
const REGION_CITY: &str = "City";
const REGION_COUNTY: &str = "County";
const REGION_STATE_CODE: &str = "StateCode";
const REGION_STATE: &str = "State";
const REGION_TIME_ZONE: &str = "Time Zone";

pub fn read_products(range: &Range<Data>) -> Result<Vec<ProductRow>, WorkbookError> {
    let table = SheetTable::new(PRODUCTS_SHEET, range)?;
    let index = table.require(PRODUCT_INDEX)?;
    let name = table.require(PRODUCT_NAME)?;

    table
        .data_rows()
        .map(|row| {
            Ok(ProductRow {
                index: row.key(PRODUCT_INDEX, index)?,
                product_name: row.text(Some(name)),
            })
        })
        .collect()
}

pub fn read_customers(range: &Range<Data>) -> Result<Vec<CustomerRow>, WorkbookError> {
    let table = SheetTable::new(CUSTOMERS_SHEET, range)?;
    let index = table.require(CUSTOMER_INDEX)?;
    let name = table.require(CUSTOMER_NAME)?;

    table
        .data_rows()
        .map(|row| {
            Ok(CustomerRow {
                customer_index: row.key(CUSTOMER_INDEX, index)?,
                customer_name: row.text(Some(name)),
            })
        })
        .collect()
}

pub fn read_regions(range: &Range<Data>) -> Result<Vec<RegionRow>, WorkbookError> {
    let table = SheetTable::new(REGIONS_SHEET, range)?;
    let index = table.require(REGION_INDEX)?;
    let city = table.require(REGION_CITY)?;
    let county = table.optional(REGION_COUNTY);
    let state_code = table.optional(REGION_STATE_CODE);
    let state = table.optional(REGION_STATE);
    let time_zone = table.optional(REGION_TIME_ZONE);

    table
        .data_rows()
        .map(|row| {
            Ok(RegionRow {
                index: row.key(REGION_INDEX, index)?,
                city: row.text(Some(city)),
                county: row.text(county),
                state_code: row.text(state_code),
                state: row.text(state),
                time_zone: row.text(time_zone),
            })
        })
        .collect()
}
