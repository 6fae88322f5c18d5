use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::info;

use crate::errors::WorkbookError;
use crate::model::{
    SalesWorkbook, CUSTOMERS_SHEET, PRODUCTS_SHEET, REGIONS_SHEET, SALES_ORDERS_SHEET,
};
use crate::sheets::{read_customers, read_orders, read_products, read_regions};

/// Opens the spreadsheet at `path` and reads the four sheets. The file handle lives only
/// for the duration of this call.
pub fn load_workbook(path: impl AsRef<Path>) -> Result<SalesWorkbook, WorkbookError> {
    let path = path.as_ref();
    let mut sheets = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "opened workbook");
    read_sales_workbook(&mut sheets)
}

/// Same as [`load_workbook`] for an in-memory or already opened source.
pub fn load_workbook_from_reader<RS>(reader: RS) -> Result<SalesWorkbook, WorkbookError>
where
    RS: Read + Seek + Clone,
{
    let mut sheets =
        open_workbook_auto_from_rs(reader).map_err(|source| WorkbookError::Open {
            path: "<reader>".into(),
            source,
        })?;
    read_sales_workbook(&mut sheets)
}

pub fn read_sales_workbook<RS>(sheets: &mut Sheets<RS>) -> Result<SalesWorkbook, WorkbookError>
where
    RS: Read + Seek,
{
    let orders = read_orders(&sheet_range(sheets, SALES_ORDERS_SHEET)?)?;
    let customers = read_customers(&sheet_range(sheets, CUSTOMERS_SHEET)?)?;
    let regions = read_regions(&sheet_range(sheets, REGIONS_SHEET)?)?;
    let products = read_products(&sheet_range(sheets, PRODUCTS_SHEET)?)?;

    info!(
        orders = orders.height(),
        customers = customers.len(),
        regions = regions.len(),
        products = products.len(),
        "workbook loaded"
    );

    Ok(SalesWorkbook {
        orders,
        products,
        customers,
        regions,
    })
}

fn sheet_range<RS>(
    sheets: &mut Sheets<RS>,
    sheet: &'static str,
) -> Result<Range<Data>, WorkbookError>
where
    RS: Read + Seek,
{
    let available = sheets.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(WorkbookError::MissingSheet { sheet, available });
    }

    sheets
        .worksheet_range(sheet)
        .map_err(|source| WorkbookError::Sheet { sheet, source })
}
