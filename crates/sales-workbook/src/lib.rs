pub mod errors;
pub mod model;
mod reader;
pub mod sheets;

pub use errors::WorkbookError;
pub use model::{
    date_to_epoch_days, epoch_days_to_date, CustomerRow, OrderColumn, ProductRow, RegionRow,
    SalesWorkbook, CUSTOMERS_SHEET, PRODUCTS_SHEET, REGIONS_SHEET, SALES_ORDERS_SHEET, SHEET_ROW,
};
pub use reader::{load_workbook, load_workbook_from_reader, read_sales_workbook};
