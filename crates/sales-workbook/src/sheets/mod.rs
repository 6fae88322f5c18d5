pub(crate) mod common;
pub mod dimensions;
pub mod orders;

pub use dimensions::{read_customers, read_products, read_regions};
pub use orders::read_orders;
