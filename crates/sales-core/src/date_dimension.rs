use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use sales_workbook::{date_to_epoch_days, epoch_days_to_date};

use crate::derive::ORDER_DATE;
use crate::error::Result;

pub const DATE: &str = "date";
pub const DATE_YEAR: &str = "year";
pub const DATE_MONTH: &str = "month";
pub const QUARTER: &str = "quarter";
pub const DAY_OF_WEEK: &str = "day_of_week";

/// One row per calendar day between the earliest and latest order date, inclusive.
/// `day_of_week` counts from Monday = 0. No orders gives an empty frame.
pub fn build_date_dimension(orders: &DataFrame) -> Result<DataFrame> {
    let days = orders.column(ORDER_DATE)?.cast(&DataType::Int32)?;
    let days = days.as_materialized_series().i32()?;

    let calendar: Vec<NaiveDate> = match (days.min(), days.max()) {
        (Some(first), Some(last)) => {
            let start = epoch_days_to_date(first).ok_or_else(|| out_of_range(first))?;
            let end = epoch_days_to_date(last).ok_or_else(|| out_of_range(last))?;
            start.iter_days().take_while(|day| *day <= end).collect()
        }
        _ => Vec::new(),
    };

    let mut dates = Vec::with_capacity(calendar.len());
    let mut years = Vec::with_capacity(calendar.len());
    let mut months = Vec::with_capacity(calendar.len());
    let mut quarters = Vec::with_capacity(calendar.len());
    let mut weekdays = Vec::with_capacity(calendar.len());

    for day in &calendar {
        dates.push(date_to_epoch_days(*day));
        years.push(day.year());
        months.push(day.month() as i32);
        quarters.push(quarter_of(day.month()));
        weekdays.push(day.weekday().num_days_from_monday() as i32);
    }

    let frame = DataFrame::new(vec![
        Series::new(DATE.into(), dates).cast(&DataType::Date)?.into(),
        Series::new(DATE_YEAR.into(), years).into(),
        Series::new(DATE_MONTH.into(), months).into(),
        Series::new(QUARTER.into(), quarters).into(),
        Series::new(DAY_OF_WEEK.into(), weekdays).into(),
    ])?;

    tracing::debug!(days = frame.height(), "built date dimension");
    Ok(frame)
}

pub fn quarter_of(month: u32) -> i32 {
    ((month as i32) - 1) / 3 + 1
}

fn out_of_range(days: i32) -> PolarsError {
    PolarsError::ComputeError(format!("order date {days} days from epoch is out of range").into())
}
