use chrono::NaiveDate;
use polars::prelude::*;
use sales_core::derive::{self, COST, MONTH, PROFIT, SALES, YEAR};
use sales_core::PipelineError;
use sales_workbook::{date_to_epoch_days, OrderColumn, SHEET_ROW};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn orders(
    dates: &[NaiveDate],
    quantity: &[Option<i64>],
    price: &[f64],
    cost: &[f64],
) -> DataFrame {
    let days: Vec<i32> = dates.iter().map(|d| date_to_epoch_days(*d)).collect();
    DataFrame::new(vec![
        Series::new(OrderColumn::OrderDate.canonical_name().into(), days)
            .cast(&DataType::Date)
            .expect("date cast")
            .into(),
        Series::new(OrderColumn::Quantity.canonical_name().into(), quantity.to_vec()).into(),
        Series::new(OrderColumn::UnitPrice.canonical_name().into(), price.to_vec()).into(),
        Series::new(OrderColumn::UnitCost.canonical_name().into(), cost.to_vec()).into(),
    ])
    .expect("orders frame")
}

#[test]
fn derives_amounts_and_calendar_fields() {
    let df = orders(
        &[date(2023, 1, 5), date(2023, 3, 18)],
        &[Some(10), Some(4)],
        &[5.0, 10.0],
        &[3.0, 6.0],
    );

    let derived = derive::derive_order_fields(&df).expect("derive");

    let values = |name: &str| -> Vec<f64> {
        derived
            .column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    };
    assert_eq!(values(SALES), vec![50.0, 40.0]);
    assert_eq!(values(COST), vec![30.0, 24.0]);
    assert_eq!(values(PROFIT), vec![20.0, 16.0]);

    let years = derived.column(YEAR).unwrap().i32().unwrap();
    let months = derived.column(MONTH).unwrap().i32().unwrap();
    assert_eq!(years.get(0), Some(2023));
    assert_eq!(months.get(0), Some(1));
    assert_eq!(months.get(1), Some(3));
}

#[test]
fn sales_always_equals_cost_plus_profit() {
    let df = orders(
        &[date(2022, 6, 1), date(2022, 6, 2), date(2022, 6, 3)],
        &[Some(3), Some(7), Some(11)],
        &[0.1, 19.99, 1234.567],
        &[0.3, 12.01, 999.999],
    );

    let derived = derive::derive_order_fields(&df).expect("derive");
    let sales = derived.column(SALES).unwrap().f64().unwrap();
    let cost = derived.column(COST).unwrap().f64().unwrap();
    let profit = derived.column(PROFIT).unwrap().f64().unwrap();

    for idx in 0..derived.height() {
        let (s, c, p) = (
            sales.get(idx).unwrap(),
            cost.get(idx).unwrap(),
            profit.get(idx).unwrap(),
        );
        assert!((s - (c + p)).abs() < 1e-9, "row {idx}: {s} != {c} + {p}");
    }
}

#[test]
fn null_quantity_names_sheet_header_and_row() {
    let df = orders(
        &[date(2023, 1, 5), date(2023, 1, 6)],
        &[Some(1), None],
        &[5.0, 5.0],
        &[3.0, 3.0],
    );

    let err = derive::derive_order_fields(&df).expect_err("null quantity must fail");
    match err {
        PipelineError::Computation { sheet, column, row } => {
            assert_eq!(sheet, "Sales Orders");
            assert_eq!(column, "Order Quantity");
            assert_eq!(row, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn null_cost_reports_recorded_sheet_row() {
    let mut df = orders(
        &[date(2023, 1, 5), date(2023, 1, 6)],
        &[Some(1), Some(2)],
        &[5.0, 5.0],
        &[3.0, 3.0],
    );
    df.with_column(Series::new(
        OrderColumn::UnitCost.canonical_name().into(),
        &[Some(3.0), None],
    ))
    .expect("unit cost");
    df.with_column(Series::new(SHEET_ROW.into(), &[3i64, 7]))
        .expect("sheet row");

    let err = derive::derive_order_fields(&df).expect_err("null cost must fail");
    assert_eq!(
        err.to_string(),
        "Computation failed: sheet 'Sales Orders' column 'Unit Cost' is empty at row 7"
    );
}
