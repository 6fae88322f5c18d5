use chrono::NaiveDate;
use polars::prelude::*;
use sales_core::derive::derive_order_fields;
use sales_core::kpi::{aggregate_yearly_kpis, percentage};
use sales_workbook::{date_to_epoch_days, OrderColumn};

/// (date, quantity, unit price, unit cost)
type Order = (NaiveDate, i64, f64, f64);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn derived_orders(rows: &[Order]) -> DataFrame {
    let df = DataFrame::new(vec![
        Series::new(
            OrderColumn::OrderDate.canonical_name().into(),
            rows.iter().map(|r| date_to_epoch_days(r.0)).collect::<Vec<_>>(),
        )
        .cast(&DataType::Date)
        .expect("date cast")
        .into(),
        Series::new(
            OrderColumn::Quantity.canonical_name().into(),
            rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            OrderColumn::UnitPrice.canonical_name().into(),
            rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            OrderColumn::UnitCost.canonical_name().into(),
            rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        )
        .into(),
    ])
    .expect("orders frame");
    derive_order_fields(&df).expect("derive")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_year_has_no_prior_year_values() {
    let orders = derived_orders(&[
        (date(2023, 1, 5), 10, 5.0, 3.0),
        (date(2023, 3, 18), 4, 10.0, 6.0),
    ]);

    let kpis = aggregate_yearly_kpis(&orders).expect("kpis");
    assert_eq!(kpis.len(), 1);

    let record = &kpis.records[0];
    assert_eq!(record.year, 2023);
    assert!(approx(record.sales, 90.0));
    assert!(approx(record.cost, 54.0));
    assert!(approx(record.profit, 36.0));
    assert_eq!(record.quantity, 14);
    assert!(approx(record.profit_margin_pct.unwrap(), 40.0));
    assert_eq!(record.sales_py, None);
    assert_eq!(record.sales_var, None);
    assert_eq!(record.sales_var_pct, None);
}

#[test]
fn second_year_compares_against_the_first() {
    let orders = derived_orders(&[
        (date(2024, 2, 1), 20, 5.0, 2.0),
        (date(2023, 1, 5), 10, 5.0, 3.0),
        (date(2023, 3, 18), 4, 10.0, 6.0),
    ]);

    let kpis = aggregate_yearly_kpis(&orders).expect("kpis");
    let years: Vec<i32> = kpis.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2023, 2024]);

    let current = kpis.get(2024).expect("2024 record");
    assert!(approx(current.sales, 100.0));
    assert!(approx(current.profit, 60.0));
    assert!(approx(current.profit_margin_pct.unwrap(), 60.0));
    assert!(approx(current.sales_py.unwrap(), 90.0));
    assert!(approx(current.sales_var.unwrap(), 10.0));
    assert!(approx(current.sales_var_pct.unwrap(), 10.0));
}

#[test]
fn prior_year_skips_missing_years() {
    let orders = derived_orders(&[
        (date(2021, 5, 1), 2, 10.0, 5.0),
        (date(2024, 5, 1), 3, 10.0, 5.0),
    ]);

    let kpis = aggregate_yearly_kpis(&orders).expect("kpis");
    assert_eq!(kpis.len(), 2);

    let later = kpis.get(2024).expect("2024 record");
    assert!(approx(later.sales_py.unwrap(), 20.0));
    assert!(approx(later.sales_var.unwrap(), 10.0));
    assert!(kpis.get(2022).is_none());
    assert!(kpis.get(2023).is_none());
}

#[test]
fn zero_sales_leaves_percentages_undefined() {
    let orders = derived_orders(&[
        (date(2022, 1, 1), 5, 4.0, 1.0),
        (date(2023, 1, 1), 5, 0.0, 1.0),
    ]);

    let kpis = aggregate_yearly_kpis(&orders).expect("kpis");
    let free = kpis.get(2023).expect("2023 record");
    assert!(approx(free.sales, 0.0));
    assert!(approx(free.profit, -5.0));
    assert_eq!(free.profit_margin_pct, None);
    assert!(approx(free.sales_var.unwrap(), -20.0));
    assert_eq!(free.sales_var_pct, None);
}

#[test]
fn kpi_frame_uses_nulls_for_undefined_values() {
    let orders = derived_orders(&[
        (date(2023, 1, 5), 10, 5.0, 3.0),
        (date(2024, 2, 1), 20, 5.0, 2.0),
    ]);

    let frame = aggregate_yearly_kpis(&orders)
        .expect("kpis")
        .to_frame()
        .expect("frame");

    assert_eq!(frame.height(), 2);
    assert_eq!(frame.column("sales_py").unwrap().null_count(), 1);
    assert_eq!(frame.column("sales_var_pct").unwrap().null_count(), 1);
    assert_eq!(frame.column("profit_margin_pct").unwrap().null_count(), 0);
}

#[test]
fn percentage_of_zero_is_undefined() {
    assert_eq!(percentage(1.0, 0.0), None);
    assert_eq!(percentage(0.0, 0.0), None);
    assert_eq!(percentage(1.0, 4.0), Some(25.0));
}
