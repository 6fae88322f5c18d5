use sales_core::presentation::summary::{
    format_value, render_summary, SUMMARY_BANNER, SUMMARY_COLUMNS,
};
use sales_core::{KpiRecord, YearlyKpis};

fn kpis() -> YearlyKpis {
    YearlyKpis {
        records: vec![
            KpiRecord {
                year: 2023,
                sales: 90.0,
                profit: 36.0,
                cost: 54.0,
                quantity: 14,
                profit_margin_pct: Some(40.0),
                sales_py: None,
                sales_var: None,
                sales_var_pct: None,
            },
            KpiRecord {
                year: 2024,
                sales: 100.0,
                profit: 60.0,
                cost: 40.0,
                quantity: 20,
                profit_margin_pct: Some(60.0),
                sales_py: Some(90.0),
                sales_var: Some(10.0),
                sales_var_pct: Some(10.0),
            },
        ],
    }
}

#[test]
fn summary_starts_with_banner_and_lists_every_column() {
    let text = render_summary(&kpis());

    assert_eq!(text.lines().next(), Some(SUMMARY_BANNER));
    for column in SUMMARY_COLUMNS {
        assert!(text.contains(column), "missing column {column}");
    }
}

#[test]
fn summary_rows_follow_year_order_with_nan_for_undefined() {
    let text = render_summary(&kpis());

    let first = text.lines().find(|line| line.contains("2023")).expect("2023 row");
    let second = text.lines().find(|line| line.contains("2024")).expect("2024 row");
    assert!(text.find("2023") < text.find("2024"));

    assert_eq!(first.matches("NaN").count(), 3);
    assert!(first.contains("40.00"));
    assert!(second.contains("90.00"));
    assert!(second.contains("10.00"));
    assert!(!second.contains("NaN"));
}

#[test]
fn empty_kpis_still_print_the_header() {
    let text = render_summary(&YearlyKpis::default());
    assert!(text.starts_with(SUMMARY_BANNER));
    assert!(text.contains("Profit Margin %"));
}

#[test]
fn values_print_with_two_decimals() {
    assert_eq!(format_value(Some(11.111)), "11.11");
    assert_eq!(format_value(Some(-5.0)), "-5.00");
    assert_eq!(format_value(None), "NaN");
}
