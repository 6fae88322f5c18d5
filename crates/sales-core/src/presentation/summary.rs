use comfy_table::{presets::ASCII_FULL, CellAlignment, Table};

use crate::kpi::{KpiRecord, YearlyKpis};

pub const SUMMARY_BANNER: &str = "========= KPI SUMMARY =========";

pub const SUMMARY_COLUMNS: [&str; 7] = [
    "Year",
    "Sales",
    "Sales PY",
    "Sales Var",
    "Sales Var %",
    "Profit",
    "Profit Margin %",
];

pub fn kpi_summary_table(kpis: &YearlyKpis) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(SUMMARY_COLUMNS);

    for record in kpis.iter() {
        table.add_row(summary_row(record));
    }

    for idx in 1..SUMMARY_COLUMNS.len() {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

/// Banner plus table, one row per year in ascending order.
pub fn render_summary(kpis: &YearlyKpis) -> String {
    format!("{SUMMARY_BANNER}\n{}", kpi_summary_table(kpis))
}

pub fn print_summary(kpis: &YearlyKpis) {
    println!("{}", render_summary(kpis));
}

fn summary_row(record: &KpiRecord) -> Vec<String> {
    vec![
        record.year.to_string(),
        format_value(Some(record.sales)),
        format_value(record.sales_py),
        format_value(record.sales_var),
        format_value(record.sales_var_pct),
        format_value(Some(record.profit)),
        format_value(record.profit_margin_pct),
    ]
}

/// Two decimals; undefined values print as `NaN`.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "NaN".to_string(),
    }
}
