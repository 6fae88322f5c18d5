use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;
use tracing::{info, warn};

use super::aggregates::{self, CategoryTotals, GroupedTotals};
use super::style::{ChartStyle, CHART_STYLE};
use crate::kpi::{KpiRecord, YearlyKpis};

const RANKED_LIMIT: usize = 5;

type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    SalesPerYear,
    ProfitPerYear,
    ProfitMarginPerYear,
    SalesByProductYear,
    MonthlySalesPerYear,
    TopCitiesBySales,
    ProfitByChannelYear,
    TopCustomersBySales,
    BottomCustomersBySales,
}

impl ChartId {
    pub const ALL: [ChartId; 9] = [
        ChartId::SalesPerYear,
        ChartId::ProfitPerYear,
        ChartId::ProfitMarginPerYear,
        ChartId::SalesByProductYear,
        ChartId::MonthlySalesPerYear,
        ChartId::TopCitiesBySales,
        ChartId::ProfitByChannelYear,
        ChartId::TopCustomersBySales,
        ChartId::BottomCustomersBySales,
    ];

    pub const fn file_stem(&self) -> &'static str {
        match self {
            ChartId::SalesPerYear => "sales_per_year",
            ChartId::ProfitPerYear => "profit_per_year",
            ChartId::ProfitMarginPerYear => "profit_margin_per_year",
            ChartId::SalesByProductYear => "sales_by_product_year",
            ChartId::MonthlySalesPerYear => "monthly_sales_per_year",
            ChartId::TopCitiesBySales => "top_cities_by_sales",
            ChartId::ProfitByChannelYear => "profit_by_channel_year",
            ChartId::TopCustomersBySales => "top_customers_by_sales",
            ChartId::BottomCustomersBySales => "bottom_customers_by_sales",
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            ChartId::SalesPerYear => "Total Sales per Year",
            ChartId::ProfitPerYear => "Profit per Year",
            ChartId::ProfitMarginPerYear => "Profit Margin % per Year",
            ChartId::SalesByProductYear => "Sales by Product and Year",
            ChartId::MonthlySalesPerYear => "Monthly Sales per Year",
            ChartId::TopCitiesBySales => "Top 5 Cities by Sales",
            ChartId::ProfitByChannelYear => "Profit by Channel and Year",
            ChartId::TopCustomersBySales => "Top 5 Customers by Sales",
            ChartId::BottomCustomersBySales => "Bottom 5 Customers by Sales",
        }
    }

    /// Pixel size of the rendered image.
    pub const fn size(&self) -> (u32, u32) {
        match self {
            ChartId::SalesPerYear | ChartId::ProfitPerYear | ChartId::ProfitMarginPerYear => {
                (800, 500)
            }
            ChartId::SalesByProductYear
            | ChartId::TopCustomersBySales
            | ChartId::BottomCustomersBySales => (1000, 600),
            ChartId::MonthlySalesPerYear
            | ChartId::TopCitiesBySales
            | ChartId::ProfitByChannelYear => (1000, 500),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.svg", self.file_stem())
    }
}

#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("could not aggregate data for chart '{chart}': {source}")]
    Aggregation {
        chart: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("could not render chart '{chart}' to {}: {message}", .path.display())]
    Render {
        chart: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("could not create chart directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one rendering pass. Charts fail independently of each other.
#[derive(Debug, Default)]
pub struct ChartReport {
    pub rendered: Vec<PathBuf>,
    pub failures: Vec<PresentationError>,
}

impl ChartReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders every chart in [`ChartId::ALL`] as `<chart_dir>/<file_stem>.svg`.
pub fn render_charts(orders: &DataFrame, kpis: &YearlyKpis, chart_dir: &Path) -> ChartReport {
    let mut report = ChartReport::default();

    if let Err(source) = fs::create_dir_all(chart_dir) {
        warn!(path = %chart_dir.display(), error = %source, "chart directory unavailable");
        report.failures.push(PresentationError::OutputDir {
            path: chart_dir.to_path_buf(),
            source,
        });
        return report;
    }

    for chart in ChartId::ALL {
        let path = chart_dir.join(chart.file_name());
        match render_chart(chart, orders, kpis, &path) {
            Ok(()) => {
                info!(chart = chart.file_stem(), path = %path.display(), "rendered chart");
                report.rendered.push(path);
            }
            Err(err) => {
                warn!(chart = chart.file_stem(), error = %err, "chart rendering failed");
                report.failures.push(err);
            }
        }
    }

    report
}

pub fn render_chart(
    chart: ChartId,
    orders: &DataFrame,
    kpis: &YearlyKpis,
    path: &Path,
) -> Result<(), PresentationError> {
    let plot = build_plot(chart, orders, kpis).map_err(|source| {
        PresentationError::Aggregation {
            chart: chart.file_stem(),
            source,
        }
    })?;

    draw_plot(chart, &plot, path).map_err(|err| PresentationError::Render {
        chart: chart.file_stem(),
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
enum PlotKind {
    Bars,
    Lines,
}

#[derive(Debug, Clone, Copy)]
enum Marker {
    Circle,
    Square,
}

#[derive(Debug, Clone)]
struct PlotSeries {
    /// Legend entry; single-series charts have none.
    name: Option<String>,
    values: Vec<Option<f64>>,
    color: RGBColor,
    marker: Marker,
}

#[derive(Debug, Clone)]
struct Plot {
    kind: PlotKind,
    labels: Vec<String>,
    series: Vec<PlotSeries>,
    x_desc: &'static str,
    y_desc: &'static str,
}

impl Plot {
    fn has_data(&self) -> bool {
        self.series
            .iter()
            .any(|series| series.values.iter().any(Option::is_some))
    }

    fn single(
        kind: PlotKind,
        totals: CategoryTotals,
        color: RGBColor,
        marker: Marker,
        x_desc: &'static str,
        y_desc: &'static str,
    ) -> Self {
        Plot {
            kind,
            labels: totals.labels,
            series: vec![PlotSeries {
                name: None,
                values: totals.values.into_iter().map(Some).collect(),
                color,
                marker,
            }],
            x_desc,
            y_desc,
        }
    }

    fn grouped(
        kind: PlotKind,
        totals: GroupedTotals,
        style: &ChartStyle,
        x_desc: &'static str,
        y_desc: &'static str,
    ) -> Self {
        let series = totals
            .groups
            .iter()
            .enumerate()
            .map(|(idx, year)| PlotSeries {
                name: Some(year.to_string()),
                values: totals.group_values(idx),
                color: style.series_color(idx),
                marker: Marker::Circle,
            })
            .collect();
        Plot {
            kind,
            labels: totals.categories,
            series,
            x_desc,
            y_desc,
        }
    }
}

fn build_plot(chart: ChartId, orders: &DataFrame, kpis: &YearlyKpis) -> Result<Plot, PolarsError> {
    let style = &*CHART_STYLE;

    let plot = match chart {
        ChartId::SalesPerYear => Plot::single(
            PlotKind::Bars,
            yearly(kpis, |record| Some(record.sales)),
            style.series_color(0),
            Marker::Circle,
            "Year",
            "Sales",
        ),
        ChartId::ProfitPerYear => Plot::single(
            PlotKind::Lines,
            yearly(kpis, |record| Some(record.profit)),
            style.profit,
            Marker::Circle,
            "Year",
            "Profit",
        ),
        ChartId::ProfitMarginPerYear => Plot::single(
            PlotKind::Lines,
            yearly(kpis, |record| record.profit_margin_pct),
            style.margin,
            Marker::Square,
            "Year",
            "Profit margin (%)",
        ),
        ChartId::SalesByProductYear => Plot::grouped(
            PlotKind::Bars,
            aggregates::sales_by_product_year(orders)?,
            style,
            "Product",
            "Sales",
        ),
        ChartId::MonthlySalesPerYear => Plot::grouped(
            PlotKind::Lines,
            aggregates::monthly_sales_by_year(orders)?,
            style,
            "Month",
            "Sales",
        ),
        ChartId::TopCitiesBySales => Plot::single(
            PlotKind::Bars,
            aggregates::top_cities(orders, RANKED_LIMIT)?,
            style.series_color(0),
            Marker::Circle,
            "City",
            "Sales",
        ),
        ChartId::ProfitByChannelYear => Plot::grouped(
            PlotKind::Bars,
            aggregates::profit_by_channel_year(orders)?,
            style,
            "Channel",
            "Profit",
        ),
        ChartId::TopCustomersBySales => Plot::grouped(
            PlotKind::Bars,
            aggregates::top_customers(orders, RANKED_LIMIT)?,
            style,
            "Customer",
            "Sales",
        ),
        ChartId::BottomCustomersBySales => Plot::grouped(
            PlotKind::Bars,
            aggregates::bottom_customers(orders, RANKED_LIMIT)?,
            style,
            "Customer",
            "Sales",
        ),
    };

    Ok(plot)
}

/// Years with a defined value, in KPI order.
fn yearly(
    kpis: &YearlyKpis,
    value: impl Fn(&KpiRecord) -> Option<f64>,
) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for record in kpis.iter() {
        if let Some(v) = value(record) {
            totals.labels.push(record.year.to_string());
            totals.values.push(v);
        }
    }
    totals
}

fn draw_plot(chart: ChartId, plot: &Plot, path: &Path) -> DrawResult {
    let style = &*CHART_STYLE;
    let root = SVGBackend::new(path, chart.size()).into_drawing_area();
    root.fill(&style.background)?;

    if !plot.has_data() {
        root.titled(
            &format!("{} (no data)", chart.title()),
            (style.font_family, style.title_size),
        )?;
        return root.present();
    }

    let category_count = plot.labels.len();
    let key_points: Vec<f64> = (0..category_count).map(|idx| idx as f64).collect();
    let x_range = (-0.5..category_count as f64 - 0.5).with_key_points(key_points);
    let y_range = value_range(
        plot.series
            .iter()
            .flat_map(|series| series.values.iter().flatten().copied()),
    );

    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title(), (style.font_family, style.title_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    let labels = &plot.labels;
    ctx.configure_mesh()
        .disable_x_mesh()
        .light_line_style(style.background)
        .bold_line_style(style.grid)
        .axis_style(style.axis)
        .x_labels(category_count)
        .x_label_formatter(&|x: &f64| category_label(labels, *x))
        .x_desc(plot.x_desc)
        .y_desc(plot.y_desc)
        .label_style((style.font_family, style.label_size))
        .draw()?;

    let series_count = plot.series.len().max(1);
    let bar_width = 0.8 / series_count as f64;

    for (series_idx, series) in plot.series.iter().enumerate() {
        let color = series.color;
        let anno = match plot.kind {
            PlotKind::Bars => {
                let offset = -0.4 + series_idx as f64 * bar_width;
                ctx.draw_series(series.values.iter().enumerate().filter_map(|(idx, value)| {
                    value.map(|v| {
                        let x0 = idx as f64 + offset;
                        let mut bar =
                            Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled());
                        bar.set_margin(0, 0, 1, 1);
                        bar
                    })
                }))?
            }
            PlotKind::Lines => {
                let points: Vec<(f64, f64)> = series
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, value)| value.map(|v| (idx as f64, v)))
                    .collect();
                let size = style.marker_size;
                match series.marker {
                    Marker::Circle => {
                        ctx.draw_series(
                            points
                                .iter()
                                .map(|point| Circle::new(*point, size, color.filled())),
                        )?;
                    }
                    Marker::Square => {
                        ctx.draw_series(points.iter().map(|point| {
                            EmptyElement::at(*point)
                                + Rectangle::new([(-size, -size), (size, size)], color.filled())
                        }))?;
                    }
                }
                ctx.draw_series(LineSeries::new(
                    points,
                    color.stroke_width(style.line_width),
                ))?
            }
        };

        if let Some(name) = &series.name {
            anno.label(name.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
        }
    }

    if plot.series.iter().any(|series| series.name.is_some()) {
        ctx.configure_series_labels()
            .background_style(style.background.mix(0.8))
            .border_style(style.axis)
            .label_font((style.font_family, style.label_size))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()
}

/// Category name for an integer tick, blank elsewhere.
fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Y axis covering every value and zero, with headroom for labels.
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (low, high) = values.fold((0.0_f64, 0.0_f64), |(low, high), v| {
        (low.min(v), high.max(v))
    });
    let span = if high > low { high - low } else { 1.0 };
    let pad = span * 0.1;
    let low = if low < 0.0 { low - pad } else { low };
    low..high + pad
}
