use once_cell::sync::Lazy;
use plotters::style::RGBColor;

/// Process-wide chart look: white background, light grid, muted categorical palette.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub font_family: &'static str,
    pub title_size: f64,
    pub label_size: f64,
    pub background: RGBColor,
    pub grid: RGBColor,
    pub axis: RGBColor,
    pub palette: [RGBColor; 10],
    pub profit: RGBColor,
    pub margin: RGBColor,
    pub marker_size: i32,
    pub line_width: u32,
}

impl ChartStyle {
    /// Colour for the `idx`-th series, cycling through the palette.
    pub fn series_color(&self, idx: usize) -> RGBColor {
        self.palette[idx % self.palette.len()]
    }
}

pub static CHART_STYLE: Lazy<ChartStyle> = Lazy::new(|| ChartStyle {
    font_family: "sans-serif",
    title_size: 22.0,
    label_size: 14.0,
    background: RGBColor(255, 255, 255),
    grid: RGBColor(221, 221, 221),
    axis: RGBColor(68, 68, 68),
    palette: [
        RGBColor(0x4C, 0x72, 0xB0),
        RGBColor(0xDD, 0x84, 0x52),
        RGBColor(0x55, 0xA8, 0x68),
        RGBColor(0xC4, 0x4E, 0x52),
        RGBColor(0x81, 0x72, 0xB3),
        RGBColor(0x93, 0x78, 0x60),
        RGBColor(0xDA, 0x8B, 0xC3),
        RGBColor(0x8C, 0x8C, 0x8C),
        RGBColor(0xCC, 0xB9, 0x74),
        RGBColor(0x64, 0xB5, 0xCD),
    ],
    profit: RGBColor(0, 128, 0),
    margin: RGBColor(255, 165, 0),
    marker_size: 4,
    line_width: 2,
});
