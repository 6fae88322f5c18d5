use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "sales.xlsx";
pub const DEFAULT_CHART_DIR: &str = "charts";

/// Where the report reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub chart_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
        }
    }
}

impl ReportConfig {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    pub fn with_chart_dir(mut self, chart_dir: impl Into<PathBuf>) -> Self {
        self.chart_dir = chart_dir.into();
        self
    }
}
