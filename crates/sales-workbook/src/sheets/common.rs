use std::collections::HashMap;

use calamine::{Data, DataType, Range};
use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::WorkbookError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

static EMPTY: Data = Data::Empty;

/// A worksheet with its header row resolved to column positions.
pub(crate) struct SheetTable<'a> {
    sheet: &'static str,
    range: &'a Range<Data>,
    headers: HashMap<String, usize>,
}

impl<'a> SheetTable<'a> {
    pub(crate) fn new(sheet: &'static str, range: &'a Range<Data>) -> Result<Self, WorkbookError> {
        let header_row = range
            .rows()
            .next()
            .ok_or(WorkbookError::EmptySheet { sheet })?;

        let mut headers = HashMap::with_capacity(header_row.len());
        for (position, cell) in header_row.iter().enumerate() {
            if let Some(name) = cell_text(cell) {
                // first occurrence wins, matching left-to-right header lookup
                headers.entry(name).or_insert(position);
            }
        }

        Ok(Self {
            sheet,
            range,
            headers,
        })
    }

    pub(crate) fn sheet(&self) -> &'static str {
        self.sheet
    }

    pub(crate) fn require(&self, column: &'static str) -> Result<usize, WorkbookError> {
        self.headers
            .get(column)
            .copied()
            .ok_or(WorkbookError::MissingColumn {
                sheet: self.sheet,
                column,
            })
    }

    pub(crate) fn optional(&self, column: &str) -> Option<usize> {
        self.headers.get(column).copied()
    }

    /// Data rows with their 1-based spreadsheet row number. Blank rows are skipped.
    pub(crate) fn data_rows(&self) -> impl Iterator<Item = DataRow<'a>> + 'a {
        let sheet = self.sheet;
        let range = self.range;
        // the used range may begin below row 1
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        range
            .rows()
            .enumerate()
            .skip(1)
            .filter(|(_, cells)| cells.iter().any(|cell| !cell.is_empty()))
            .map(move |(offset, cells)| DataRow {
                sheet,
                row_number: first_row + offset + 1,
                cells,
            })
    }

    pub(crate) fn data_row_count(&self) -> usize {
        self.range.height().saturating_sub(1)
    }
}

pub(crate) struct DataRow<'a> {
    sheet: &'static str,
    row_number: usize,
    cells: &'a [Data],
}

impl DataRow<'_> {
    pub(crate) fn row_number(&self) -> usize {
        self.row_number
    }

    fn cell(&self, position: usize) -> &Data {
        self.cells.get(position).unwrap_or(&EMPTY)
    }

    fn invalid(&self, column: &'static str, message: String) -> WorkbookError {
        WorkbookError::InvalidCell {
            sheet: self.sheet,
            column,
            row: self.row_number,
            message,
        }
    }

    pub(crate) fn date(
        &self,
        column: &'static str,
        position: usize,
    ) -> Result<NaiveDate, WorkbookError> {
        parse_date(self.cell(position)).map_err(|message| self.invalid(column, message))
    }

    pub(crate) fn float(
        &self,
        column: &'static str,
        position: usize,
    ) -> Result<Option<f64>, WorkbookError> {
        parse_f64(self.cell(position)).map_err(|message| self.invalid(column, message))
    }

    pub(crate) fn integer(
        &self,
        column: &'static str,
        position: usize,
    ) -> Result<Option<i64>, WorkbookError> {
        parse_i64(self.cell(position)).map_err(|message| self.invalid(column, message))
    }

    /// Like [`DataRow::integer`] but a blank cell is an error.
    pub(crate) fn key(&self, column: &'static str, position: usize) -> Result<i64, WorkbookError> {
        self.integer(column, position)?
            .ok_or_else(|| self.invalid(column, "missing key".to_string()))
    }

    pub(crate) fn text(&self, position: Option<usize>) -> Option<String> {
        position.and_then(|position| cell_text(self.cell(position)))
    }
}

pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            Some(format!("{}", *value as i64))
        }
        Data::Float(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(value) => Some(value.as_f64().to_string()),
        Data::Error(_) | Data::Empty => None,
    }
}

pub(crate) fn parse_date(cell: &Data) -> Result<NaiveDate, String> {
    match cell {
        Data::Empty => Err("missing date".to_string()),
        Data::String(text) => parse_date_text(text),
        Data::Error(err) => Err(format!("cell error {err:?}")),
        Data::Bool(_) | Data::DurationIso(_) => Err(format!("cannot interpret {cell:?} as a date")),
        other => other
            .as_date()
            .ok_or_else(|| format!("cannot interpret {other:?} as a date")),
    }
}

pub(crate) fn parse_date_text(text: &str) -> Result<NaiveDate, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("missing date".to_string());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    Err(format!("unrecognised date '{trimmed}'"))
}

pub(crate) fn parse_f64(cell: &Data) -> Result<Option<f64>, String> {
    match cell {
        Data::Empty => Ok(None),
        Data::Float(value) => Ok(Some(*value)),
        Data::Int(value) => Ok(Some(*value as f64)),
        Data::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .replace(',', "")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("'{trimmed}' is not a number"))
        }
        other => Err(format!("expected a number, found {other:?}")),
    }
}

pub(crate) fn parse_i64(cell: &Data) -> Result<Option<i64>, String> {
    match cell {
        Data::Int(value) => Ok(Some(*value)),
        Data::Float(value) if value.fract() == 0.0 => Ok(Some(*value as i64)),
        Data::Float(value) => Err(format!("expected an integer, found {value}")),
        _ => match parse_f64(cell)? {
            None => Ok(None),
            Some(value) if value.fract() == 0.0 => Ok(Some(value as i64)),
            Some(value) => Err(format!("expected an integer, found {value}")),
        },
    }
}
