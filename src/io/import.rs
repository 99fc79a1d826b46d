//! Loading of the hourly input table from CSV or spreadsheet files.
//!
//! The header row must name a `date` (or `timestamp`/`datetime`), `hour`,
//! `solar` and `electricity` column, in any order and case. Other columns are
//! ignored. When the date cell carries no time of day, the `hour` column is
//! added to it; otherwise the two must agree.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::info;

use crate::error::InputError;
use crate::sim::types::HourlyRecord;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"];

/// One input cell, independent of the file format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    /// Text as written in the file.
    Text(&'a str),
    /// A numeric spreadsheet cell.
    Number(f64),
    /// A date-formatted spreadsheet cell.
    DateTime(NaiveDateTime),
    /// No value.
    Empty,
}

impl Cell<'_> {
    fn describe(&self) -> String {
        match self {
            Cell::Text(s) => (*s).to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::DateTime(dt) => dt.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub hour: usize,
    pub solar: usize,
    pub electricity: usize,
}

impl ColumnMap {
    /// Locates the required columns in a header row.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingColumn`] for the first column not found.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, InputError> {
        let (mut date, mut hour, mut solar, mut electricity) = (None, None, None, None);
        for (idx, name) in headers.into_iter().enumerate() {
            match name.trim().to_ascii_lowercase().as_str() {
                "date" | "timestamp" | "datetime" => date = date.or(Some(idx)),
                "hour" => hour = hour.or(Some(idx)),
                "solar" => solar = solar.or(Some(idx)),
                "electricity" => electricity = electricity.or(Some(idx)),
                _ => {}
            }
        }
        Ok(Self {
            date: date.ok_or(InputError::MissingColumn("date"))?,
            hour: hour.ok_or(InputError::MissingColumn("hour"))?,
            solar: solar.ok_or(InputError::MissingColumn("solar"))?,
            electricity: electricity.ok_or(InputError::MissingColumn("electricity"))?,
        })
    }
}

/// Loads hourly records from a file, choosing the reader by extension.
///
/// # Errors
///
/// Returns an [`InputError`] if the file cannot be read, the format is
/// unsupported, a required column is missing, or any cell is malformed.
pub fn load_records(path: &Path) -> Result<Vec<HourlyRecord>, InputError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = match ext.as_str() {
        "csv" | "txt" => {
            let file = File::open(path).map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv(BufReader::new(file))?
        }
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path)?,
        other => return Err(InputError::UnsupportedFormat(other.to_string())),
    };

    info!(rows = records.len(), path = %path.display(), "loaded hourly records");
    Ok(records)
}

/// Reads hourly records from CSV text with a header row.
///
/// # Errors
///
/// Returns an [`InputError`] on CSV syntax errors, missing columns, or
/// malformed cells.
pub fn read_csv(reader: impl Read) -> Result<Vec<HourlyRecord>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = ColumnMap::from_headers(rdr.headers()?.iter())?;

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        let cell = |i: usize| row.get(i).map_or(Cell::Empty, text_cell);
        records.push(parse_row(
            idx + 2,
            &cell(columns.date),
            &cell(columns.hour),
            &cell(columns.solar),
            &cell(columns.electricity),
        )?);
    }
    Ok(records)
}

fn text_cell(s: &str) -> Cell<'_> {
    if s.is_empty() { Cell::Empty } else { Cell::Text(s) }
}

/// Reads hourly records from the first sheet of a spreadsheet.
///
/// Leading empty rows are skipped; the first non-empty row is the header.
///
/// # Errors
///
/// Returns an [`InputError`] if the workbook cannot be opened, has no
/// sheets, or contains malformed cells.
pub fn read_workbook(path: &Path) -> Result<Vec<HourlyRecord>, InputError> {
    let workbook_error = |message: String| InputError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_error("no sheets found".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| workbook_error(e.to_string()))?;

    let mut rows = range
        .rows()
        .enumerate()
        .skip_while(|(_, row)| row.iter().all(|c| matches!(c, Data::Empty)));

    let Some((_, header)) = rows.next() else {
        return Err(InputError::MissingColumn("date"));
    };
    let header: Vec<String> = header.iter().map(|c| c.to_string()).collect();
    let columns = ColumnMap::from_headers(header.iter().map(String::as_str))?;

    let mut records = Vec::new();
    for (idx, row) in rows {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let cell = |i: usize| row.get(i).map_or(Cell::Empty, data_cell);
        records.push(parse_row(
            idx + 1,
            &cell(columns.date),
            &cell(columns.hour),
            &cell(columns.solar),
            &cell(columns.electricity),
        )?);
    }
    Ok(records)
}

fn data_cell(data: &Data) -> Cell<'_> {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::DateTime(dt) => dt.as_datetime().map_or(Cell::Empty, Cell::DateTime),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => text_cell(s.trim()),
        _ => Cell::Empty,
    }
}

/// Builds one record from its four cells. `row` is the 1-based line or
/// sheet row used in error messages.
///
/// # Errors
///
/// Returns [`InputError::InvalidValue`] for any unparsable cell or an hour
/// outside 0-23.
pub fn parse_row(
    row: usize,
    date: &Cell<'_>,
    hour: &Cell<'_>,
    solar: &Cell<'_>,
    electricity: &Cell<'_>,
) -> Result<HourlyRecord, InputError> {
    let invalid = |column: &'static str, cell: &Cell<'_>, expected: &'static str| {
        InputError::InvalidValue {
            row,
            column,
            value: cell.describe(),
            expected,
        }
    };

    let hour_value = parse_hour(hour).ok_or_else(|| invalid("hour", hour, "an hour in 0-23"))?;
    let stamp = match date {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_timestamp(s),
        Cell::Number(_) | Cell::Empty => None,
    }
    .ok_or_else(|| invalid("date", date, "a date or timestamp"))?;

    let timestamp = if stamp.time().num_seconds_from_midnight() == 0 {
        stamp
            .date()
            .and_hms_opt(hour_value, 0, 0)
            .ok_or_else(|| invalid("hour", hour, "an hour in 0-23"))?
    } else if stamp.hour() == hour_value {
        stamp
    } else {
        return Err(invalid("hour", hour, "the hour of the timestamp"));
    };

    let solar_kwh = parse_energy(solar).ok_or_else(|| invalid("solar", solar, "a number"))?;
    let electricity_kwh =
        parse_energy(electricity).ok_or_else(|| invalid("electricity", electricity, "a number"))?;

    Ok(HourlyRecord {
        timestamp,
        hour: hour_value,
        solar_kwh,
        electricity_kwh,
    })
}

/// Parses a timestamp or a bare date (taken as midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_hour(cell: &Cell<'_>) -> Option<u32> {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        Cell::DateTime(_) | Cell::Empty => return None,
    };
    (value.fract() == 0.0 && (0.0..=23.0).contains(&value)).then_some(value as u32)
}

fn parse_energy(cell: &Cell<'_>) -> Option<f64> {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        Cell::DateTime(_) | Cell::Empty => return None,
    };
    value.is_finite().then_some(value)
}
