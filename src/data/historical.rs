use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::models::HistoricalSeries;

/// Date layouts seen in exported price tables. The time part, if any, is dropped.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| anyhow!("Unrecognised date '{}'", text))
}

/// Reads the historical price table at `path`.
/// Needs a `Date` and a `Close` column (matched by header name); other columns
/// are ignored.
pub fn load_historical_series(path: &Path) -> Result<HistoricalSeries> {
    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_serde.then(|| {
        log::info!("Reading historical prices from {:?}...", path);
        std::time::Instant::now()
    });

    let file = File::open(path).context(format!("Failed to open price table: {:?}", path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let series = parse_historical_csv(BufReader::new(file), name)
        .context(format!("Failed to parse price table: {:?}", path))?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "✅ Price table loaded: {} rows ({} to {}) in {:.3}s",
            series.len(),
            series.first_date(),
            series.last_date(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(series)
}

pub fn parse_historical_csv<R: Read>(reader: R, name: impl Into<String>) -> Result<HistoricalSeries> {
    let date_column = PERSISTENCE.historical.date_column;
    let close_column = PERSISTENCE.historical.close_column;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, date_column)?;
    let close_idx = column_index(&headers, close_column)?;

    let mut points = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

        let date_str = field(&record, date_idx, date_column, line)?;
        let close_str = field(&record, close_idx, close_column, line)?;

        let date = parse_date(date_str)
            .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", date_column, line, e))?;
        let close = close_str.parse::<f64>().map_err(|e| {
            anyhow!(
                "Error parsing '{}' at line {}: '{}' ({})",
                close_column,
                line,
                close_str,
                e
            )
        })?;

        points.push((date, close));
    }

    HistoricalSeries::from_points(name, points)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| anyhow!("Missing '{}' column (found: {:?})", name, headers))
}

fn field<'a>(record: &'a StringRecord, idx: usize, name: &str, line: usize) -> Result<&'a str> {
    record
        .get(idx)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_from_file_valid_data() {
        let csv_content = "\
Date,Open,High,Low,Close,Adj Close,Volume
2019-08-07,195.41,199.56,193.82,199.04,197.24,33364400
2019-08-08,200.20,203.53,199.39,203.43,201.59,27009500
2019-08-09,201.30,202.76,199.29,200.99,199.92,24619700";
        let tmp_file = create_test_csv(csv_content);
        let series = load_historical_series(tmp_file.path()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), ymd(2019, 8, 7));
        assert_eq!(series.last_date(), ymd(2019, 8, 9));
        assert_eq!(series.closes(), &[199.04, 203.43, 200.99]);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv_content = "Close,Volume,Date\n10.5,100,2019-01-02\n11.0,120,2019-01-03";
        let series = parse_historical_csv(csv_content.as_bytes(), "reordered").unwrap();
        assert_eq!(series.closes(), &[10.5, 11.0]);
        assert_eq!(series.last_date(), ymd(2019, 1, 3));
    }

    #[test]
    fn test_unsorted_rows_are_sorted() {
        let csv_content = "Date,Close\n2019-01-04,3.0\n2019-01-02,1.0\n2019-01-03,2.0";
        let series = parse_historical_csv(csv_content.as_bytes(), "unsorted").unwrap();
        assert_eq!(series.closes(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_alternate_date_layouts() {
        assert_eq!(parse_date("2019-08-13").unwrap(), ymd(2019, 8, 13));
        assert_eq!(parse_date("08/13/2019").unwrap(), ymd(2019, 8, 13));
        assert_eq!(parse_date("2019-08-13 00:00:00").unwrap(), ymd(2019, 8, 13));
        assert!(parse_date("13.08.2019").is_err());
    }

    #[test]
    fn test_missing_close_column() {
        let csv_content = "Date,Open\n2019-01-02,1.0";
        let result = parse_historical_csv(csv_content.as_bytes(), "no-close");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Missing 'Close' column"), "{}", err);
    }

    #[test]
    fn test_invalid_price_names_line() {
        let csv_content = "Date,Close\n2019-01-02,1.0\n2019-01-03,abc";
        let result = parse_historical_csv(csv_content.as_bytes(), "bad-price");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Error parsing 'Close' at line 3"), "{}", err);
    }

    #[test]
    fn test_invalid_date_names_line() {
        let csv_content = "Date,Close\nnot-a-date,1.0";
        let result = parse_historical_csv(csv_content.as_bytes(), "bad-date");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Error parsing 'Date' at line 2"), "{}", err);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = parse_historical_csv("Date,Close".as_bytes(), "empty");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = load_historical_series(Path::new("definitely/not/here.csv"));
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Failed to open price table"), "{}", err);
    }
}
