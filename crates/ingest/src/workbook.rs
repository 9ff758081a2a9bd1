//! Workbook and CSV loading into [`RawTable`]s.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};

use crate::columns::detect_header;
use crate::error::IngestError;
use crate::table::RawTable;

/// Load every sheet of a workbook (xlsx, xls, xlsb, ods) as raw string
/// grids. Date cells are rendered as `YYYY-MM-DD` so downstream parsing
/// is uniform.
pub fn load_workbook(path: &Path) -> Result<Vec<(String, RawTable)>, IngestError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| IngestError::Workbook(e.to_string()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(IngestError::Empty);
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| IngestError::Workbook(format!("sheet '{name}': {e}")))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for row in range.rows() {
            rows.push(row.iter().map(cell_to_string).collect());
        }
        sheets.push((name.clone(), RawTable::new(rows)));
    }

    Ok(sheets)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integers without decimals, matching what the sheet displays
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => serial_to_date_string(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Excel serial day → ISO date string. The 1900 date system's epoch is
/// 1899-12-30 once the phantom leap day is accounted for.
fn serial_to_date_string(serial: f64) -> String {
    let days = serial.floor() as i64;
    match NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(days)))
    {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format!("{serial}"),
    }
}

/// With several sheets, prefer the first whose scan finds a header row;
/// otherwise the first sheet.
pub fn select_sheet(sheets: &[(String, RawTable)]) -> usize {
    sheets
        .iter()
        .position(|(_, table)| detect_header(table).is_some())
        .unwrap_or(0)
}

/// Load a CSV file as a raw string grid. Delimiter is sniffed from the
/// first few lines; non-UTF-8 content falls back to GBK then
/// Windows-1252 (common for bank exports).
pub fn load_csv(path: &Path) -> Result<RawTable, IngestError> {
    let content = read_file_as_utf8(path)?;
    Ok(table_from_csv_str(&content))
}

/// Parse CSV text into a raw grid.
pub fn table_from_csv_str(content: &str) -> RawTable {
    let delimiter = sniff_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records().flatten() {
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }
    RawTable::new(rows)
}

fn read_file_as_utf8(path: &Path) -> Result<String, IngestError> {
    let mut file = std::fs::File::open(path).map_err(|e| IngestError::Io(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| IngestError::Io(e.to_string()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::GBK.decode(&bytes);
            if !had_errors {
                return Ok(decoded.into_owned());
            }
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across
/// the first few lines.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_dates_convert() {
        // 2024-01-10 is serial 45301 in the 1900 system
        assert_eq!(serial_to_date_string(45301.0), "2024-01-10");
        assert_eq!(serial_to_date_string(45301.75), "2024-01-10");
    }

    #[test]
    fn sniff_common_delimiters() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc\n1\t2\t3\n"), b'\t');
    }

    #[test]
    fn csv_grid_shape() {
        let t = table_from_csv_str("日期,金额\n2024-01-10,500.00\n");
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.cell(1, 1), "500.00");
    }

    #[test]
    fn select_prefers_sheet_with_header() {
        let cover = RawTable::new(vec![vec!["统计报表".into()]]);
        let data = table_from_csv_str("交易日期,交易金额\n2024-01-10,500.00\n");
        let sheets = vec![("封面".to_string(), cover), ("流水".to_string(), data)];
        assert_eq!(select_sheet(&sheets), 1);
    }

    #[test]
    fn select_falls_back_to_first() {
        let a = RawTable::new(vec![vec!["x".into()]]);
        let b = RawTable::new(vec![vec!["y".into()]]);
        assert_eq!(select_sheet(&[("a".into(), a), ("b".into(), b)]), 0);
    }
}
