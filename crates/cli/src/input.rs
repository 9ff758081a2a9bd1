//! Statement file loading for commands: pick the reader by extension,
//! pick the sheet, and normalize rows.

use std::path::Path;

use tallybook_ingest::{ingest_table, load_csv, load_workbook, select_sheet, IngestResult};

/// Ingest a statement file. Workbook formats go through sheet selection
/// (`--sheet` overrides the heuristic); everything else is read as
/// delimiter-sniffed CSV.
pub fn ingest_file(path: &Path, sheet: Option<usize>) -> Result<IngestResult, String> {
    let is_workbook = matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
        Some("xlsx" | "xls" | "xlsm" | "xlsb" | "ods")
    );

    let table = if is_workbook {
        let sheets = load_workbook(path).map_err(|e| e.to_string())?;
        let index = match sheet {
            Some(index) if index < sheets.len() => index,
            Some(index) => {
                return Err(format!(
                    "sheet {index} out of range; {} has {} sheets",
                    path.display(),
                    sheets.len()
                ));
            }
            None => select_sheet(&sheets),
        };
        sheets.into_iter().nth(index).map(|(_, t)| t).ok_or_else(|| {
            format!("{} contains no sheets", path.display())
        })?
    } else {
        load_csv(path).map_err(|e| e.to_string())?
    };

    ingest_table(&table).map_err(|e| e.to_string())
}

/// Source hint for account heuristics: file stem, lowercased elsewhere.
pub fn source_hint(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
