use std::fmt;

#[derive(Debug)]
pub enum IngestError {
    /// File read error.
    Io(String),
    /// Workbook open/decode error (calamine).
    Workbook(String),
    /// The file contains no sheets or no data rows.
    Empty,
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Workbook(msg) => write!(f, "workbook error: {msg}"),
            Self::Empty => write!(f, "no data to import"),
        }
    }
}

impl std::error::Error for IngestError {}
