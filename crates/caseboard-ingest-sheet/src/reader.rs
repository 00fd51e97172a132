//! Tabular source readers (CSV, TSV, JSON array-of-arrays, XLSX/XLS).
//!
//! Readers only produce positional rows; they never interpret columns.

use calamine::{Data, Reader};
use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

use crate::raw::{RawCell, RawRow};
use crate::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Json,
    /// First worksheet of an Excel workbook.
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "xlsx" | "xls" => Ok(Self::Workbook),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            }),
        }
    }
}

/// Rows of one source plus the SHA-256 of its bytes.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<RawRow>,
    pub digest: String,
}

/// Read a whole source. A missing file is `Ok(None)`; other I/O failures and
/// malformed content are errors.
pub fn read_table(path: &Path) -> Result<Option<Table>, IngestError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(IngestError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    let format = SourceFormat::from_path(path)?;

    let digest = hex_digest(&bytes);
    let rows = parse_bytes(&bytes, format).map_err(|e| e.at(path))?;
    Ok(Some(Table { rows, digest }))
}

/// Parse already-loaded bytes.
pub(crate) fn parse_bytes(bytes: &[u8], format: SourceFormat) -> Result<Vec<RawRow>, ParseError> {
    let text = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match format {
        SourceFormat::Csv => parse_delimited(text, sniff_delimiter(text)),
        SourceFormat::Tsv => parse_delimited(text, b'\t'),
        SourceFormat::Json => parse_json(text),
        SourceFormat::Workbook => parse_workbook(bytes),
    }
}

/// Content error not yet tied to a path.
#[derive(Debug)]
pub(crate) enum ParseError {
    Csv(csv::Error),
    Json(serde_json::Error),
    Workbook(calamine::Error),
}

impl ParseError {
    fn at(self, path: &Path) -> IngestError {
        let path = path.to_path_buf();
        match self {
            ParseError::Csv(source) => IngestError::Csv { path, source },
            ParseError::Json(source) => IngestError::Json { path, source },
            ParseError::Workbook(source) => IngestError::Workbook { path, source },
        }
    }
}

/// `;` when the first line has more semicolons than commas (spreadsheet
/// exports in comma-decimal locales), else `,`.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn parse_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<RawRow>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(ParseError::Csv)?;
        rows.push(record.iter().map(|f| RawCell::text(decode_field(f))).collect());
    }
    Ok(rows)
}

/// UTF-8 when valid, else Latin-1 (legacy spreadsheet exports).
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn parse_json(bytes: &[u8]) -> Result<Vec<RawRow>, ParseError> {
    use serde_json::Value;

    let rows: Vec<Vec<Value>> = serde_json::from_slice(bytes).map_err(ParseError::Json)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| match v {
                    Value::Null => RawCell::Empty,
                    Value::String(s) => RawCell::text(s),
                    Value::Number(n) => n.as_f64().map(RawCell::Number).unwrap_or(RawCell::Empty),
                    Value::Bool(b) => RawCell::Text(b.to_string()),
                    other => RawCell::Text(other.to_string()),
                })
                .collect()
        })
        .collect())
}

/// Rows of the first worksheet. The used range starts at the first non-empty
/// cell, so leading blank columns are padded back to keep positions stable.
fn parse_workbook(bytes: &[u8]) -> Result<Vec<RawRow>, ParseError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(io::Cursor::new(bytes.to_vec()))
        .map_err(ParseError::Workbook)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(ParseError::Workbook)?,
        None => return Ok(Vec::new()),
    };
    let lead = range.start().map_or(0, |(_, col)| col as usize);

    Ok(range
        .rows()
        .map(|row| {
            std::iter::repeat(RawCell::Empty)
                .take(lead)
                .chain(row.iter().map(workbook_cell))
                .collect()
        })
        .collect())
}

fn workbook_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::String(s) => RawCell::text(s.as_str()),
        other => RawCell::Text(other.to_string()),
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
