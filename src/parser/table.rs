//! Raw source table reader.
//!
//! The damage export carries a title block before the real header row.
//! We skip a fixed number of leading records, take the next one as the
//! header and keep every remaining record as a raw row of optional cells.

use crate::utils::config::METADATA_ROWS;
use crate::utils::error::LoadError;
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Options controlling how the source table is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Leading records to discard before the header row
    pub metadata_rows: usize,

    /// Field delimiter (exports are often `;` separated)
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            metadata_rows: METADATA_ROWS,
            delimiter: b',',
        }
    }
}

/// Source table as read from disk, before any normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Header cells exactly as written in the source
    pub headers: Vec<String>,

    /// Data rows. `parse_raw_table` pads or truncates each one to the
    /// header width; hand-built rows may be shorter. Blank cells are `None`.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Read the source table from a file
///
/// **Public** - main entry point for loading
///
/// The file handle lives only for the duration of this call and is
/// released on every exit path, including parse failures.
///
/// # Errors
/// * `LoadError::SourceUnavailable` - file missing or unreadable
/// * `LoadError::ParseFailure` - corrupt CSV structure
/// * `LoadError::MissingHeader` - file ends before the header row
pub fn read_raw_table(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<RawTable, LoadError> {
    let path = path.as_ref();
    debug!("Reading source table: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    parse_raw_table(file, options)
}

/// Parse the source table from any reader
///
/// **Public** - used by `read_raw_table` and by tests with in-memory input
pub fn parse_raw_table<R: Read>(reader: R, options: &LoadOptions) -> Result<RawTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut records = rdr.byte_records();

    for _ in 0..options.metadata_rows {
        match records.next() {
            Some(record) => {
                record?;
            }
            None => return Err(LoadError::MissingHeader(options.metadata_rows)),
        }
    }

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(decode_cell).collect(),
        None => return Err(LoadError::MissingHeader(options.metadata_rows)),
    };

    let width = headers.len();
    let mut rows = Vec::new();
    let mut truncated = 0usize;

    for record in records {
        let record = record?;
        if record.len() > width {
            truncated += 1;
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .take(width)
            .map(|cell| Some(decode_cell(cell)).filter(|text| !text.is_empty()))
            .collect();
        row.resize(width, None);
        rows.push(row);
    }

    if truncated > 0 {
        warn!("{} rows had more cells than the header; extra cells ignored", truncated);
    }

    debug!("Read {} columns and {} data rows", width, rows.len());

    Ok(RawTable { headers, rows })
}

/// Decode a cell, replacing invalid UTF-8 (legacy exports are often Latin-1)
///
/// **Private** - internal utility
fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Relatorio de Danos\n\
Gerado em,01/02/2024\n\
Municipio,Recife\n\
Fonte,S2iD\n\
Registro(Data), DH_Mortos ,Valor Total\n\
05/01/2024,3,1000\n\
,,\n";

    #[test]
    fn test_skips_metadata_rows() {
        let table = parse_raw_table(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(table.headers, vec!["Registro(Data)", "DH_Mortos", "Valor Total"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1].as_deref(), Some("3"));
        assert!(table.rows[1].iter().all(Option::is_none));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let input = "a\nb\nc\nd\nx,y,z\n1\n";
        let table = parse_raw_table(input.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
    }

    #[test]
    fn test_long_rows_are_truncated() {
        let input = "a\nb\nc\nd\nx,y\n1,2,3\n";
        let table = parse_raw_table(input.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_missing_header() {
        let input = "only\nthree\nlines\n";
        let result = parse_raw_table(input.as_bytes(), &LoadOptions::default());
        assert!(matches!(result, Err(LoadError::MissingHeader(4))));
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoadOptions {
            metadata_rows: 0,
            delimiter: b';',
        };
        let table = parse_raw_table("x;y\n1,5;2\n".as_bytes(), &options).unwrap();
        assert_eq!(table.rows[0][0].as_deref(), Some("1,5"));
    }

    #[test]
    fn test_missing_file() {
        let result = read_raw_table("/definitely/not/here.csv", &LoadOptions::default());
        assert!(matches!(result, Err(LoadError::SourceUnavailable { .. })));
    }
}
