//! JSON report writer and reader.
//!
//! Reports are pretty-printed so they stay diffable between runs.

use super::validate_path;
use crate::parser::schema::ImpactReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Finished report for one analysis run
/// * `output_path` - Destination file; missing parent directories are created
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or an uncreatable parent
/// * `OutputError::SerializationFailed` - the report could not be encoded
/// * `OutputError::WriteFailed` - the file could not be created or flushed
///
/// # Example
/// ```ignore
/// let report = to_report(&analysis, Path::new("Dano.csv"));
/// write_report(&report, "artifacts/report.json")?;
/// ```
pub fn write_report(report: &ImpactReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "Report with {} records written to {}",
        report.records.len(),
        output_path.display()
    );

    Ok(())
}

/// Serialize a report to a pretty JSON string
///
/// **Public** - for printing to stdout
pub fn report_to_string(report: &ImpactReport) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Read a previously written report
///
/// **Public** - used by the `validate` command and tests
///
/// # Errors
/// * `OutputError::ReadFailed` - the file could not be opened
/// * `OutputError::DeserializationFailed` - the contents are not a report
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ImpactReport, OutputError> {
    let input_path = input_path.as_ref();

    let file = File::open(input_path).map_err(|source| OutputError::ReadFailed {
        path: input_path.to_path_buf(),
        source,
    })?;
    let report: ImpactReport = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::DeserializationFailed)?;

    debug!(
        "Loaded report v{} from {} ({} records, {} top events)",
        report.version,
        input_path.display(),
        report.records.len(),
        report.top_events.len()
    );

    Ok(report)
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() && !p.exists() => p,
        _ => return Ok(()),
    };

    debug!("Creating report directory {}", parent.display());
    fs::create_dir_all(parent)
        .map_err(|e| OutputError::InvalidPath(format!("{}: {}", parent.display(), e)))
}
