use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Records: {}", report.records.len());
    println!("  Total Deaths: {}", report.summary.total_deaths);
    println!("  Total Destruction: {:.2}", report.summary.total_destruction_value);
    println!("  Top Events: {}", report.top_events.len());

    if report.version != SCHEMA_VERSION {
        println!(
            "  Note: report schema v{} differs from current v{}",
            report.version, SCHEMA_VERSION
        );
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Disaster Impact Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string               - Schema version (e.g., '1.0.0')");
        println!("  source: string                - Analyzed source table");
        println!("  destruction_columns: array    - Monetary columns found in the source");
        println!("  summary: object               - Table-wide totals");
        println!("  records: array                - Every aggregated record");
        println!("    date: string?               - Event date (YYYY-MM-DD)");
        println!("    dh_mortos .. dh_outros_afetados: number - People-affected counts");
        println!("    destruction_values: object  - Value per monetary column");
        println!("    extra: object?              - Unrecognized columns, as text");
        println!("    total_people_affected: number");
        println!("    total_destruction_value: number");
        println!("  top_events: array             - Most severe records, with rank");
        println!("  destruction_by_date: array    - {{date, value}} chart series");
        println!("  generated_at: string          - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Disaster Impact v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Normalizes disaster damage tables and ranks the most severe events.");
}
