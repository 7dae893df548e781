//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Runs the pipeline (read, normalize, complete, aggregate, rank)
//! 2. Logs the ranked events
//! 3. Writes the report and, on request, a text summary

use crate::commands::models::AnalyzeArgs;
use crate::output::{generate_text_summary, write_report};
use crate::pipeline::{analyze_file, to_report, Analysis};
use crate::utils::config::{MAX_TOP_N, RANKING_KEYS};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// The full analysis, or Err with context if the source cannot be read
/// or the report cannot be written
///
/// # Example
/// ```ignore
/// let args = AnalyzeArgs {
///     input: PathBuf::from("Dano.csv"),
///     print_summary: true,
///     ..Default::default()
/// };
///
/// execute_analyze(args)?;
/// ```
pub fn execute_analyze(args: AnalyzeArgs) -> Result<Analysis> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1: Run the pipeline
    info!("Step 1/3: Normalizing, completing and aggregating the source table...");
    let analysis = analyze_file(&args.input, &args.load_options, args.top)
        .with_context(|| format!("Failed to read source table {}", args.input.display()))?;

    if !analysis.has_date_column {
        warn!("Source has no date column; ranked events will carry no date");
    }
    if !analysis.inserted_columns.is_empty() {
        debug!(
            "Inserted missing columns as zero: {}",
            analysis.inserted_columns.join(", ")
        );
    }

    let report = to_report(&analysis, &args.input);
    info!("Impact: {}", report.summary.summary());

    // Step 2: Ranking
    info!(
        "Step 2/3: Ranked top {} events by {}",
        analysis.top_events.len(),
        RANKING_KEYS.join(", ")
    );
    for entry in &analysis.top_events {
        let people = entry.event.people();
        debug!(
            "  {}. {} deaths={} injured={} displaced={} destruction={:.2}",
            entry.rank,
            entry
                .date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            people.deaths,
            people.injured,
            people.displaced,
            entry.event.total_destruction_value
        );
    }

    // Step 3: Write outputs
    if let Some(output) = &args.output_json {
        info!("Step 3/3: Writing report...");
        write_report(&report, output).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", output.display());
    } else {
        info!("Step 3/3: Skipping report (not requested)");
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("DISASTER IMPACT SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Source:            {}", report.source);
        println!("Records:           {}", report.summary.record_count);
        println!("Deaths:            {}", report.summary.total_deaths);
        println!("People affected:   {}", report.summary.total_people_affected);
        println!("Destruction:       {:.2}", report.summary.total_destruction_value);
        println!("Monetary columns:  {}", report.destruction_columns.join(", "));
        println!(
            "\n{}",
            generate_text_summary(&report.top_events, &report.destruction_by_date, args.chart_bars)
        );
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(analysis)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top > MAX_TOP_N {
        anyhow::bail!("top is too large (max {})", MAX_TOP_N);
    }

    if args.chart_bars == 0 {
        anyhow::bail!("chart_bars must be greater than 0");
    }

    Ok(())
}
