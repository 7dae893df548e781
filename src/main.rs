//! Disaster Impact CLI
//!
//! Normalizes a disaster damage table, aggregates human and material
//! impact per event and ranks the most severe events.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use disaster_impact::commands::{
    display_schema, display_version, execute_analyze, execute_comment_add, execute_comment_list,
    validate_args, validate_report_file, AnalyzeArgs, CommentArgs,
};
use disaster_impact::parser::LoadOptions;
use disaster_impact::utils::config::{
    DEFAULT_COMMENTS_FILE, DEFAULT_INPUT_FILE, DEFAULT_REPORT_FILE, DEFAULT_TOP_N, METADATA_ROWS,
};

/// Disaster Impact - rank the most severe disaster events
#[derive(Parser, Debug)]
#[command(name = "disaster-impact")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a damage table and rank the most severe events
    Analyze {
        /// Source damage table (CSV export)
        #[arg(short, long, env = "DISASTER_INPUT", default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,

        /// Skip writing the JSON report
        #[arg(long)]
        no_report: bool,

        /// Number of most severe events to keep
        #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Field delimiter of the source table
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Leading metadata rows before the header row
        #[arg(long, default_value_t = METADATA_ROWS)]
        metadata_rows: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Bars drawn in the summary chart
        #[arg(long, default_value = "20")]
        chart_bars: usize,
    },

    /// Add to or list the comment log
    Comment {
        #[command(subcommand)]
        action: CommentAction,

        /// Comment log location
        #[arg(long, global = true, env = "DISASTER_COMMENTS", default_value = DEFAULT_COMMENTS_FILE)]
        comments: PathBuf,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

/// Comment log actions
#[derive(Subcommand, Debug)]
enum CommentAction {
    /// Append a comment
    Add {
        /// Event date the comment refers to
        #[arg(long)]
        date: String,

        /// Cause of the event
        #[arg(long)]
        cause: String,

        /// Comment text
        #[arg(long)]
        comment: String,
    },

    /// List all comments in insertion order
    List,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            no_report,
            top,
            delimiter,
            metadata_rows,
            summary,
            chart_bars,
        } => {
            let delimiter = u8::try_from(delimiter)
                .map_err(|_| anyhow::anyhow!("Delimiter must be a single-byte character"))?;

            let args = AnalyzeArgs {
                input,
                output_json: if no_report { None } else { Some(output) },
                top,
                load_options: LoadOptions {
                    metadata_rows,
                    delimiter,
                },
                print_summary: summary,
                chart_bars,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Comment { action, comments } => match action {
            CommentAction::Add {
                date,
                cause,
                comment,
            } => {
                execute_comment_add(CommentArgs {
                    store: comments,
                    date,
                    cause,
                    comment,
                })?;
            }
            CommentAction::List => {
                execute_comment_list(&comments)?;
            }
        },

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
