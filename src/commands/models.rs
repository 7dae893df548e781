use crate::parser::LoadOptions;
use crate::utils::config::{DEFAULT_INPUT_FILE, DEFAULT_REPORT_FILE, DEFAULT_TOP_N};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Source damage table (CSV)
    pub input: PathBuf,

    /// Output path for the JSON report (None = don't write one)
    pub output_json: Option<PathBuf>,

    /// Number of most severe events to keep
    pub top: usize,

    /// How the source table is read
    pub load_options: LoadOptions,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Bars drawn in the summary chart
    pub chart_bars: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output_json: Some(PathBuf::from(DEFAULT_REPORT_FILE)),
            top: DEFAULT_TOP_N,
            load_options: LoadOptions::default(),
            print_summary: false,
            chart_bars: 20,
        }
    }
}

/// Arguments for `comment add`
#[derive(Debug, Clone)]
pub struct CommentArgs {
    /// Comment log location
    pub store: PathBuf,

    pub date: String,
    pub cause: String,
    pub comment: String,
}
