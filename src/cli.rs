use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::intent::RatioKind;

pub const DEFAULT_INPUT: &str = "data/apple_income_statements.csv";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Ask plain-English questions about a financial statement CSV",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a statement and list the metrics it contains
    Columns(ColumnsArgs),
    /// Show the first few periods of the normalized statement
    Preview(PreviewArgs),
    /// Answer a single question such as "show me revenue growth"
    Ask(AskArgs),
    /// Show every metric matching any keyword in free text
    Search(SearchArgs),
    /// Compute a derived ratio such as debt-to-equity
    Ratio(RatioArgs),
    /// Write the normalized (periods-as-rows) statement as CSV
    Normalize(NormalizeArgs),
    /// Start an interactive question prompt
    #[command(alias = "interactive")]
    Repl(ReplArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Options shared by every command that loads a statement.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Statement CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub source: InputArgs,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Number of periods to display
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct AskArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
    /// Output format for the answer
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Free text; words of four or more letters are matched against metric names
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Output format for the matches
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct RatioArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Ratio to compute
    #[arg(long, value_enum)]
    pub kind: RatioKind,
    /// Output format for the ratio
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Output CSV file ('-' or omitted writes to stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Output delimiter (defaults to the input delimiter or output extension)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Append every derived ratio whose input columns are present
    #[arg(long = "with-ratios")]
    pub with_ratios: bool,
}

#[derive(Debug, Args)]
pub struct ReplArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Output format for answers
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
