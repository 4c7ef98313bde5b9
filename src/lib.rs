pub mod cli;
pub mod columns;
pub mod data;
pub mod engine;
pub mod error;
pub mod intent;
pub mod io_utils;
pub mod keywords;
pub mod matching;
pub mod normalize;
pub mod output;
pub mod preview;
pub mod raw;
pub mod repl;
pub mod statement;
pub mod table;

use std::{
    env,
    io::{self, Write},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands, InputArgs},
    engine::QueryEngine,
    intent::RatioKind,
    keywords::NaiveTokenizer,
    raw::ReadOptions,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("finquery", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Columns(args) => columns::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Ask(args) => handle_ask(&args),
        Commands::Search(args) => handle_search(&args),
        Commands::Ratio(args) => handle_ratio(&args),
        Commands::Normalize(args) => handle_normalize(&args),
        Commands::Repl(args) => handle_repl(&args),
    }
}

pub fn load_engine(source: &InputArgs) -> Result<QueryEngine> {
    let encoding = io_utils::resolve_encoding(source.input_encoding.as_deref())?;
    let options = ReadOptions {
        delimiter: source.delimiter,
        encoding,
    };
    info!(
        "Loading '{}' with delimiter '{}'",
        source.input.display(),
        printable_delimiter(io_utils::resolve_input_delimiter(
            &source.input,
            source.delimiter
        ))
    );
    QueryEngine::load(&source.input, options)
        .with_context(|| format!("Loading statement from {:?}", source.input))
}

fn handle_ask(args: &cli::AskArgs) -> Result<()> {
    let engine = load_engine(&args.source)?;
    let question = args.question.join(" ");
    let result = engine.answer(&question);
    debug!("Answer for {question:?}: {result:?}");
    output::write_result(&mut io::stdout().lock(), &result, args.format)
}

fn handle_search(args: &cli::SearchArgs) -> Result<()> {
    let engine = load_engine(&args.source)?;
    let text = args.text.join(" ");
    let result = engine.search(&text, Some(&NaiveTokenizer));
    output::write_result(&mut io::stdout().lock(), &result, args.format)
}

fn handle_ratio(args: &cli::RatioArgs) -> Result<()> {
    let mut engine = load_engine(&args.source)?;
    let result = engine.add_ratio_column(args.kind);
    if result.projection().is_some() {
        info!("Appended {} as '{}'", args.kind, args.kind.column_name());
    }
    output::write_result(&mut io::stdout().lock(), &result, args.format)
}

fn handle_normalize(args: &cli::NormalizeArgs) -> Result<()> {
    let mut engine = load_engine(&args.source)?;
    if args.with_ratios {
        for kind in [RatioKind::DebtToEquity, RatioKind::CurrentRatio] {
            if let Some(message) = engine.add_ratio_column(kind).message() {
                info!("Skipping {kind}: {message}");
            }
        }
    }
    let statement = engine.into_table();

    let input_delimiter = io_utils::resolve_input_delimiter(&args.source.input, args.source.delimiter);
    let output_delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.output_delimiter,
        input_delimiter,
    );
    let mut writer = io_utils::open_csv_writer(args.output.as_deref(), output_delimiter)?;
    writer
        .write_record(statement.headers())
        .context("Writing output headers")?;
    for (idx, row) in statement.to_string_rows().iter().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("Writing output row {}", idx + 2))?;
    }
    writer.flush().context("Flushing output writer")?;

    let destination = args
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    info!(
        "Wrote {} period(s) x {} metric(s) -> {}",
        statement.len(),
        statement.metrics().len(),
        destination
    );
    Ok(())
}

fn handle_repl(args: &cli::ReplArgs) -> Result<()> {
    let engine = load_engine(&args.source)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    repl::run(&engine, stdin.lock(), &mut stdout, args.format)?;
    stdout.flush().context("Flushing stdout")
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
