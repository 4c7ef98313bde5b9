//! Interactive question loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;

use crate::{cli::OutputFormat, engine::QueryEngine, output};

pub const EXIT_WORDS: &[&str] = &["exit", "quit", "bye"];
pub const PROMPT: &str = "You: ";

const EXAMPLE_QUESTIONS: &[&str] = &[
    "Show me total revenue",
    "Show me revenue growth",
    "Show me total assets",
    "Show me cash and equivalents",
];

/// Runs until an exit word or end of input. Returns the number of questions
/// answered.
pub fn run<R, W>(engine: &QueryEngine, input: R, out: &mut W, format: OutputFormat) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "\nWelcome to FinQuery!")?;
    writeln!(out, "You can ask things like:")?;
    for example in EXAMPLE_QUESTIONS {
        writeln!(out, " - {example}")?;
    }
    writeln!(out)?;

    let mut answered = 0usize;
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush().context("Flushing prompt")?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("Reading question")?;
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&question.to_lowercase().as_str()) {
            writeln!(out, "Goodbye!")?;
            break;
        }

        let result = engine.answer(question);
        writeln!(out, "\nResult:")?;
        output::write_result(out, &result, format)?;
        writeln!(out, "{}", "-".repeat(50))?;
        answered += 1;
    }
    info!("Session ended after {answered} question(s)");
    Ok(answered)
}
