//! minisql - parse SQL scripts and print their syntax trees

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use log::{debug, error, info};
use minisql::script::{ScriptReader, ScriptSummary, SourceLine};
use minisql::sql::{ParseError, Statement};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Canonical SQL text
    Sql,
    /// Structured tree dump
    Debug,
}

/// minisql - parse a tiny SQL dialect into syntax trees
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script with one statement per line (reads stdin when omitted)
    input: Option<PathBuf>,

    /// How to print parsed statements
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
    format: OutputFormat,

    /// Print the token stream of each line instead of parsing it
    #[arg(short, long)]
    tokens: bool,

    /// Stop at the first line that fails
    #[arg(long)]
    fail_fast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut summary = ScriptSummary::default();
    for line in ScriptReader::new(reader) {
        let line = line.context("Failed to read input")?;
        debug!("Line {}: {}", line.number, line.text);

        let ok = if args.tokens {
            print_tokens(&line, &mut summary)
        } else {
            print_statement(&line, args.format, &mut summary)
        };

        if !ok && args.fail_fast {
            break;
        }
    }

    info!(
        "Processed {} statements: {} ok, {} failed",
        summary.total(),
        summary.parsed,
        summary.failed
    );

    if summary.failed > 0 {
        bail!("{} statement(s) failed", summary.failed);
    }

    Ok(())
}

fn print_statement(
    line: &SourceLine,
    format: OutputFormat,
    summary: &mut ScriptSummary,
) -> bool {
    let result = line.parse();
    summary.record(&result);

    match result {
        Ok(stmt) => {
            render(&stmt, format);
            true
        }
        Err(e) => {
            report_error(line, &e);
            false
        }
    }
}

fn print_tokens(line: &SourceLine, summary: &mut ScriptSummary) -> bool {
    let result = line.tokenize();
    summary.record(&result);

    match result {
        Ok(tokens) => {
            for token in tokens {
                println!("{}", token);
            }
            true
        }
        Err(e) => {
            report_error(line, &e);
            false
        }
    }
}

fn report_error(line: &SourceLine, err: &ParseError) {
    error!("Line {}: {}: {}", line.number, err, line.text.trim());
    if let Some(marker) = line.error_marker(err) {
        error!("  {}", line.text);
        error!("  {}", marker);
    }
}

fn render(stmt: &Statement, format: OutputFormat) {
    match format {
        OutputFormat::Sql => println!("{}", stmt),
        OutputFormat::Debug => println!("{:#?}", stmt),
    }
}
