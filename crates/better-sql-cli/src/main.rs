//! better-sql CLI
//!
//! Reads a select expression from a file, stdin or the command line and
//! prints the generated SQL.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use better_sql_core::parser::DEFAULT_MAX_DEPTH;
use better_sql_core::{ParserOptions, compile_with, render};

/// Transpile bracket-nested select expressions to SQL.
#[derive(Parser, Debug)]
#[command(name = "better-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query file. Reads stdin when omitted or "-".
    #[arg(conflicts_with = "expr")]
    input: Option<PathBuf>,

    /// Query text given inline.
    #[arg(short, long)]
    expr: Option<String>,

    /// Print the parsed syntax tree as JSON instead of SQL.
    #[arg(long)]
    ast: bool,

    /// Maximum nesting of relations, parentheses, sub-selects and
    /// and/or chain links.
    #[arg(long, env = "BETTER_SQL_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Returns the query text and a label naming where it came from.
    fn read_query(&self) -> anyhow::Result<(String, String)> {
        if let Some(expr) = &self.expr {
            return Ok((expr.clone(), "--expr".to_string()));
        }
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok((text, path.display().to_string()))
            }
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok((text, "stdin".to_string()))
            }
        }
    }
}

/// Compiles query text and formats it for output.
fn transpile(text: &str, options: &ParserOptions, ast: bool) -> anyhow::Result<String> {
    let select = compile_with(text, options)?;
    if ast {
        return Ok(serde_json::to_string_pretty(&select)?);
    }
    Ok(render(&select).trim().to_string())
}

/// Reads the query named on the command line and transpiles it.
fn run(cli: &Cli) -> anyhow::Result<String> {
    let (text, source) = cli.read_query()?;
    debug!(source = %source, bytes = text.len(), max_depth = cli.max_depth, "Compiling query");

    let options = ParserOptions {
        max_depth: cli.max_depth,
    };
    let output = transpile(&text, &options, cli.ast)
        .with_context(|| format!("Failed to compile query from {source}"))?;

    debug!(source = %source, "Compiled query");
    Ok(output)
}

const fn log_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}
