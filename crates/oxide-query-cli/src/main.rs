//! oxide-query CLI
//!
//! Prints parameterized SQL for filter descriptions given as JSON.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_query::{build_select, build_where, find_by_id, FilterNode, SelectOptions, Value};

/// Parameterized SQL from JSON filter descriptions.
#[derive(Parser)]
#[command(name = "oxide-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Table to select from.
    #[arg(short, long, env = "OXIDE_QUERY_TABLE", default_value = "items", global = true)]
    table: String,

    /// Output format.
    #[arg(short, long, env = "OXIDE_QUERY_FORMAT", value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a SELECT statement from statement options.
    Select {
        /// Statement options as JSON text.
        #[arg(short, long, conflicts_with = "file")]
        options: Option<String>,

        /// Read statement options from a file.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Build only the WHERE clause of a filter description.
    Where {
        /// Filter description as JSON text.
        #[arg(long, conflicts_with = "file")]
        filter: Option<String>,

        /// Read the filter description from a file.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print the statement that fetches one row by id.
    Find,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// SQL on one line, then one line per bind value.
    Text,
    /// `{"sql": ..., "params": [...]}`
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (sql, params) = match &cli.command {
        Commands::Select { options, file } => {
            let input = read_input(options.as_deref(), file.as_ref())?;
            let options = match input {
                Some(text) => text
                    .parse::<SelectOptions>()
                    .context("invalid statement options")?,
                None => SelectOptions::default(),
            };
            build_select(&cli.table, &options)
        }
        Commands::Where { filter, file } => {
            let input = read_input(filter.as_deref(), file.as_ref())?;
            let node = match input {
                Some(text) => text
                    .parse::<FilterNode>()
                    .context("invalid filter description")?,
                None => FilterNode::default(),
            };
            build_where(&node).into_parts()
        }
        Commands::Find => (find_by_id(&cli.table), vec![]),
    };

    debug!(placeholders = params.len(), "generated statement");
    println!("{}", render(cli.format, &sql, &params)?);
    Ok(())
}

/// Returns the inline text, the file contents, or piped stdin, in that order.
fn read_input(inline: Option<&str>, file: Option<&PathBuf>) -> Result<Option<String>> {
    if let Some(text) = inline {
        return Ok(Some(text.to_string()));
    }
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(Some(text));
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok((!text.trim().is_empty()).then_some(text))
}

fn render(format: Format, sql: &str, params: &[Value]) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&json!({
            "sql": sql,
            "params": params,
        }))?),
        Format::Text => {
            let mut lines = vec![sql.to_string()];
            for (i, value) in params.iter().enumerate() {
                lines.push(format!("${}: {}", i + 1, serde_json::to_string(value)?));
            }
            Ok(lines.join("\n"))
        }
    }
}
