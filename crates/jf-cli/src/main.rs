//! jf - pull a subset of a JSON document out in a standard, hashable way.

use clap::{ArgGroup, Parser};
use jf_core::Filter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod input;
mod output;
mod path;

use output::OutputMode;
use path::InputSource;

#[derive(Parser)]
#[command(name = "jf", version)]
#[command(about = "Pull a subset of a JSON document out in a standard, hashable way")]
#[command(group(ArgGroup::new("query_source").required(true).multiple(true).args(["query", "file"])))]
struct Cli {
    /// Input JSON file (`-` for stdin; `$VAR` references are expanded)
    input: String,
    /// Query string in selection-set format, e.g. '{metadata{name},kind}'
    #[arg(short, long)]
    query: Option<String>,
    /// File containing the query string
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Output sha256 instead of filtered content
    #[arg(short = 'x', long)]
    hash: bool,
    /// Enable debug logging
    #[arg(long, hide = true)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let query = input::read_query(cli.query, cli.file.as_deref())?;
    let filter = Filter::new(&query)?;
    tracing::debug!(selection = %filter.selection(), "parsed query");

    let source = InputSource::resolve(&cli.input);
    let document = input::read_document(&source)?;

    let mode = OutputMode::from_hash_flag(cli.hash);
    tracing::debug!(?mode, "filtering document");
    match mode {
        OutputMode::Canonical => output::write_stdout(&filter.apply(&document)?)?,
        OutputMode::Digest => {
            let digest = filter.digest(&document)?;
            output::write_stdout(output::format_digest(&digest).as_bytes())?
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
