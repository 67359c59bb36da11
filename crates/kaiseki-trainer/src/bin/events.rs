//! Extracts training events from a treebank file and writes them as JSON
//! lines, one event per line.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;

use kaiseki_core::events::EventKind;
use kaiseki_trainer::extract_events;

#[derive(Parser, Debug)]
#[command(name = "events", about = "Extract parser training events from a treebank")]
struct Args {
    /// Treebank file with one bracketed sentence per line. Reads stdin
    /// when omitted.
    input: Option<PathBuf>,

    /// Which decision kind to extract: tag, chunk, build or check.
    #[arg(short, long, default_value = "build")]
    kind: EventKind,

    /// Write events to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(args: Args) -> anyhow::Result<()> {
    let stats = match (&args.input, &args.output) {
        (Some(input), Some(output)) => {
            let reader = BufReader::new(
                File::open(input).with_context(|| format!("opening {}", input.display()))?,
            );
            let writer = BufWriter::new(
                File::create(output).with_context(|| format!("creating {}", output.display()))?,
            );
            extract_events(reader, writer, args.kind)?
        }
        (Some(input), None) => {
            let reader = BufReader::new(
                File::open(input).with_context(|| format!("opening {}", input.display()))?,
            );
            extract_events(reader, io::stdout().lock(), args.kind)?
        }
        (None, Some(output)) => {
            let writer = BufWriter::new(
                File::create(output).with_context(|| format!("creating {}", output.display()))?,
            );
            extract_events(io::stdin().lock(), writer, args.kind)?
        }
        (None, None) => extract_events(io::stdin().lock(), io::stdout().lock(), args.kind)?,
    };

    info!(
        kind = %args.kind,
        events = stats.events,
        rejected = stats.rejected,
        "extraction finished"
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        let _ = writeln!(io::stderr(), "error: {err:#}");
        process::exit(1);
    }
}
