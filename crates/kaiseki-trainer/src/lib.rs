//! # Kaiseki Trainer
//!
//! Turns a treebank (one bracketing per line) into serialized training
//! events for an external model fitter. The core does the extraction;
//! this crate wires the default context generators to the event stream
//! and writes one JSON object per event.

use std::io::{BufRead, Write};

use anyhow::Context as _;
use tracing::warn;

use kaiseki_core::KaisekiError;
use kaiseki_core::events::{
    DefaultBuildContext, DefaultCheckContext, DefaultChunkContext, DefaultTagContext, Event,
    EventKind, TreebankEventStream, build_events, check_events, chunk_events, tag_events,
};

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Events written out.
    pub events: usize,
    /// Sentences rejected as malformed and skipped.
    pub rejected: usize,
}

/// Extracts events of one kind from a treebank reader and writes them as
/// JSON lines.
///
/// Malformed sentences are logged, counted and skipped; extraction of the
/// rest of the corpus continues. I/O failures abort the run.
pub fn extract_events<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    kind: EventKind,
) -> anyhow::Result<ExtractStats> {
    let stream: Box<dyn Iterator<Item = kaiseki_core::Result<Event<Vec<String>>>>> = match kind {
        EventKind::Tag => Box::new(TreebankEventStream::new(reader, |tree| {
            tag_events(tree, &DefaultTagContext)
        })),
        EventKind::Chunk => Box::new(TreebankEventStream::new(reader, |tree| {
            chunk_events(tree, &DefaultChunkContext)
        })),
        EventKind::Build => Box::new(TreebankEventStream::new(reader, |tree| {
            build_events(tree, &DefaultBuildContext)
        })),
        EventKind::Check => Box::new(TreebankEventStream::new(reader, |tree| {
            check_events(tree, &DefaultCheckContext)
        })),
    };

    let mut stats = ExtractStats::default();
    for item in stream {
        match item {
            Ok(event) => {
                let line = serde_json::to_string(&event).context("serializing event")?;
                writeln!(writer, "{line}").context("writing event")?;
                stats.events += 1;
            }
            Err(KaisekiError::MalformedTree(reason)) => {
                warn!(%reason, "rejecting malformed sentence");
                stats.rejected += 1;
            }
            Err(err) => return Err(err).context("event extraction failed"),
        }
    }
    writer.flush().context("flushing event output")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TREEBANK: &str = "\
(TOP (S (NP (DT the) (NN dog)) (VP (VBZ barks))))
(TOP (NP (NN cats)))
";

    #[test]
    fn writes_one_json_line_per_event() {
        let mut out = Vec::new();
        let stats = extract_events(Cursor::new(TREEBANK), &mut out, EventKind::Tag).unwrap();
        assert_eq!(stats, ExtractStats { events: 4, rejected: 0 });

        let lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
        assert_eq!(lines.len(), 4);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["outcome"], "DT");
        assert!(first["context"].as_array().unwrap().len() > 2);
    }

    #[test]
    fn malformed_sentences_are_counted_and_skipped() {
        let input = "(TOP (NP (NN dog)))\n(TOP (NP\n(TOP (NP (NN cats)))\n";
        let mut out = Vec::new();
        let stats = extract_events(Cursor::new(input), &mut out, EventKind::Build).unwrap();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.events, 2);
    }

    #[test]
    fn check_extraction_reaches_the_top_node() {
        let mut out = Vec::new();
        let stats = extract_events(
            Cursor::new("(TOP (NP (NN dog)))\n"),
            &mut out,
            EventKind::Check,
        )
        .unwrap();
        assert_eq!(stats.events, 2);
        let text = std::str::from_utf8(&out).unwrap();
        assert_eq!(text.matches("COMPLETE").count(), 2);
    }
}
