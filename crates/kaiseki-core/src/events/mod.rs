//! # Training Decision Events
//!
//! Event extraction transduces a gold tree into the labeled decisions a
//! compatible decoder would need to reproduce it. Four event kinds cover
//! the four decision points of the incremental parsing pipeline:
//! part-of-speech tagging, flat chunking, constituent attachment (build)
//! and constituent completion (check).

pub mod context;
pub mod labeler;
pub mod reducer;
pub mod stream;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use context::{
    BuildContextGenerator, CheckContextGenerator, ChunkContextGenerator, DefaultBuildContext,
    DefaultCheckContext, DefaultChunkContext, DefaultTagContext, TagContextGenerator,
};
pub use labeler::{chunk_events, tag_events};
pub use reducer::{Chunk, build_events, check_events, initial_chunks};
pub use stream::TreebankEventStream;

/// Outcome for a completed constituent span.
pub const COMPLETE: &str = "COMPLETE";
/// Outcome for a constituent span still missing children.
pub const INCOMPLETE: &str = "INCOMPLETE";
/// Chunking outcome for a token outside any flat chunk.
pub const OTHER: &str = "OTHER";

/// Outcome attaching a chunk as the first child of a constituent type.
pub fn start_label(constituent_type: &str) -> String {
    format!("START-{constituent_type}")
}

/// Outcome attaching a chunk as a later child of a constituent type.
pub fn cont_label(constituent_type: &str) -> String {
    format!("CONT-{constituent_type}")
}

/// A single (context, outcome) training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<C> {
    /// The supervised decision label.
    pub outcome: String,
    /// The feature context the decision was made in.
    pub context: C,
}

impl<C> Event<C> {
    /// Creates a new event.
    pub fn new(outcome: impl Into<String>, context: C) -> Self {
        Self {
            outcome: outcome.into(),
            context,
        }
    }
}

/// The four decision kinds of the parsing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Per-token part-of-speech decisions.
    Tag,
    /// Per-token flat-constituent START/CONTINUE decisions.
    Chunk,
    /// Per-chunk attachment decisions.
    Build,
    /// Per-span COMPLETE/INCOMPLETE reduce decisions.
    Check,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Tag => "tag",
            EventKind::Chunk => "chunk",
            EventKind::Build => "build",
            EventKind::Check => "check",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "tag" => Ok(EventKind::Tag),
            "chunk" => Ok(EventKind::Chunk),
            "build" => Ok(EventKind::Build),
            "check" => Ok(EventKind::Check),
            other => Err(format!("unknown event kind: {other}")),
        }
    }
}
