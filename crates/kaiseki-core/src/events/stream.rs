//! # Treebank Event Streaming
//!
//! Pull-based iteration over the training events of a treebank source
//! with one bracketing per line. Events for a line are batched through an
//! extraction function and handed out one at a time; the next line is
//! only read once the current batch runs dry.

use std::collections::VecDeque;
use std::io::BufRead;

use tracing::debug;

use crate::error::Result;
use crate::events::Event;
use crate::tree::ParseTree;

/// A lazy, finite, forward-only stream of decision events over a line
/// oriented treebank reader.
///
/// The extraction function decides which event kind the stream carries;
/// compose it from [`build_events`](crate::events::build_events) and
/// friends with the context generator of your choice. A malformed line
/// yields one `Err` item and the stream continues with the next line.
/// Restarting requires a fresh stream over a reset reader.
pub struct TreebankEventStream<R, F, C> {
    lines: std::io::Lines<R>,
    extract: F,
    batch: VecDeque<Event<C>>,
}

impl<R, F, C> TreebankEventStream<R, F, C>
where
    R: BufRead,
    F: FnMut(&ParseTree) -> Result<Vec<Event<C>>>,
{
    /// Creates a stream over a treebank reader.
    pub fn new(reader: R, extract: F) -> Self {
        Self {
            lines: reader.lines(),
            extract,
            batch: VecDeque::new(),
        }
    }
}

impl<R, F, C> Iterator for TreebankEventStream<R, F, C>
where
    R: BufRead,
    F: FnMut(&ParseTree) -> Result<Vec<Event<C>>>,
{
    type Item = Result<Event<C>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.batch.pop_front() {
                return Some(Ok(event));
            }
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let tree = match ParseTree::parse(line) {
                Ok(tree) => tree,
                Err(err) => return Some(Err(err)),
            };
            match (self.extract)(&tree) {
                Ok(events) => {
                    debug!(events = events.len(), "refilled event batch");
                    self.batch.extend(events);
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
