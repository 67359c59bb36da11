//! # Bottom-Up Chunk Reduction
//!
//! Walks the flattened chunk frontier of a gold tree left to right,
//! assigning attachment labels and splicing completed sibling runs into
//! their parent until the sentence is reduced to its top node. The
//! decisions made along the way are exactly the ones a decoder has to
//! reproduce at inference time, so this sweep doubles as the training
//! event extractor for the build and check models.

use crate::error::{KaisekiError, Result};
use crate::events::{COMPLETE, Event, INCOMPLETE, cont_label, start_label};
use crate::events::context::{BuildContextGenerator, CheckContextGenerator};
use crate::tree::{NodeId, ParseTree, TOP_LABEL};

/// A node in the flattened left-to-right frontier of a partially built
/// tree, together with the attachment label assigned to it mid-sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The tree node this frontier entry stands for.
    pub node: NodeId,
    /// The START/CONT attachment outcome, set once the sweep reaches it.
    pub label: Option<String>,
}

impl Chunk {
    fn new(node: NodeId) -> Self {
        Self { node, label: None }
    }
}

/// Extracts the initial chunk frontier of a tree.
///
/// A node becomes a frontier leaf if it is a pos-tag node, or if it is a
/// minimal constituent covering more than one token (all children
/// pos-tags); otherwise its children are descended into. Single-token
/// constituents are not collapsed, so their internal attachment remains a
/// build decision.
pub fn initial_chunks(tree: &ParseTree) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    collect_chunks(tree, tree.root(), &mut chunks);
    chunks
}

fn collect_chunks(tree: &ParseTree, node: NodeId, chunks: &mut Vec<Chunk>) {
    if tree.is_pos_tag(node) || is_flat_chunk(tree, node) {
        chunks.push(Chunk::new(node));
    } else {
        for child in tree.children(node) {
            collect_chunks(tree, *child, chunks);
        }
    }
}

/// True for minimal constituents covering more than one token.
pub(crate) fn is_flat_chunk(tree: &ParseTree, node: NodeId) -> bool {
    tree.is_minimal_constituent(node) && tree.children(node).len() > 1
}

/// Extracts the attachment (build) events for a gold tree.
///
/// One event per frontier chunk with a parent, labeled
/// `START-`/`CONT-` plus the parent type. Attachments into the sentence
/// top node are performed but not emitted; there is nothing above the top
/// node left to decide.
pub fn build_events<G: BuildContextGenerator>(
    tree: &ParseTree,
    cg: &G,
) -> Result<Vec<Event<G::Context>>> {
    parse_event_sweep(
        tree,
        |frontier, index, parent_type, outcome| {
            if parent_type == TOP_LABEL {
                return None;
            }
            Some(Event::new(outcome, cg.context(tree, frontier, index)))
        },
        |_, _, _, _, _| None,
    )
}

/// Extracts the completion (check) events for a gold tree.
///
/// One event per cursor step: COMPLETE when the chunk closes its parent's
/// sibling span (triggering the reduction), INCOMPLETE otherwise.
pub fn check_events<G: CheckContextGenerator>(
    tree: &ParseTree,
    cg: &G,
) -> Result<Vec<Event<G::Context>>> {
    parse_event_sweep(
        tree,
        |_, _, _, _| None,
        |frontier, parent_type, start, end, complete| {
            let outcome = if complete { COMPLETE } else { INCOMPLETE };
            Some(Event::new(
                outcome,
                cg.context(tree, frontier, parent_type, start, end),
            ))
        },
    )
}

/// The single left-to-right sweep with in-place reduction.
///
/// `on_attach` sees (frontier, cursor, parent type, assigned outcome) for
/// every chunk with a parent; `on_check` sees (frontier, parent type,
/// span start, span end exclusive, completed) once per such chunk. Either
/// may decline to produce an event.
fn parse_event_sweep<C, A, K>(tree: &ParseTree, mut on_attach: A, mut on_check: K) -> Result<Vec<Event<C>>>
where
    A: FnMut(&[Chunk], usize, &str, &str) -> Option<Event<C>>,
    K: FnMut(&[Chunk], &str, usize, usize, bool) -> Option<Event<C>>,
{
    let mut chunks = initial_chunks(tree);
    let mut events = Vec::new();
    let mut ci = 0;

    while ci < chunks.len() {
        let node = chunks[ci].node;
        let Some(parent) = tree.parent(node) else {
            if node != tree.root() {
                return Err(KaisekiError::MalformedTree(format!(
                    "chunk '{}' has no parent mid-sweep",
                    tree.label(node)
                )));
            }
            ci += 1;
            continue;
        };

        let parent_type = tree.label(parent);
        let outcome = if tree.is_first_child(node, parent) {
            start_label(parent_type)
        } else {
            cont_label(parent_type)
        };
        chunks[ci].label = Some(outcome.clone());
        if let Some(event) = on_attach(&chunks, ci, parent_type, &outcome) {
            events.push(event);
        }

        // First of the contiguous frontier run sharing this parent,
        // scanning backward from the cursor.
        let mut first = ci;
        while first > 0 && tree.parent(chunks[first - 1].node) == Some(parent) {
            first -= 1;
        }

        if tree.is_last_child(node, parent) {
            if let Some(event) = on_check(&chunks, parent_type, first, ci + 1, true) {
                events.push(event);
            }
            // Reduce: the sibling run collapses into its completed parent,
            // which the sweep considers next so reductions can cascade.
            chunks.drain(first..=ci);
            if parent_type != TOP_LABEL {
                chunks.insert(first, Chunk::new(parent));
            }
            ci = first;
        } else {
            if let Some(event) = on_check(&chunks, parent_type, first, ci + 1, false) {
                events.push(event);
            }
            ci += 1;
        }
    }

    Ok(events)
}
