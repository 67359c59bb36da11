//! # Flat Sequence-Labeling Events
//!
//! The tag and chunk stages are linear passes over the token sequence
//! with the same history-as-context feedback the tree stages use, at far
//! lower complexity: flatten the initial chunks to token level, then emit
//! one event per token.

use crate::error::Result;
use crate::events::context::{ChunkContextGenerator, TagContextGenerator};
use crate::events::{Event, OTHER, cont_label, initial_chunks, start_label};
use crate::tree::ParseTree;

/// Extracts the flat-chunking events for a gold tree.
///
/// Tokens of a multi-token flat constituent are labeled START/CONT plus
/// the constituent type; tokens standing alone are labeled OTHER.
pub fn chunk_events<G: ChunkContextGenerator>(
    tree: &ParseTree,
    cg: &G,
) -> Result<Vec<Event<G::Context>>> {
    let mut tokens = Vec::new();
    let mut tags = Vec::new();
    let mut outcomes = Vec::new();

    for chunk in initial_chunks(tree) {
        if let Some(text) = tree.token_text(chunk.node) {
            tokens.push(text.to_string());
            tags.push(tree.label(chunk.node).to_string());
            outcomes.push(OTHER.to_string());
        } else {
            let chunk_type = tree.label(chunk.node);
            for (i, child) in tree.children(chunk.node).iter().enumerate() {
                tokens.push(tree.covered_text(*child));
                tags.push(tree.label(*child).to_string());
                outcomes.push(if i == 0 {
                    start_label(chunk_type)
                } else {
                    cont_label(chunk_type)
                });
            }
        }
    }

    Ok((0..tokens.len())
        .map(|i| {
            Event::new(
                outcomes[i].clone(),
                cg.context(i, &tokens, &tags, &outcomes),
            )
        })
        .collect())
}

/// Extracts the part-of-speech events for a gold tree.
pub fn tag_events<G: TagContextGenerator>(
    tree: &ParseTree,
    cg: &G,
) -> Result<Vec<Event<G::Context>>> {
    let mut tokens = Vec::new();
    let mut outcomes = Vec::new();

    for chunk in initial_chunks(tree) {
        if let Some(text) = tree.token_text(chunk.node) {
            tokens.push(text.to_string());
            outcomes.push(tree.label(chunk.node).to_string());
        } else {
            for child in tree.children(chunk.node) {
                tokens.push(tree.covered_text(*child));
                outcomes.push(tree.label(*child).to_string());
            }
        }
    }

    Ok((0..tokens.len())
        .map(|i| Event::new(outcomes[i].clone(), cg.context(i, &tokens, &outcomes)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DefaultChunkContext, DefaultTagContext};

    const SENT: &str = "(TOP (S (NP (DT the) (NN dog)) (VP (VBZ barks))))";

    #[test]
    fn chunk_events_label_flat_constituent_boundaries() {
        let tree = ParseTree::parse(SENT).unwrap();
        let events = chunk_events(&tree, &DefaultChunkContext).unwrap();
        let outcomes: Vec<&str> = events.iter().map(|e| e.outcome.as_str()).collect();
        assert_eq!(outcomes, vec!["START-NP", "CONT-NP", "OTHER"]);

        // The context for "dog" sees its token, tag and chunking history.
        assert!(events[1].context.contains(&"w=dog".to_string()));
        assert!(events[1].context.contains(&"t=NN".to_string()));
        assert!(events[1].context.contains(&"o_1=START-NP".to_string()));
    }

    #[test]
    fn chunk_events_mark_lone_tokens_as_other() {
        let tree = ParseTree::parse("(TOP (NP (NN dog)))").unwrap();
        let events = chunk_events(&tree, &DefaultChunkContext).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, OTHER);
    }

    #[test]
    fn tag_events_supervise_gold_tags() {
        let tree = ParseTree::parse(SENT).unwrap();
        let events = tag_events(&tree, &DefaultTagContext).unwrap();
        let outcomes: Vec<&str> = events.iter().map(|e| e.outcome.as_str()).collect();
        assert_eq!(outcomes, vec!["DT", "NN", "VBZ"]);
        assert!(events[2].context.contains(&"w=barks".to_string()));
        assert!(events[2].context.contains(&"o_1=NN".to_string()));
    }
}
