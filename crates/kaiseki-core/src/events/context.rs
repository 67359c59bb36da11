//! # Decision Context Generation
//!
//! One small capability trait per decision kind, each parameterized by an
//! opaque context type consumed only by the paired scoring model. The
//! default implementations produce flat feature-string vectors with the
//! usual window and history features; the tag and chunk defaults also
//! plug into the beam search so that decode time sees exactly the
//! features training saw.

use crate::events::reducer::Chunk;
use crate::search::{BeamContextGenerator, Sequence};
use crate::tree::ParseTree;

/// Builds contexts for per-chunk attachment (build) decisions.
pub trait BuildContextGenerator {
    /// The feature context produced.
    type Context;

    /// Context for the frontier chunk at `index`.
    fn context(&self, tree: &ParseTree, frontier: &[Chunk], index: usize) -> Self::Context;
}

/// Builds contexts for per-span completion (check) decisions.
pub trait CheckContextGenerator {
    /// The feature context produced.
    type Context;

    /// Context for the proposed constituent of `parent_type` spanning
    /// `frontier[start..end]`.
    fn context(
        &self,
        tree: &ParseTree,
        frontier: &[Chunk],
        parent_type: &str,
        start: usize,
        end: usize,
    ) -> Self::Context;
}

/// Builds contexts for per-token flat-chunking decisions.
pub trait ChunkContextGenerator {
    /// The feature context produced.
    type Context;

    /// Context for token `index` given the token, tag and outcome-history
    /// arrays of the whole sentence.
    fn context(
        &self,
        index: usize,
        tokens: &[String],
        tags: &[String],
        outcomes: &[String],
    ) -> Self::Context;
}

/// Builds contexts for per-token part-of-speech decisions.
pub trait TagContextGenerator {
    /// The feature context produced.
    type Context;

    /// Context for token `index` given the token and outcome-history
    /// arrays of the whole sentence.
    fn context(&self, index: usize, tokens: &[String], outcomes: &[String]) -> Self::Context;
}

const BOUNDARY: &str = "*BND*";

fn push_window<'a>(
    features: &mut Vec<String>,
    prefix: &str,
    items: impl Fn(usize) -> Option<&'a str>,
    index: usize,
) {
    let prev = if index > 0 { items(index - 1) } else { None };
    features.push(format!("{prefix}_1={}", prev.unwrap_or(BOUNDARY)));
    features.push(format!("{prefix}1={}", items(index + 1).unwrap_or(BOUNDARY)));
}

/// Default part-of-speech feature set: the token with its short prefixes
/// and suffixes, the neighboring tokens and the two previous outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTagContext;

impl DefaultTagContext {
    /// The shared train/decode feature function. `prior` holds only the
    /// outcomes already decided for positions before `index`.
    pub fn features(&self, index: usize, tokens: &[String], prior: &[String]) -> Vec<String> {
        let token = tokens[index].as_str();
        let mut features = vec!["default".to_string(), format!("w={token}")];
        let chars: Vec<char> = token.chars().collect();
        for n in 1..=4usize.min(chars.len()) {
            let prefix: String = chars[..n].iter().collect();
            let suffix: String = chars[chars.len() - n..].iter().collect();
            features.push(format!("pre={prefix}"));
            features.push(format!("suf={suffix}"));
        }
        push_window(
            &mut features,
            "w",
            |i| tokens.get(i).map(String::as_str),
            index,
        );
        for back in 1..=2usize {
            let outcome = index
                .checked_sub(back)
                .and_then(|i| prior.get(i))
                .map(String::as_str)
                .unwrap_or(BOUNDARY);
            features.push(format!("o_{back}={outcome}"));
        }
        features
    }
}

impl TagContextGenerator for DefaultTagContext {
    type Context = Vec<String>;

    fn context(&self, index: usize, tokens: &[String], outcomes: &[String]) -> Vec<String> {
        self.features(index, tokens, &outcomes[..index])
    }
}

impl BeamContextGenerator for DefaultTagContext {
    type Input = String;
    type Extra = ();
    type Context = Vec<String>;

    fn context(
        &self,
        position: usize,
        input: &[String],
        outcomes: &Sequence,
        _extra: &(),
    ) -> Vec<String> {
        self.features(position, input, &outcomes.outcomes())
    }
}

/// Default flat-chunking feature set: token and tag windows plus the two
/// previous chunking outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultChunkContext;

impl DefaultChunkContext {
    /// The shared train/decode feature function.
    pub fn features(
        &self,
        index: usize,
        tokens: &[String],
        tags: &[String],
        prior: &[String],
    ) -> Vec<String> {
        let mut features = vec![
            "default".to_string(),
            format!("w={}", tokens[index]),
            format!("t={}", tags[index]),
        ];
        push_window(
            &mut features,
            "w",
            |i| tokens.get(i).map(String::as_str),
            index,
        );
        push_window(&mut features, "t", |i| tags.get(i).map(String::as_str), index);
        for back in 1..=2usize {
            let outcome = index
                .checked_sub(back)
                .and_then(|i| prior.get(i))
                .map(String::as_str)
                .unwrap_or(BOUNDARY);
            features.push(format!("o_{back}={outcome}"));
        }
        features
    }
}

impl ChunkContextGenerator for DefaultChunkContext {
    type Context = Vec<String>;

    fn context(
        &self,
        index: usize,
        tokens: &[String],
        tags: &[String],
        outcomes: &[String],
    ) -> Vec<String> {
        self.features(index, tokens, tags, &outcomes[..index])
    }
}

impl BeamContextGenerator for DefaultChunkContext {
    type Input = String;
    // Decode-time chunking runs after tagging; the tags ride along as
    // additional context.
    type Extra = [String];
    type Context = Vec<String>;

    fn context(
        &self,
        position: usize,
        input: &[String],
        outcomes: &Sequence,
        tags: &[String],
    ) -> Vec<String> {
        self.features(position, input, tags, &outcomes.outcomes())
    }
}

fn chunk_feature(tree: &ParseTree, chunk: &Chunk) -> String {
    match &chunk.label {
        Some(label) => format!("{}|{}", tree.label(chunk.node), label),
        None => tree.label(chunk.node).to_string(),
    }
}

/// Default build feature set: the cursor chunk's type, head text and
/// neighbors on both sides with their assigned labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBuildContext;

impl BuildContextGenerator for DefaultBuildContext {
    type Context = Vec<String>;

    fn context(&self, tree: &ParseTree, frontier: &[Chunk], index: usize) -> Vec<String> {
        let chunk = &frontier[index];
        let mut features = vec![
            "default".to_string(),
            format!("c={}", tree.label(chunk.node)),
            format!("h={}", tree.covered_text(chunk.node)),
        ];
        for back in 1..=2usize {
            let feature = index
                .checked_sub(back)
                .and_then(|i| frontier.get(i))
                .map(|c| chunk_feature(tree, c))
                .unwrap_or_else(|| BOUNDARY.to_string());
            features.push(format!("c_{back}={feature}"));
        }
        for ahead in 1..=2usize {
            let feature = frontier
                .get(index + ahead)
                .map(|c| chunk_feature(tree, c))
                .unwrap_or_else(|| BOUNDARY.to_string());
            features.push(format!("c{ahead}={feature}"));
        }
        features
    }
}

/// Default check feature set: the proposed parent type, the labeled
/// children of its span and the frontier chunks flanking it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCheckContext;

impl CheckContextGenerator for DefaultCheckContext {
    type Context = Vec<String>;

    fn context(
        &self,
        tree: &ParseTree,
        frontier: &[Chunk],
        parent_type: &str,
        start: usize,
        end: usize,
    ) -> Vec<String> {
        let mut features = vec!["default".to_string(), format!("p={parent_type}")];
        for chunk in &frontier[start..end] {
            features.push(format!("k={}", chunk_feature(tree, chunk)));
        }
        let before = start
            .checked_sub(1)
            .and_then(|i| frontier.get(i))
            .map(|c| chunk_feature(tree, c))
            .unwrap_or_else(|| BOUNDARY.to_string());
        features.push(format!("k_1={before}"));
        let after = frontier
            .get(end)
            .map(|c| chunk_feature(tree, c))
            .unwrap_or_else(|| BOUNDARY.to_string());
        features.push(format!("k1={after}"));
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tag_features_include_token_window_and_history() {
        let tokens = strings(&["the", "dog", "barks"]);
        let outcomes = strings(&["DT", "NN", "VBZ"]);
        let features = TagContextGenerator::context(&DefaultTagContext, 1, &tokens, &outcomes);

        assert!(features.contains(&"w=dog".to_string()));
        assert!(features.contains(&"w_1=the".to_string()));
        assert!(features.contains(&"w1=barks".to_string()));
        assert!(features.contains(&"o_1=DT".to_string()));
        // Only prior outcomes are visible; position 2's tag never leaks in.
        assert!(!features.iter().any(|f| f.contains("VBZ")));
    }

    #[test]
    fn tag_features_mark_sentence_boundaries() {
        let tokens = strings(&["dog"]);
        let features = TagContextGenerator::context(&DefaultTagContext, 0, &tokens, &[]);
        assert!(features.contains(&"w_1=*BND*".to_string()));
        assert!(features.contains(&"w1=*BND*".to_string()));
        assert!(features.contains(&"o_1=*BND*".to_string()));
    }

    #[test]
    fn tag_features_agree_between_training_and_decoding() {
        let tokens = strings(&["the", "dog", "barks"]);
        let gold = strings(&["DT", "NN", "VBZ"]);
        let decoded = Sequence::new().extend("DT", 0.9).extend("NN", 0.8);

        let train = TagContextGenerator::context(&DefaultTagContext, 2, &tokens, &gold);
        let decode =
            BeamContextGenerator::context(&DefaultTagContext, 2, &tokens, &decoded, &());
        assert_eq!(train, decode);
    }

    #[test]
    fn chunk_features_agree_between_training_and_decoding() {
        let tokens = strings(&["the", "dog"]);
        let tags = strings(&["DT", "NN"]);
        let gold = strings(&["START-NP", "CONT-NP"]);
        let decoded = Sequence::new().extend("START-NP", 0.9);

        let train = ChunkContextGenerator::context(&DefaultChunkContext, 1, &tokens, &tags, &gold);
        let decode = BeamContextGenerator::context(
            &DefaultChunkContext,
            1,
            &tokens,
            &decoded,
            tags.as_slice(),
        );
        assert_eq!(train, decode);
    }

    #[test]
    fn build_and_check_features_carry_assigned_labels() {
        let tree = ParseTree::parse("(TOP (S (NP (DT the) (NN dog)) (VP (VBZ barks))))").unwrap();
        let mut frontier = crate::events::initial_chunks(&tree);
        frontier[0].label = Some("START-S".to_string());

        let build = DefaultBuildContext.context(&tree, &frontier, 1);
        assert!(build.contains(&"c=VBZ".to_string()));
        assert!(build.contains(&"h=barks".to_string()));
        assert!(build.contains(&"c_1=NP|START-S".to_string()));

        let check = DefaultCheckContext.context(&tree, &frontier, "VP", 1, 2);
        assert!(check.contains(&"p=VP".to_string()));
        assert!(check.contains(&"k=VBZ".to_string()));
        assert!(check.contains(&"k_1=NP|START-S".to_string()));
        assert!(check.contains(&"k1=*BND*".to_string()));
    }
}
