//! # K-Best Beam Search
//!
//! Best-first search over sequences of discrete outcomes, driven by a
//! caller-supplied scoring model and context generator. Based on the
//! search described in Ratnaparkhi (1998).

use std::collections::BTreeSet;

use crate::error::{KaisekiError, Result};
use crate::search::sequence::Sequence;

/// A model that assigns a score to every outcome in a fixed vocabulary.
///
/// Scores are aligned to the vocabulary: `eval` must return one score per
/// outcome, in the same stable order that `outcome` indexes into.
pub trait ScoringModel {
    /// The feature context this model consumes.
    type Context;

    /// Scores every outcome in the vocabulary for the given context.
    fn eval(&self, context: &Self::Context) -> Result<Vec<f64>>;

    /// The outcome label at the given vocabulary index.
    fn outcome(&self, index: usize) -> Option<&str>;

    /// The vocabulary index of the given outcome label.
    fn outcome_index(&self, outcome: &str) -> Option<usize>;

    /// Size of the outcome vocabulary.
    fn num_outcomes(&self) -> usize;
}

/// Builds the feature context for one decoding step.
///
/// The context is opaque to the search; it is consumed only by the paired
/// [`ScoringModel`].
pub trait BeamContextGenerator {
    /// Element type of the input sequence being decoded.
    type Input;
    /// Additional caller-supplied context, passed through unchanged.
    type Extra: ?Sized;
    /// The feature context produced for the scoring model.
    type Context;

    /// Builds a context from the decoding position, the full input, the
    /// partial outcome sequence decoded so far, and the extra context.
    fn context(
        &self,
        position: usize,
        input: &[Self::Input],
        outcomes: &Sequence,
        extra: &Self::Extra,
    ) -> Self::Context;
}

/// Restricts which outcomes may extend a partial sequence.
///
/// Must be a pure function of its arguments. Invalid outcomes are not
/// removed from consideration, only scored at zero, so one can still be
/// selected when nothing scores above zero.
pub type SequenceValidator<T> = dyn Fn(usize, &[T], &Sequence, &str) -> bool;

/// K-best beam search decoder over outcome sequences.
pub struct BeamSearch<G, M> {
    width: usize,
    cg: G,
    model: M,
}

impl<G, M> BeamSearch<G, M>
where
    G: BeamContextGenerator,
    M: ScoringModel<Context = G::Context>,
{
    /// Creates a new search over the given context generator and model.
    ///
    /// # Arguments
    /// * `width` - The size of the beam (k).
    /// * `cg` - The context generator for the model.
    /// * `model` - The model assigning probabilities to sequence outcomes.
    pub fn new(width: usize, cg: G, model: M) -> Self {
        Self { width, cg, model }
    }

    /// The beam width this search was configured with.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the best complete sequence of outcomes for the input.
    pub fn best_sequence(&self, input: &[G::Input], extra: &G::Extra) -> Result<Sequence> {
        let mut frontier = self.search(input, extra, None)?;
        frontier
            .pop_first()
            .ok_or_else(|| KaisekiError::Model("search produced an empty frontier".into()))
    }

    /// Like [`best_sequence`](Self::best_sequence), with a validity
    /// predicate restricting sequence continuations.
    pub fn best_sequence_validated(
        &self,
        input: &[G::Input],
        extra: &G::Extra,
        validator: &SequenceValidator<G::Input>,
    ) -> Result<Sequence> {
        let mut frontier = self.search(input, extra, Some(validator))?;
        frontier
            .pop_first()
            .ok_or_else(|| KaisekiError::Model("search produced an empty frontier".into()))
    }

    /// Returns up to `n` best complete sequences, best first.
    pub fn best_sequences(
        &self,
        n: usize,
        input: &[G::Input],
        extra: &G::Extra,
    ) -> Result<Vec<Sequence>> {
        let frontier = self.search(input, extra, None)?;
        Ok(frontier.into_iter().take(n).collect())
    }

    fn search(
        &self,
        input: &[G::Input],
        extra: &G::Extra,
        validator: Option<&SequenceValidator<G::Input>>,
    ) -> Result<BTreeSet<Sequence>> {
        let num_outcomes = self.model.num_outcomes();
        if self.width > num_outcomes {
            return Err(KaisekiError::BeamWidth {
                width: self.width,
                outcomes: num_outcomes,
            });
        }

        let mut prev: BTreeSet<Sequence> = BTreeSet::new();
        let mut next: BTreeSet<Sequence> = BTreeSet::new();
        prev.insert(Sequence::new());

        for i in 0..input.len() {
            let sz = self.width.min(prev.len());
            for _ in 0..sz {
                let Some(top) = prev.pop_first() else {
                    break;
                };
                let context = self.cg.context(i, input, &top, extra);
                let mut scores = self.model.eval(&context)?;
                if scores.len() != num_outcomes {
                    return Err(KaisekiError::Model(format!(
                        "expected {} scores, model returned {}",
                        num_outcomes,
                        scores.len()
                    )));
                }

                if let Some(valid) = validator {
                    for (c, score) in scores.iter_mut().enumerate() {
                        let outcome = self.model.outcome(c).ok_or_else(|| {
                            KaisekiError::Model(format!("no outcome at index {c}"))
                        })?;
                        if !valid(i, input, &top, outcome) {
                            *score = 0.0;
                        }
                    }
                }

                // Cutoff is the k-th largest score of this expansion. Every
                // outcome at or above it extends, so ties at the cutoff can
                // grow the beam past the configured width.
                let mut sorted = scores.clone();
                sorted.sort_by(f64::total_cmp);
                let cutoff = sorted[sorted.len() - self.width];

                for (c, &score) in scores.iter().enumerate() {
                    if score < cutoff {
                        continue;
                    }
                    let outcome = self
                        .model
                        .outcome(c)
                        .ok_or_else(|| KaisekiError::Model(format!("no outcome at index {c}")))?;
                    next.insert(top.extend(outcome, score));
                }
            }
            prev.clear();
            std::mem::swap(&mut prev, &mut next);
        }

        Ok(prev)
    }
}
