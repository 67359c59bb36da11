//! # Scored Outcome Sequences
//!
//! A persistent sequence of (outcome, probability) decisions with a
//! cumulative score. Frontier candidates in the beam search branch from a
//! shared prefix, so extension must never copy or mutate that prefix.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A partial or complete sequence of scored outcome decisions.
///
/// `extend` returns a new sequence one link longer and structurally shares
/// the existing links, so many candidates can alias a common prefix. The
/// cumulative score is the product of the incremental probabilities; with
/// probabilities in `[0, 1]` it is monotonically non-increasing in length.
///
/// Ordering is by cumulative score descending, ties broken
/// lexicographically on the outcome labels so that search results are
/// reproducible.
#[derive(Debug, Clone)]
pub struct Sequence {
    head: Option<Rc<Link>>,
    len: usize,
    score: f64,
}

#[derive(Debug)]
struct Link {
    outcome: Rc<str>,
    prob: f64,
    prev: Option<Rc<Link>>,
}

impl Sequence {
    /// Creates an empty sequence with cumulative score 1.0.
    pub fn new() -> Self {
        Self {
            head: None,
            len: 0,
            score: 1.0,
        }
    }

    /// Returns a new sequence extended by one outcome.
    ///
    /// The receiver is left untouched and remains valid; the new sequence
    /// shares every existing link with it.
    #[must_use]
    pub fn extend(&self, outcome: &str, prob: f64) -> Sequence {
        Sequence {
            head: Some(Rc::new(Link {
                outcome: Rc::from(outcome),
                prob,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
            score: self.score * prob,
        }
    }

    /// Cumulative score: the product of the incremental probabilities.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of outcomes in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no outcomes have been added yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Outcome labels in decision order.
    pub fn outcomes(&self) -> Vec<String> {
        self.labels().iter().map(|s| (*s).to_string()).collect()
    }

    /// Incremental probabilities in decision order.
    pub fn probs(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len);
        let mut link = self.head.as_deref();
        while let Some(l) = link {
            out.push(l.prob);
            link = l.prev.as_deref();
        }
        out.reverse();
        out
    }

    /// The most recently added outcome, if any.
    pub fn last_outcome(&self) -> Option<&str> {
        self.head.as_deref().map(|l| &*l.outcome)
    }

    fn labels(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        let mut link = self.head.as_deref();
        while let Some(l) = link {
            out.push(&*l.outcome);
            link = l.prev.as_deref();
        }
        out.reverse();
        out
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.labels().cmp(&other.labels()))
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Sequence {}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:.6}]", self.labels().join(" "), self.score)
    }
}
