//! # Kaiseki Core
//!
//! The decision-making core of a statistical structured-prediction
//! pipeline: a generic k-best beam search over sequences of discrete
//! outcomes, and its training-time mirror, the bottom-up chunk reducer
//! that transduces a gold tree into the labeled decisions a compatible
//! decoder needs to rebuild it. The scoring model itself is a
//! collaborator behind the [`search::ScoringModel`] trait; this crate
//! owns the search space and the event extraction, which must agree
//! exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaiseki_core::events::{DefaultBuildContext, build_events};
//! use kaiseki_core::tree::ParseTree;
//!
//! let tree = ParseTree::parse("(TOP (S (NP (DT the) (NN dog)) (VP (VBZ barks))))").unwrap();
//! let events = build_events(&tree, &DefaultBuildContext).unwrap();
//!
//! let outcomes: Vec<&str> = events.iter().map(|e| e.outcome.as_str()).collect();
//! assert_eq!(outcomes, vec!["START-S", "START-VP", "CONT-S"]);
//! ```
pub mod error;
pub mod events;
pub mod search;
pub mod tree;

// Re-export primary API
pub use error::{KaisekiError, Result};
pub use events::{Event, EventKind, TreebankEventStream};
pub use search::{BeamContextGenerator, BeamSearch, ScoringModel, Sequence};
pub use tree::{NodeId, ParseTree, TOP_LABEL};
