pub mod beam;
pub mod sequence;

pub use beam::{BeamContextGenerator, BeamSearch, ScoringModel, SequenceValidator};
pub use sequence::Sequence;
