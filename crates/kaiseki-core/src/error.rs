use thiserror::Error;

/// Errors that can occur during Kaiseki core operations.
#[derive(Debug, Error)]
pub enum KaisekiError {
    /// The beam width exceeds the scoring model's outcome vocabulary.
    #[error("beam width {width} exceeds outcome vocabulary size {outcomes}")]
    BeamWidth {
        /// The requested beam width.
        width: usize,
        /// The number of outcomes the model scores.
        outcomes: usize,
    },

    /// A tree bracketing could not be read, or a gold tree violates the
    /// structural assumptions required for event extraction.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// The scoring model collaborator signaled a failure.
    #[error("scoring model error: {0}")]
    Model(String),

    /// An I/O failure while reading the underlying treebank source.
    #[error("treebank read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Kaiseki operations.
pub type Result<T> = std::result::Result<T, KaisekiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = KaisekiError::BeamWidth {
            width: 9,
            outcomes: 3,
        };
        assert_eq!(
            err.to_string(),
            "beam width 9 exceeds outcome vocabulary size 3"
        );

        let err = KaisekiError::MalformedTree("unbalanced bracketing".into());
        assert!(err.to_string().contains("unbalanced"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KaisekiError>();
    }
}
