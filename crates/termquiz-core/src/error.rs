//! Sequence error types.
//!
//! Every failure raised by the collection utilities is a [`SeqError`]. The
//! variants keep the original callback error as their source so callers can
//! downcast it instead of matching on message text.

use thiserror::Error;

/// Errors that can occur while transforming, sorting, or building sequences.
#[derive(Debug, Error)]
pub enum SeqError {
    /// A per-element callback failed, either synchronously or when its
    /// deferred value was awaited.
    #[error("callback failed at index {index}: {source:#}")]
    Callback {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The sort comparator failed; the sort was aborted.
    #[error("comparator failed: {0:#}")]
    Comparator(#[source] anyhow::Error),

    /// A helper was given an argument it cannot work with.
    #[error("{function}: {message}")]
    Argument {
        function: &'static str,
        message: String,
    },

    /// An index past the end of the sequence was written.
    #[error("index {index} out of bounds for sequence of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

impl SeqError {
    pub(crate) fn argument(function: &'static str, message: impl Into<String>) -> Self {
        SeqError::Argument {
            function,
            message: message.into(),
        }
    }

    /// Index of the element whose callback failed, if this is a callback error.
    pub fn index(&self) -> Option<usize> {
        match self {
            SeqError::Callback { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_error_keeps_source() {
        let err = SeqError::Callback {
            index: 2,
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.index(), Some(2));
        assert_eq!(err.to_string(), "callback failed at index 2: boom");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn argument_error_message() {
        let err = SeqError::argument("ord", "argument needs to be a string of length 1");
        assert_eq!(
            err.to_string(),
            "ord: argument needs to be a string of length 1"
        );
        assert_eq!(err.index(), None);
    }
}
