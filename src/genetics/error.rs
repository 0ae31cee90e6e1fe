//! Unrecoverable faults raised by the genetic containers and the organism.

/// Faults that abort an operation.
///
/// Soft failures (out-of-range gene reads, rejected setters) never produce
/// one of these; they report through `0.0` or a `false` return instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneticsError {
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("{what} shape mismatch: {left} vs {right}")]
    ShapeMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },
}

impl GeneticsError {
    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { what, index, len }
    }
}
