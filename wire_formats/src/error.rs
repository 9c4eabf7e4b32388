use thiserror::Error;

/// Format parsing and scalar encoding errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("empty format string")]
    Empty,

    #[error("unknown format code {0:?}")]
    UnknownCode(char),

    #[error("invalid repeat count in format {0:?}")]
    InvalidRepeat(String),

    #[error("buffer underrun: needed {needed} bytes, {available} available")]
    BufferUnderrun { needed: usize, available: usize },

    #[error("value {0} does not fit in {1} bytes")]
    UnsignedOverflow(u64, usize),

    #[error("value {0} does not fit in {1} signed bytes")]
    SignedOverflow(i64, usize),
}
