use thiserror::Error;

/// Errors raised while building a message schema or packing/unpacking
/// records through it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// A field description was not accepted by any element variant, or a
    /// length reference names a field that is not declared earlier in the
    /// same message.
    #[error("invalid schema definition for field {field:?}")]
    SchemaDefinition { field: String },

    #[error("format error: {0}")]
    Format(wire_formats::FormatError),

    #[error("record is missing required field {field:?}")]
    MissingField { field: String },

    #[error("buffer underrun: needed {needed} bytes, {available} available")]
    BufferUnderrun { needed: usize, available: usize },

    #[error("{remaining} trailing bytes after unpacking a complete message")]
    TrailingBytes { remaining: usize },

    /// A length reference could not be resolved to a count at pack or
    /// unpack time.
    #[error("length reference {field:?} is missing or not numeric")]
    UnresolvedRef { field: String },

    #[error("value for field {field:?} is out of range for its format")]
    ValueOutOfRange { field: String },

    #[error("value for field {field:?} has the wrong shape for its format")]
    WrongType { field: String },

    #[error("no label for value supplied in field {field:?}")]
    UnknownLabel { field: String },

    #[error("decoded discriminant {value} has no label in field {field:?}")]
    UnknownDiscriminant { field: String, value: u64 },

    /// Pad-to-count needs the sub-message's size to be statically known.
    #[error("field {field:?} cannot be zero-filled: sub-message size is not fixed")]
    UnsizedFiller { field: String },
}

impl From<wire_formats::FormatError> for MessageError {
    /// Underruns keep their own variant so callers see one taxonomy no
    /// matter which layer ran out of bytes.
    fn from(err: wire_formats::FormatError) -> Self {
        match err {
            wire_formats::FormatError::BufferUnderrun { needed, available } => {
                MessageError::BufferUnderrun { needed, available }
            }
            other => MessageError::Format(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, MessageError>;
