//! Error types for eclarr

use crate::types::ElementKind;
use std::borrow::Cow;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, EclError>;

/// Errors raised while decoding or encoding an array.
///
/// Every error is fatal to the array being processed; no partial array is
/// ever handed back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum EclError {
    /// Wrong frame marker, missing quotes or a bad name field
    #[error("malformed array header: {0}")]
    MalformedHeader(Cow<'static, str>),
    /// Type tag not in the closed set of element kinds
    #[error("unknown array type tag {0:?}")]
    UnknownType(String),
    /// The kind has no payload layout for the requested element count
    #[error("type {kind} cannot hold {count} elements")]
    UnsupportedType { kind: ElementKind, count: u64 },
    /// Broken X231 extended-size header pair
    #[error("invalid X231 header for array {name:?}: {reason}")]
    ExtendedHeaderMismatch { name: String, reason: &'static str },
    /// Block framing does not agree with the declared array
    #[error("inconsistent block {block} of array: {reason}")]
    InconsistentBlock {
        block: usize,
        reason: Cow<'static, str>,
    },
    /// Raw logical value is not a recognized sentinel pattern
    #[error("invalid logical value 0x{0:08X}")]
    InvalidLogicalEncoding(u32),
    /// A text token could not be parsed as its declared kind
    #[error("cannot parse {token:?} as {kind}")]
    NumericParseFailure { token: String, kind: &'static str },
    /// Character payload is not valid UTF-8
    #[error("invalid UTF-8 in character data")]
    InvalidUtf8,
    /// Array payload variant does not belong to the declared kind
    #[error("{data} values cannot be stored as {kind}")]
    KindMismatch {
        kind: ElementKind,
        data: &'static str,
    },
    /// A character value does not fit the element width
    #[error("value {value:?} is wider than {width} characters")]
    ValueTooWide { value: String, width: usize },
    /// Underlying stream failure, including premature end of stream
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EclError {
    pub(crate) fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        EclError::MalformedHeader(message.into())
    }

    pub(crate) fn block(block: usize, reason: impl Into<Cow<'static, str>>) -> Self {
        EclError::InconsistentBlock {
            block,
            reason: reason.into(),
        }
    }

    pub(crate) fn token(token: &str, kind: &'static str) -> Self {
        EclError::NumericParseFailure {
            token: token.to_string(),
            kind,
        }
    }
}
