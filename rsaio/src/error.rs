use thiserror::Error;

use crate::key::Component;

/// Errors raised by the key value model itself.
///
/// Codec crates wrap this type (usually as a `Key` variant) so callers can
/// still tell a missing private part apart from a malformed input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Private form requested on a key that only carries public components
    #[error("private key requested, but the key has no private components")]
    MissingPrivateData,

    /// A component would be an empty byte sequence
    #[error("{0} must not be empty")]
    EmptyComponent(Component),

    /// The start offset is outside the input or splits a character
    #[error("invalid start offset {0}")]
    InvalidOffset(usize),

    /// A document is nested deeper than the configured limit
    #[error("document nesting exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
