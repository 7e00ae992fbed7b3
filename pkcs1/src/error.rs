use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid DER: {0}")]
    Der(#[from] der::error::Error),

    #[error("expected SEQUENCE")]
    ExpectedSequence,

    #[error("expected INTEGER at index {index}")]
    ExpectedInteger { index: usize },

    #[error("empty INTEGER at index {index}")]
    EmptyInteger { index: usize },

    #[error("expected 2 (public) or at least 9 (private) elements, got {0}")]
    FieldCount(usize),

    #[error("Invalid PEM: {0}")]
    Pem(#[from] pem::error::Error),

    #[error(transparent)]
    Key(#[from] rsaio::Error),
}

impl Error {
    /// Whether a private encoding was requested from a public-only key.
    pub fn is_missing_private_data(&self) -> bool {
        matches!(self, Error::Key(rsaio::Error::MissingPrivateData))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
