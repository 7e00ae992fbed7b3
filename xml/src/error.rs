use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("element <{0}> is not closed")]
    UnclosedElement(String),

    #[error("closing tag </{0}> without an open element")]
    UnexpectedEnd(String),

    #[error("{component} is not valid base64: {source}")]
    Base64 {
        component: rsaio::Component,
        source: base64::DecodeError,
    },

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
