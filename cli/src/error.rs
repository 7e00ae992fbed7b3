use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PEM decode error: {0}")]
    Pem(#[from] pem::error::Error),

    #[error("PKCS#1 error: {0}")]
    Pkcs1(#[from] pkcs1::Error),

    #[error("JSON key error: {0}")]
    Json(#[from] json::Error),

    #[error("XML key error: {0}")]
    Xml(#[from] xml::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("no RSA key found in input")]
    NoKey,

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, Error>;
