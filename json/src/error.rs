use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("member \"{member}\" is not valid base64: {source}")]
    Base64 {
        member: &'static str,
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
