//! RSA keys as JSON.
//!
//! Encoding writes a single object with base64 members `n`, `e` and,
//! for private keys, `d`, `p`, `q`, `dp`, `dq`, `qi`. Decoding reads every
//! top-level JSON value in the text and collects each key-shaped object
//! found anywhere inside them.

pub mod error;
pub mod extract;
pub mod fields;

use rsaio::{ExtractOptions, RsaKey};
use serde_json::{Deserializer, Value};

pub use error::{Error, Result};
pub use extract::extract_keys;
pub use fields::{key_to_object, object_to_key, to_json};

/// Decodes every key in the JSON text starting at byte offset `start`.
///
/// Returns `None` when no JSON value follows `start`.
pub fn from_json(text: &str, start: usize) -> Result<Option<Vec<RsaKey>>> {
    from_json_with(text, start, &ExtractOptions::default())
}

/// [`from_json`] with explicit extraction options.
pub fn from_json_with(
    text: &str,
    start: usize,
    options: &ExtractOptions,
) -> Result<Option<Vec<RsaKey>>> {
    let input = rsaio::text_from(text, start)?;
    let roots = Deserializer::from_str(input)
        .into_iter::<Value>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if roots.is_empty() {
        return Ok(None);
    }

    let keys = extract_keys(&roots, options)?;
    tracing::debug!(documents = roots.len(), keys = keys.len(), "decoded JSON text");
    Ok(Some(keys))
}
