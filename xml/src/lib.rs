//! RSA keys as XML.
//!
//! Encoding writes an `RSAKeyValue` (or, for W3C private keys,
//! `RSAKeyPair`) element with base64 children. Decoding reads every
//! top-level element in the text and collects each element anywhere in
//! the tree that has `Modulus` and `Exponent` children.

pub mod document;
pub mod error;
pub mod extract;
pub mod fields;

use rsaio::{ExtractOptions, RsaKey};

pub use document::{Element, Node, parse_elements};
pub use error::{Error, Result};
pub use extract::extract_keys;
pub use fields::{XmlFlavor, element_to_key, key_to_element, to_xml};

/// Decodes every key in the XML text starting at byte offset `start`.
///
/// Returns `None` when no element follows `start`.
pub fn from_xml(text: &str, start: usize) -> Result<Option<Vec<RsaKey>>> {
    from_xml_with(text, start, &ExtractOptions::default())
}

/// [`from_xml`] with explicit extraction options.
pub fn from_xml_with(
    text: &str,
    start: usize,
    options: &ExtractOptions,
) -> Result<Option<Vec<RsaKey>>> {
    let input = rsaio::text_from(text, start)?;
    let roots = parse_elements(input, options)?;
    if roots.is_empty() {
        return Ok(None);
    }

    let keys = extract_keys(&roots, options)?;
    tracing::debug!(documents = roots.len(), keys = keys.len(), "decoded XML text");
    Ok(Some(keys))
}
