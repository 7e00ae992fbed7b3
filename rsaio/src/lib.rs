//! # rsaio
//!
//! Core types for converting RSA key components between encodings.
//!
//! This crate defines the key value model shared by every codec in the
//! workspace, along with the `Decoder` and `Encoder` traits that establish
//! the type-safe conversion pattern used throughout rsaio.
//!
//! ## Overview
//!
//! Encoding flows top-down and decoding bottom-up:
//! ```text
//! RsaKey → RsaPrivateKey (PKCS#1) → Tlv → DER bytes → PEM
//! RsaKey → serde_json::Value → JSON text
//! RsaKey → xml::Element → XML text
//! ```
//!
//! Each DER step uses the `Decoder` / `Encoder` traits. The document
//! formats (JSON, XML) extract every key-shaped substructure from a tree,
//! so their decoders return `Option<Vec<RsaKey>>`: `None` when no document
//! was found at all, an empty vector when documents were found but none
//! looked like a key.
//!
//! ## Example
//!
//! ```
//! use rsaio::{KeyForm, PublicKey, RsaKey};
//!
//! let public = PublicKey::new(vec![0xc5, 0x3b], vec![0x01, 0x00, 0x01]).unwrap();
//! let key = RsaKey::Public(public);
//!
//! assert!(!key.is_private());
//! assert!(key.require_private().is_err());
//! assert_eq!(key.public_key().exponent_value(), Some(65537));
//! assert_eq!(KeyForm::from_private(false), KeyForm::Public);
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod key;

pub use error::{Error, Result};
pub use key::{Component, KeyForm, PrivateComponents, PrivateKey, PublicKey, RsaKey};

/// Default nesting limit for document walks.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options shared by the recursive key extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Deepest node (roots are depth 0) the extractor will visit before
    /// giving up with [`Error::DepthLimitExceeded`].
    pub max_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Returns the part of `text` starting at byte offset `start`.
///
/// Fails when `start` is past the end of the text or not on a character
/// boundary.
pub fn text_from(text: &str, start: usize) -> Result<&str> {
    text.get(start..).ok_or(Error::InvalidOffset(start))
}

/// Returns the part of `data` starting at byte offset `start`.
pub fn bytes_from(data: &[u8], start: usize) -> Result<&[u8]> {
    data.get(start..).ok_or(Error::InvalidOffset(start))
}
