//! PKCS#1 RSA keys over DER and PEM.
//!
//! ```text
//! RsaKey ⇄ RsaPublicKey / RsaPrivateKey ⇄ Tlv ⇄ DER bytes ⇄ PEM
//! ```
//!
//! Key components are stored as plain magnitudes in [`rsaio::RsaKey`];
//! [`integer`] adds and removes the DER sign byte at the boundary.

pub mod armor;
pub mod error;
pub mod integer;
mod types;

#[cfg(test)]
mod fixtures;

use der::Tlv;
use rsaio::decoder::Decoder;
use rsaio::encoder::Encoder;
use rsaio::{KeyForm, RsaKey};

pub use armor::{RSA_LABELS, from_pem, from_pem_with_labels, to_pem, to_pem_with_label};
pub use error::{Error, Result};
pub use types::{KeyStructure, RsaPrivateKey, RsaPublicKey, Version};

/// Builds the PKCS#1 structure for `key` in the requested form.
///
/// Fails with [`rsaio::Error::MissingPrivateData`] when `form` is private
/// and `key` has no private components.
pub fn to_structure(key: &RsaKey, form: KeyForm) -> Result<KeyStructure> {
    match form {
        KeyForm::Public => Ok(KeyStructure::Public(RsaPublicKey::from(key.public_key()))),
        KeyForm::Private => Ok(KeyStructure::Private(RsaPrivateKey::from(
            key.require_private()?,
        ))),
    }
}

/// Encodes `key` as a DER `RSAPublicKey` or `RSAPrivateKey`.
pub fn to_der(key: &RsaKey, form: KeyForm) -> Result<Vec<u8>> {
    let tlv = match to_structure(key, form)? {
        KeyStructure::Public(structure) => structure.encode()?,
        KeyStructure::Private(structure) => structure.encode()?,
    };
    Ok(tlv.encode()?)
}

/// Decodes the DER key structure starting at byte offset `start`.
///
/// Bytes following the structure are ignored.
pub fn from_der(data: &[u8], start: usize) -> Result<RsaKey> {
    let input = rsaio::bytes_from(data, start)?;
    let tlv: Tlv = input.decode()?;
    let structure: KeyStructure = tlv.decode()?;
    let key = RsaKey::try_from(&structure)?;
    tracing::debug!(
        private = key.is_private(),
        bits = key.public_key().key_size(),
        "decoded DER key"
    );
    Ok(key)
}
