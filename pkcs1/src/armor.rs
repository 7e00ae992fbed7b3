//! PEM armor for PKCS#1 keys.

use pem::{Label, Pem, ToPem};
use rsaio::decoder::Decoder;
use rsaio::{KeyForm, RsaKey};

use crate::error::Result;
use crate::types::KeyStructure;
use crate::{from_der, to_der, to_structure};

/// Labels accepted by [`from_pem`].
pub const RSA_LABELS: &[Label] = &[Label::RSAPrivateKey, Label::RSAPublicKey];

/// Encodes `key` as a single PEM block labeled `RSA PUBLIC KEY` or
/// `RSA PRIVATE KEY` depending on `form`.
pub fn to_pem(key: &RsaKey, form: KeyForm) -> Result<String> {
    let pem = match to_structure(key, form)? {
        KeyStructure::Public(structure) => structure.to_pem()?,
        KeyStructure::Private(structure) => structure.to_pem()?,
    };
    Ok(pem.to_string())
}

/// Like [`to_pem`] with a caller supplied label.
pub fn to_pem_with_label(key: &RsaKey, form: KeyForm, label: Label) -> Result<String> {
    let der = to_der(key, form)?;
    Ok(Pem::from_bytes(label, &der).to_string())
}

/// Decodes every RSA key block found in `text` from byte offset `start`.
///
/// Returns `None` when the text holds no PEM block at all. Blocks with
/// other labels are skipped.
pub fn from_pem(text: &str, start: usize) -> Result<Option<Vec<RsaKey>>> {
    from_pem_with_labels(text, start, RSA_LABELS)
}

/// Like [`from_pem`], decoding only blocks whose label is in `accepted`.
///
/// A malformed block, or an accepted block that fails to decode, fails the
/// whole call.
pub fn from_pem_with_labels(
    text: &str,
    start: usize,
    accepted: &[Label],
) -> Result<Option<Vec<RsaKey>>> {
    let pems = pem::parse_many_from(text, start)?;
    if pems.is_empty() {
        return Ok(None);
    }

    let mut keys = Vec::with_capacity(pems.len());
    for pem in &pems {
        if !accepted.contains(pem.label()) {
            tracing::debug!(label = %pem.label(), "skipping PEM block");
            continue;
        }
        let der: Vec<u8> = pem.decode()?;
        keys.push(from_der(&der, 0)?);
    }
    tracing::debug!(blocks = pems.len(), keys = keys.len(), "decoded PEM text");
    Ok(Some(keys))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::Error;
    use crate::fixtures::{
        RSA_1024_PRIVATE_KEY, RSA_1024_PUBLIC_KEY, RSA_2048_PRIVATE_KEY, RSA_2048_PUBLIC_KEY,
    };

    fn single(text: &str) -> RsaKey {
        let mut keys = from_pem(text, 0).unwrap().unwrap();
        assert_eq!(keys.len(), 1);
        keys.remove(0)
    }

    #[rstest]
    #[case(RSA_1024_PRIVATE_KEY, RSA_1024_PUBLIC_KEY)]
    #[case(RSA_2048_PRIVATE_KEY, RSA_2048_PUBLIC_KEY)]
    fn test_pem_round_trip(#[case] private_pem: &str, #[case] public_pem: &str) {
        let key = single(private_pem);
        assert!(key.is_private());

        assert_eq!(to_pem(&key, KeyForm::Private).unwrap(), private_pem);
        assert_eq!(to_pem(&key, KeyForm::Public).unwrap(), public_pem);

        let public = single(public_pem);
        assert_eq!(public, key.to_public());
    }

    #[test]
    fn test_to_pem_private_from_public_key() {
        let key = single(RSA_1024_PUBLIC_KEY);
        let err = to_pem(&key, KeyForm::Private).unwrap_err();
        assert!(err.is_missing_private_data());
    }

    #[test]
    fn test_to_pem_with_label() {
        let key = single(RSA_1024_PUBLIC_KEY);
        let text = to_pem_with_label(&key, KeyForm::Public, Label::Other("MY KEY".into())).unwrap();

        assert!(text.starts_with("-----BEGIN MY KEY-----\n"));
        assert!(text.ends_with("\n-----END MY KEY-----"));
        assert_eq!(from_pem(&text, 0).unwrap(), Some(vec![]));

        let accepted = [Label::Other("MY KEY".into())];
        let keys = from_pem_with_labels(&text, 0, &accepted).unwrap().unwrap();
        assert_eq!(keys, vec![key]);
    }

    #[test]
    fn test_from_pem_multiple_blocks_in_order() {
        let text = format!(
            "leading text\n{RSA_1024_PUBLIC_KEY}\n-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n{RSA_2048_PRIVATE_KEY}\n"
        );
        let keys = from_pem(&text, 0).unwrap().unwrap();

        assert_eq!(keys.len(), 2);
        assert!(!keys[0].is_private());
        assert_eq!(keys[0].public_key().key_size(), 1024);
        assert!(keys[1].is_private());
        assert_eq!(keys[1].public_key().key_size(), 2048);
    }

    #[test]
    fn test_from_pem_start_offset() {
        let text = format!("{RSA_1024_PUBLIC_KEY}\n{RSA_2048_PUBLIC_KEY}\n");
        let keys = from_pem(&text, RSA_1024_PUBLIC_KEY.len()).unwrap().unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].public_key().key_size(), 2048);
    }

    #[test]
    fn test_from_pem_crlf() {
        let text = RSA_1024_PRIVATE_KEY.replace('\n', "\r\n");
        assert_eq!(single(&text), single(RSA_1024_PRIVATE_KEY));
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_blocks("just some text\nwithout armor\n")]
    fn test_from_pem_without_blocks(#[case] text: &str) {
        assert_eq!(from_pem(text, 0).unwrap(), None);
    }

    #[test]
    fn test_from_pem_malformed_block_fails_whole_call() {
        let text = format!("{RSA_1024_PUBLIC_KEY}\n-----BEGIN RSA PUBLIC KEY-----\nAAAA\n");
        assert!(matches!(from_pem(&text, 0), Err(Error::Pem(_))));
    }

    #[test]
    fn test_from_pem_bad_der_fails_whole_call() {
        // "AgEB" is an INTEGER, not a key SEQUENCE
        let text = format!(
            "{RSA_1024_PUBLIC_KEY}\n-----BEGIN RSA PUBLIC KEY-----\nAgEB\n-----END RSA PUBLIC KEY-----\n"
        );
        assert_eq!(from_pem(&text, 0).unwrap_err(), Error::ExpectedSequence);
    }
}
