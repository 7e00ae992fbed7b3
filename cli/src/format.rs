use std::fmt::{Display, Formatter};

use rsaio::RsaKey;

use crate::error::{Error, Result};

/// Key encodings understood by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum KeyFormat {
    /// PKCS#1 DER bytes
    Der,
    /// PKCS#1 PEM blocks
    Pem,
    /// JSON objects with base64 members
    Json,
    /// RSAKeyValue / RSAKeyPair XML elements
    Xml,
}

impl Display for KeyFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyFormat::Der => "DER",
            KeyFormat::Pem => "PEM",
            KeyFormat::Json => "JSON",
            KeyFormat::Xml => "XML",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub(crate) enum XmlFlavorArg {
    /// RSAKeyPair root for private keys
    #[default]
    W3c,
    /// RSAKeyValue root for every key
    Dotnet,
}

impl From<XmlFlavorArg> for xml::XmlFlavor {
    fn from(flavor: XmlFlavorArg) -> Self {
        match flavor {
            XmlFlavorArg::W3c => xml::XmlFlavor::W3c,
            XmlFlavorArg::Dotnet => xml::XmlFlavor::DotNet,
        }
    }
}

/// Decodes every key in `input`, read as `format`, from byte offset `start`.
///
/// DER input holds exactly one key. Fails with [`Error::NoKey`] when
/// nothing key-shaped was found.
pub(crate) fn decode_keys(format: KeyFormat, input: Vec<u8>, start: usize) -> Result<Vec<RsaKey>> {
    let keys = match format {
        KeyFormat::Der => Some(vec![pkcs1::from_der(&input, start)?]),
        KeyFormat::Pem => pkcs1::from_pem(&String::from_utf8(input)?, start)?,
        KeyFormat::Json => json::from_json(&String::from_utf8(input)?, start)?,
        KeyFormat::Xml => xml::from_xml(&String::from_utf8(input)?, start)?,
    };

    match keys {
        Some(keys) if !keys.is_empty() => {
            tracing::debug!(%format, count = keys.len(), "decoded keys");
            Ok(keys)
        }
        Some(_) => Err(Error::NoKey),
        None => {
            tracing::debug!(%format, "no document in input");
            Err(Error::NoKey)
        }
    }
}
