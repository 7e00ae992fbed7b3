use der::{Tag, Tlv};
use pem::{Label, Pem, ToPem};
use rsaio::decoder::{DecodableFrom, Decoder};
use rsaio::encoder::{EncodableTo, Encoder};
use rsaio::{PrivateComponents, PrivateKey, PublicKey, RsaKey};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::integer::{denormalize, normalize};

/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }
    (CONSTRAINED BY {-- version must be multi if otherPrimeInfos present --})

RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}
*/

const PRIVATE_KEY_FIELDS: usize = 9;
const PUBLIC_KEY_FIELDS: usize = 2;

/// PKCS#1 RSAPrivateKey version.
///
/// Decoding does not reject unknown versions; they are kept as raw
/// INTEGER content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    TwoPrime,
    Multi,
    Other(Vec<u8>),
}

impl From<&[u8]> for Version {
    fn from(content: &[u8]) -> Self {
        match content {
            [0x00] => Version::TwoPrime,
            [0x01] => Version::Multi,
            other => Version::Other(other.to_vec()),
        }
    }
}

impl From<&Version> for Tlv {
    fn from(version: &Version) -> Self {
        match version {
            Version::TwoPrime => Tlv::integer(vec![0x00]),
            Version::Multi => Tlv::integer(vec![0x01]),
            Version::Other(content) => Tlv::integer(content.clone()),
        }
    }
}

/// PKCS#1 RSA Public Key structure.
///
/// Fields hold DER INTEGER content, i.e. normalized magnitudes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub modulus: Vec<u8>,         // n
    pub public_exponent: Vec<u8>, // e
}

impl RsaPublicKey {
    fn from_integers(integers: &[&[u8]]) -> Self {
        RsaPublicKey {
            modulus: integers[0].to_vec(),
            public_exponent: integers[1].to_vec(),
        }
    }
}

/// PKCS#1 RSA Private Key structure.
///
/// Fields hold DER INTEGER content. Buffers are wiped on drop. A trailing
/// `otherPrimeInfos` is skipped when decoding and never written.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub version: Version,
    pub modulus: Vec<u8>,          // n
    pub public_exponent: Vec<u8>,  // e
    pub private_exponent: Vec<u8>, // d
    pub prime1: Vec<u8>,           // p
    pub prime2: Vec<u8>,           // q
    pub exponent1: Vec<u8>,        // d mod (p-1)
    pub exponent2: Vec<u8>,        // d mod (q-1)
    pub coefficient: Vec<u8>,      // (inverse of q) mod p
}

impl RsaPrivateKey {
    fn from_integers(integers: &[&[u8]]) -> Self {
        RsaPrivateKey {
            version: Version::from(integers[0]),
            modulus: integers[1].to_vec(),
            public_exponent: integers[2].to_vec(),
            private_exponent: integers[3].to_vec(),
            prime1: integers[4].to_vec(),
            prime2: integers[5].to_vec(),
            exponent1: integers[6].to_vec(),
            exponent2: integers[7].to_vec(),
            coefficient: integers[8].to_vec(),
        }
    }
}

impl std::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("version", &self.version)
            .field("modulus", &self.modulus)
            .field("public_exponent", &self.public_exponent)
            .finish_non_exhaustive()
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.private_exponent.zeroize();
        self.prime1.zeroize();
        self.prime2.zeroize();
        self.exponent1.zeroize();
        self.exponent2.zeroize();
        self.coefficient.zeroize();
    }
}

/// Either PKCS#1 structure, chosen by the element count of the SEQUENCE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStructure {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

impl DecodableFrom<Tlv> for KeyStructure {}

impl Decoder<Tlv, KeyStructure> for Tlv {
    type Error = Error;

    fn decode(&self) -> Result<KeyStructure> {
        let elements = match (self.tag(), self.children()) {
            (Tag::Sequence, Some(elements)) => elements,
            _ => return Err(Error::ExpectedSequence),
        };

        let fields = match elements.len() {
            PUBLIC_KEY_FIELDS => PUBLIC_KEY_FIELDS,
            n if n >= PRIVATE_KEY_FIELDS => PRIVATE_KEY_FIELDS,
            n => return Err(Error::FieldCount(n)),
        };

        // Elements past the key fields (otherPrimeInfos) are not inspected.
        let integers = elements[..fields]
            .iter()
            .enumerate()
            .map(|(index, element)| match (element.tag(), element.data()) {
                (Tag::Integer, Some([])) => Err(Error::EmptyInteger { index }),
                (Tag::Integer, Some(content)) => Ok(content),
                _ => Err(Error::ExpectedInteger { index }),
            })
            .collect::<Result<Vec<&[u8]>>>()?;

        if fields == PUBLIC_KEY_FIELDS {
            Ok(KeyStructure::Public(RsaPublicKey::from_integers(&integers)))
        } else {
            Ok(KeyStructure::Private(RsaPrivateKey::from_integers(
                &integers,
            )))
        }
    }
}

impl EncodableTo<RsaPublicKey> for Tlv {}

impl Encoder<RsaPublicKey, Tlv> for RsaPublicKey {
    type Error = Error;

    fn encode(&self) -> Result<Tlv> {
        Ok(Tlv::sequence(vec![
            Tlv::integer(self.modulus.clone()),
            Tlv::integer(self.public_exponent.clone()),
        ]))
    }
}

impl EncodableTo<RsaPrivateKey> for Tlv {}

impl Encoder<RsaPrivateKey, Tlv> for RsaPrivateKey {
    type Error = Error;

    fn encode(&self) -> Result<Tlv> {
        Ok(Tlv::sequence(vec![
            Tlv::from(&self.version),
            Tlv::integer(self.modulus.clone()),
            Tlv::integer(self.public_exponent.clone()),
            Tlv::integer(self.private_exponent.clone()),
            Tlv::integer(self.prime1.clone()),
            Tlv::integer(self.prime2.clone()),
            Tlv::integer(self.exponent1.clone()),
            Tlv::integer(self.exponent2.clone()),
            Tlv::integer(self.coefficient.clone()),
        ]))
    }
}

impl From<&PublicKey> for RsaPublicKey {
    fn from(key: &PublicKey) -> Self {
        RsaPublicKey {
            modulus: normalize(key.modulus()),
            public_exponent: normalize(key.exponent()),
        }
    }
}

impl From<&PrivateKey> for RsaPrivateKey {
    fn from(key: &PrivateKey) -> Self {
        RsaPrivateKey {
            version: Version::TwoPrime,
            modulus: normalize(key.modulus()),
            public_exponent: normalize(key.exponent()),
            private_exponent: normalize(key.d()),
            prime1: normalize(key.p()),
            prime2: normalize(key.q()),
            exponent1: normalize(key.dp()),
            exponent2: normalize(key.dq()),
            coefficient: normalize(key.inverse_q()),
        }
    }
}

impl TryFrom<&RsaPublicKey> for PublicKey {
    type Error = Error;

    fn try_from(key: &RsaPublicKey) -> Result<Self> {
        Ok(PublicKey::new(
            denormalize(&key.modulus),
            denormalize(&key.public_exponent),
        )?)
    }
}

impl TryFrom<&RsaPrivateKey> for PrivateKey {
    type Error = Error;

    fn try_from(key: &RsaPrivateKey) -> Result<Self> {
        let public = PublicKey::new(
            denormalize(&key.modulus),
            denormalize(&key.public_exponent),
        )?;
        let private = PrivateComponents {
            d: denormalize(&key.private_exponent),
            p: denormalize(&key.prime1),
            q: denormalize(&key.prime2),
            dp: denormalize(&key.exponent1),
            dq: denormalize(&key.exponent2),
            inverse_q: denormalize(&key.coefficient),
        };
        Ok(PrivateKey::new(public, private)?)
    }
}

impl TryFrom<&KeyStructure> for RsaKey {
    type Error = Error;

    fn try_from(structure: &KeyStructure) -> Result<Self> {
        match structure {
            KeyStructure::Public(key) => Ok(RsaKey::Public(PublicKey::try_from(key)?)),
            KeyStructure::Private(key) => Ok(RsaKey::Private(PrivateKey::try_from(key)?)),
        }
    }
}

fn der_bytes(tlv: &Tlv) -> Result<Vec<u8>> {
    Ok(tlv.encode()?)
}

// RsaPublicKey -> PEM encoder
impl ToPem for RsaPublicKey {
    type Error = Error;

    fn pem_label(&self) -> Label {
        Label::RSAPublicKey
    }

    fn to_pem(&self) -> Result<Pem> {
        let tlv = self.encode()?;
        Ok(Pem::from_bytes(self.pem_label(), &der_bytes(&tlv)?))
    }
}

// RsaPrivateKey -> PEM encoder
impl ToPem for RsaPrivateKey {
    type Error = Error;

    fn pem_label(&self) -> Label {
        Label::RSAPrivateKey
    }

    fn to_pem(&self) -> Result<Pem> {
        let tlv = self.encode()?;
        Ok(Pem::from_bytes(self.pem_label(), &der_bytes(&tlv)?))
    }
}
