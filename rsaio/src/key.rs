//! RSA key value model.
//!
//! A key is either public (`n`, `e`) or private (`n`, `e` plus `d` and the
//! CRT parameters). The two cases are separate variants of [`RsaKey`], so a
//! partially private key cannot be represented.
//!
//! All components are big-endian unsigned magnitudes as the formats carry
//! them. No arithmetic validation is done; this is a container, not a
//! crypto implementation.

use std::fmt::{Debug, Display, Formatter};

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Names of the individual key components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Modulus,
    Exponent,
    D,
    P,
    Q,
    DP,
    DQ,
    InverseQ,
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Component::Modulus => "Modulus",
            Component::Exponent => "Exponent",
            Component::D => "D",
            Component::P => "P",
            Component::Q => "Q",
            Component::DP => "DP",
            Component::DQ => "DQ",
            Component::InverseQ => "InverseQ",
        };
        write!(f, "{}", name)
    }
}

/// Which form of a key an encoder should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyForm {
    #[default]
    Public,
    Private,
}

impl KeyForm {
    pub fn from_private(include_private: bool) -> Self {
        if include_private {
            KeyForm::Private
        } else {
            KeyForm::Public
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, KeyForm::Private)
    }
}

fn non_empty(component: Component, bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::EmptyComponent(component));
    }
    Ok(())
}

/// RSA public key components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    modulus: Vec<u8>,  // n
    exponent: Vec<u8>, // e
}

impl PublicKey {
    pub fn new(modulus: Vec<u8>, exponent: Vec<u8>) -> Result<Self> {
        non_empty(Component::Modulus, &modulus)?;
        non_empty(Component::Exponent, &exponent)?;
        Ok(PublicKey { modulus, exponent })
    }

    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// Get the key size in bits (RSA modulus bit length)
    pub fn key_size(&self) -> u32 {
        BigUint::from_bytes_be(&self.modulus).bits() as u32
    }

    /// The public exponent as a number, if it fits in a `u64`.
    pub fn exponent_value(&self) -> Option<u64> {
        BigUint::from_bytes_be(&self.exponent).to_u64()
    }

    pub fn components(&self) -> [(Component, &[u8]); 2] {
        [
            (Component::Modulus, &self.modulus),
            (Component::Exponent, &self.exponent),
        ]
    }
}

/// The private half of a key: private exponent and CRT parameters.
///
/// Buffers are wiped on drop, whether or not they end up in a
/// [`PrivateKey`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PrivateComponents {
    pub d: Vec<u8>,         // private exponent
    pub p: Vec<u8>,         // prime1
    pub q: Vec<u8>,         // prime2
    pub dp: Vec<u8>,        // d mod (p-1)
    pub dq: Vec<u8>,        // d mod (q-1)
    pub inverse_q: Vec<u8>, // (inverse of q) mod p
}

impl Debug for PrivateComponents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateComponents").finish_non_exhaustive()
    }
}

impl Zeroize for PrivateComponents {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.inverse_q.zeroize();
    }
}

impl Drop for PrivateComponents {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateComponents {}

/// RSA private key: public components plus [`PrivateComponents`].
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    public: PublicKey,
    private: PrivateComponents,
}

impl PrivateKey {
    pub fn new(public: PublicKey, private: PrivateComponents) -> Result<Self> {
        non_empty(Component::D, &private.d)?;
        non_empty(Component::P, &private.p)?;
        non_empty(Component::Q, &private.q)?;
        non_empty(Component::DP, &private.dp)?;
        non_empty(Component::DQ, &private.dq)?;
        non_empty(Component::InverseQ, &private.inverse_q)?;
        Ok(PrivateKey { public, private })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn modulus(&self) -> &[u8] {
        self.public.modulus()
    }

    pub fn exponent(&self) -> &[u8] {
        self.public.exponent()
    }

    pub fn d(&self) -> &[u8] {
        &self.private.d
    }

    pub fn p(&self) -> &[u8] {
        &self.private.p
    }

    pub fn q(&self) -> &[u8] {
        &self.private.q
    }

    pub fn dp(&self) -> &[u8] {
        &self.private.dp
    }

    pub fn dq(&self) -> &[u8] {
        &self.private.dq
    }

    pub fn inverse_q(&self) -> &[u8] {
        &self.private.inverse_q
    }

    /// All components in PKCS#1 order.
    pub fn components(&self) -> [(Component, &[u8]); 8] {
        [
            (Component::Modulus, self.modulus()),
            (Component::Exponent, self.exponent()),
            (Component::D, self.d()),
            (Component::P, self.p()),
            (Component::Q, self.q()),
            (Component::DP, self.dp()),
            (Component::DQ, self.dq()),
            (Component::InverseQ, self.inverse_q()),
        ]
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .field("private", &self.private)
            .finish()
    }
}

/// An RSA key value, either public only or with private components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsaKey {
    Public(PublicKey),
    Private(PrivateKey),
}

impl RsaKey {
    pub fn public_key(&self) -> &PublicKey {
        match self {
            RsaKey::Public(public) => public,
            RsaKey::Private(private) => private.public_key(),
        }
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        match self {
            RsaKey::Public(_) => None,
            RsaKey::Private(private) => Some(private),
        }
    }

    /// Returns the private key, failing with [`Error::MissingPrivateData`]
    /// for a public-only value.
    pub fn require_private(&self) -> Result<&PrivateKey> {
        self.private_key().ok_or(Error::MissingPrivateData)
    }

    pub fn is_private(&self) -> bool {
        matches!(self, RsaKey::Private(_))
    }

    /// The richest form this key can be encoded in.
    pub fn form(&self) -> KeyForm {
        KeyForm::from_private(self.is_private())
    }

    pub fn to_public(&self) -> RsaKey {
        RsaKey::Public(self.public_key().clone())
    }
}

impl From<PublicKey> for RsaKey {
    fn from(key: PublicKey) -> Self {
        RsaKey::Public(key)
    }
}

impl From<PrivateKey> for RsaKey {
    fn from(key: PrivateKey) -> Self {
        RsaKey::Private(key)
    }
}
