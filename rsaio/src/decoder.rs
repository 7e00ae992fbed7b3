//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. rsaio uses it for every step of the DER path: raw bytes to a DER
//! node, a DER node to a PKCS#1 key structure, a PEM block to bytes.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - performs the conversion
//! 2. `DecodableFrom<T>` - marker trait constraining valid conversions
//!
//! Only type pairs with an explicit `DecodableFrom` impl can be decoded, so
//! an invalid conversion is a compile error rather than a runtime one.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use rsaio::decoder::{Decoder, DecodableFrom};
//!
//! struct Content(Vec<u8>);
//! struct Magnitude(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct EmptyContent;
//!
//! impl DecodableFrom<Content> for Magnitude {}
//!
//! impl Decoder<Content, Magnitude> for Content {
//!     type Error = EmptyContent;
//!
//!     fn decode(&self) -> Result<Magnitude, Self::Error> {
//!         match self.0.split_first() {
//!             Some((0x00, rest)) => Ok(Magnitude(rest.to_vec())),
//!             Some(_) => Ok(Magnitude(self.0.clone())),
//!             None => Err(EmptyContent),
//!         }
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type `T`. The destination type must implement
/// `DecodableFrom<T>`.
///
/// ```ignore
/// use rsaio::decoder::Decoder;
/// use der::Tlv;
///
/// let bytes: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x03];
/// let tlv: Tlv = bytes.decode().unwrap();
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// This trait has no methods. Implement it for destination types:
///
/// ```no_run
/// use rsaio::decoder::DecodableFrom;
///
/// struct DerBytes;
/// struct KeyStructure;
///
/// impl DecodableFrom<DerBytes> for KeyStructure {}
/// ```
pub trait DecodableFrom<T> {}
