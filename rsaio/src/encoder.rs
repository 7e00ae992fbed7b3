//! Encoder trait, the reverse of [`crate::decoder::Decoder`].
//!
//! `Encoder<T, E>` is implemented by the source type `T` and produces `E`;
//! `E` must implement `EncodableTo<T>`.
//!
//! ```ignore
//! use rsaio::encoder::Encoder;
//! use der::Tlv;
//!
//! let tlv = Tlv::sequence(vec![Tlv::integer(vec![0x03])]);
//! let bytes: Vec<u8> = tlv.encode().unwrap();
//! assert_eq!(bytes, vec![0x30, 0x03, 0x02, 0x01, 0x03]);
//! ```

pub trait Encoder<T, E: EncodableTo<T>> {
    type Error;

    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that `Self` can be produced by encoding `T`.
pub trait EncodableTo<T> {}
