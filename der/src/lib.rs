//! Minimal DER TLV codec.
//!
//! Parses a DER byte buffer into a tree of [`Tlv`] nodes and encodes such
//! a tree back into bytes. Only definite lengths are accepted. Constructed
//! values (SEQUENCE, SET) are parsed into children; everything else keeps
//! its raw content bytes.

use nom::{IResult, Parser};
use rsaio::decoder::{DecodableFrom, Decoder};
use rsaio::encoder::{EncodableTo, Encoder};

pub mod error;

use error::{Error, Result};

/// Deepest nesting of constructed values accepted by [`Tlv::parse`].
pub const MAX_NESTING_DEPTH: usize = 32;

/// Tags the key codec distinguishes. Every other identifier octet is kept
/// verbatim in [`Tag::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Integer,
    Sequence,
    Set,
    Other(u8),
}

impl Tag {
    fn is_constructed(&self) -> bool {
        matches!(self, Tag::Sequence | Tag::Set)
    }
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Self::Integer,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            _ => Tag::Other(value),
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Integer => 0x02,
            Tag::Sequence => 0x30,
            Tag::Set => 0x31,
            Tag::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    length: u64,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    /// INTEGER with the given content bytes, taken as is.
    pub fn integer(content: Vec<u8>) -> Tlv {
        Tlv {
            tag: Tag::Integer,
            length: content.len() as u64,
            value: Value::Data(content),
        }
    }

    pub fn sequence(children: Vec<Tlv>) -> Tlv {
        let length = children.iter().map(Tlv::encoded_len).sum::<usize>() as u64;
        Tlv {
            tag: Tag::Sequence,
            length,
            value: Value::Tlv(children),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Children of a constructed value.
    pub fn children(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    /// Content bytes of a primitive value.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Parses one TLV from the front of `input`, returning the unread rest.
    pub fn parse(input: &[u8]) -> Result<(&[u8], Tlv)> {
        Self::parse_nested(input, 0)
    }

    fn parse_nested(input: &[u8], depth: usize) -> Result<(&[u8], Tlv)> {
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = take_content(input, length)?;

        if tag.is_constructed() {
            if depth >= MAX_NESTING_DEPTH {
                return Err(Error::NestingTooDeep(MAX_NESTING_DEPTH));
            }
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (new_input, v) = Self::parse_nested(data, depth + 1)?;
                data = new_input;
                tlvs.push(v);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    length,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                length,
                value: Value::Data(data.to_vec()),
            },
        ))
    }

    fn content_len(&self) -> usize {
        match &self.value {
            Value::Data(data) => data.len(),
            Value::Tlv(tlvs) => tlvs.iter().map(Tlv::encoded_len).sum(),
        }
    }

    fn encoded_len(&self) -> usize {
        let content_len = self.content_len();
        1 + length_octets(content_len) + content_len
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.tag.into());
        write_length(self.content_len(), out);
        match &self.value {
            Value::Data(data) => out.extend_from_slice(data),
            Value::Tlv(tlvs) => tlvs.iter().for_each(|tlv| tlv.write_to(out)),
        }
    }
}

impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parser(e.code),
        }
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, n) = nom::number::complete::be_u8(input)?;
    Ok((input, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, n) = nom::number::complete::be_u8(input)?;
    if n & 0x80 == 0x80 {
        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let length = n & 0x7f;
        if length == 0 {
            // indefinite length is BER only.
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::LengthValue,
            )));
        }
        if length as usize > size_of::<u64>() {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        let (input, bs) = nom::bytes::complete::take(length).parse(input)?;
        let n = bs.iter().fold(0u64, |n, &b| (n << 8) | b as u64);
        return Ok((input, n));
    }
    // short form: 0-127
    Ok((input, n as u64))
}

fn take_content(input: &[u8], length: u64) -> IResult<&[u8], &[u8]> {
    let length = usize::try_from(length).map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
    })?;
    nom::bytes::complete::take(length).parse(input)
}

fn length_octets(length: usize) -> usize {
    if length < 0x80 {
        return 1;
    }
    let significant = size_of::<usize>() - (length.leading_zeros() / 8) as usize;
    1 + significant
}

fn write_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = (length.leading_zeros() / 8) as usize;
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

impl DecodableFrom<&[u8]> for Tlv {}

impl Decoder<&[u8], Tlv> for &[u8] {
    type Error = Error;

    /// Decodes the first TLV in the buffer. Trailing bytes are ignored.
    fn decode(&self) -> Result<Tlv> {
        let (_, tlv) = Tlv::parse(self)?;
        Ok(tlv)
    }
}

impl EncodableTo<Tlv> for Vec<u8> {}

impl Encoder<Tlv, Vec<u8>> for Tlv {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        Ok(out)
    }
}
