//! Wire format for Google's Protocol Buffers, aka [protobuf](https://protobuf.dev).

use std::io;

use bytes::Buf;

use crate::error::DecodeError;
use crate::varint::{decode_varint, encode_varint};

/// Maximum size for a single length-delimited payload (64MB).
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// Denotes the type of a field in an encoded protobuf message.
///
/// Protobuf messages are a series of key-value pairs. When encoded each key-value pair
/// is turned into a record consisting of a field number, a [`WireType`], and a payload.
/// The [`WireType`] indicates how large the proceeding payload is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireType {
    /// Variable length integer.
    ///
    /// Used for: `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, `enum`.
    Varint = 0,
    /// 64-bit integer.
    ///
    /// Used for: `fixed64`, `sfixed64`, `double`.
    I64 = 1,
    /// Variable length field.
    ///
    /// Used for: `string`, `bytes`, `message`, packed `repeated` fields.
    Len = 2,
    /// Group start (deprecated).
    SGroup = 3,
    /// Group end (deprecated).
    EGroup = 4,
    /// 32-bit integer.
    ///
    /// Used for: `fixed32`, `sfixed32`, `float`.
    I32 = 5,
}

impl WireType {
    /// Return the raw value for this [`WireType`].
    pub const fn into_val(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WireType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            3 => Ok(WireType::SGroup),
            4 => Ok(WireType::EGroup),
            5 => Ok(WireType::I32),
            value => Err(DecodeError::InvalidWireType { value }),
        }
    }
}

/// Decodes a field key, returning the field number and its [`WireType`].
pub fn decode_key(buf: &mut &[u8]) -> Result<(u32, WireType), DecodeError> {
    let key = decode_varint(buf)?;
    let wire_type = WireType::try_from((key & 0b111) as u8)?;
    Ok(((key >> 3) as u32, wire_type))
}

/// Decodes a length prefix and checks that the payload is available.
pub fn decode_len(buf: &mut &[u8]) -> Result<usize, DecodeError> {
    let len = decode_varint(buf)?;
    if len > MAX_MESSAGE_SIZE as u64 {
        return Err(DecodeError::LengthOverflow { value: len });
    }
    let len = len as usize;
    if buf.remaining() < len {
        return Err(DecodeError::UnexpectedEndOfBuffer);
    }
    Ok(len)
}

/// Splits a length-delimited payload off the front of `buf`.
pub fn decode_bytes<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let len = decode_len(buf)?;
    let slice: &'a [u8] = *buf;
    let (payload, rest) = slice.split_at(len);
    *buf = rest;
    Ok(payload)
}

/// Decodes a length-delimited UTF-8 string.
pub fn decode_string(buf: &mut &[u8]) -> Result<String, DecodeError> {
    let payload = decode_bytes(buf)?;
    std::str::from_utf8(payload)
        .map(str::to_owned)
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// Skips over a field payload of the given [`WireType`].
pub fn skip_field(buf: &mut &[u8], wire_type: WireType) -> Result<(), DecodeError> {
    let width = match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
            return Ok(());
        }
        WireType::Len => decode_len(buf)?,
        WireType::I64 => 8,
        WireType::I32 => 4,
        WireType::SGroup | WireType::EGroup => {
            return Err(DecodeError::DeprecatedGroupEncoding);
        }
    };
    if buf.remaining() < width {
        return Err(DecodeError::UnexpectedEndOfBuffer);
    }
    buf.advance(width);
    Ok(())
}

/// Encodes the provided tag and wire_type as a protobuf field key.
pub fn encode_key<W: io::Write>(tag: u32, wire_type: WireType, out: &mut W) -> io::Result<()> {
    let key = (u64::from(tag) << 3) | u64::from(wire_type.into_val());
    encode_varint(key, out).map(drop)
}

/// Encodes a varint field.
pub fn encode_uint64_field<W: io::Write>(tag: u32, value: u64, out: &mut W) -> io::Result<()> {
    encode_key(tag, WireType::Varint, out)?;
    encode_varint(value, out).map(drop)
}

/// Encodes a length-delimited field from raw bytes, e.g. a nested message.
pub fn encode_bytes_field<W: io::Write>(tag: u32, payload: &[u8], out: &mut W) -> io::Result<()> {
    encode_key(tag, WireType::Len, out)?;
    encode_varint(payload.len() as u64, out)?;
    out.write_all(payload)
}

/// Encodes a string field.
pub fn encode_string_field<W: io::Write>(tag: u32, value: &str, out: &mut W) -> io::Result<()> {
    encode_bytes_field(tag, value.as_bytes(), out)
}
