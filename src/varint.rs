//! LEB128 variable-length integers, backed by the `leb128` crate.

use std::io;

use bytes::Buf;

use crate::error::DecodeError;

/// Maximum bytes for a 64-bit varint.
pub const MAX_VARINT_BYTES: usize = 10;

/// Decode a varint from the front of `buf`, advancing past it.
pub fn decode_varint(buf: &mut &[u8]) -> Result<u64, DecodeError> {
    if !buf.has_remaining() {
        return Err(DecodeError::UnexpectedEndOfBuffer);
    }
    leb128::read::unsigned(buf).map_err(|err| match err {
        leb128::read::Error::Overflow => DecodeError::InvalidVarInt,
        leb128::read::Error::IoError(_) => DecodeError::UnexpectedEndOfBuffer,
    })
}

/// Encode `value` as a varint, returning the number of bytes written.
pub fn encode_varint<W: io::Write>(value: u64, out: &mut W) -> io::Result<usize> {
    leb128::write::unsigned(out, value)
}

/// The number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u64) -> usize {
    // Each byte carries 7 bits; zero still takes one byte.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}
