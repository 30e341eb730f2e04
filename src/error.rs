use thiserror::Error;

/// Errors produced while reading protobuf encoded bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid 'wire type' value: {value}")]
    InvalidWireType { value: u8 },
    #[error("invalid leb128 varint")]
    InvalidVarInt,
    #[error("unexpected end of buffer")]
    UnexpectedEndOfBuffer,
    #[error("deprecated group encoding not supported")]
    DeprecatedGroupEncoding,
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,
    #[error("length prefix {value} exceeds the maximum message size")]
    LengthOverflow { value: u64 },
}
