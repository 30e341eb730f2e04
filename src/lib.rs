//! Wire primitives for Google's Protocol Buffers, as needed by a `protoc`
//! plugin: reading a `CodeGeneratorRequest` and writing a
//! `CodeGeneratorResponse`.

mod error;

pub mod varint;
pub mod wire;

pub use error::DecodeError;
