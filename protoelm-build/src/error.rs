//! Error types for protoelm-build.

use std::io;

use thiserror::Error;

/// Errors that can occur during Elm code generation.
///
/// Every variant aborts the whole request: the generator never emits a
/// partial set of files.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The request bytes are not a valid CodeGeneratorRequest.
    #[error("Failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] protoelm::DecodeError),
    /// A plugin parameter this generator does not recognize.
    #[error("unknown parameter: \"{0}\"")]
    UnknownParameter(String),
    /// A parameter that requires `key=value` was given without a value.
    #[error("parameter \"{0}\" requires a value")]
    MissingParameterValue(String),
    /// A field type the classifier has no mapping for.
    #[error("Unsupported type {kind} for field \"{field}\"")]
    UnsupportedFieldType { field: String, kind: i32 },
    /// A message or enum field without a type name.
    #[error("Field \"{0}\" is missing its type name")]
    MissingTypeName(String),
    /// A map entry message that does not have exactly a key and a value.
    #[error("Map entry \"{name}\" has {fields} fields (expected 2)")]
    MalformedMapEntry { name: String, fields: usize },
    /// A map whose key type has no `comparable` Elm counterpart.
    #[error("Map field \"{field}\" has key type {key}, which cannot be a Dict key")]
    UnsupportedMapKey { field: String, key: String },
    /// A field points at a oneof the message does not declare.
    #[error("Field \"{field}\" references missing oneof #{index}")]
    InvalidOneofIndex { field: String, index: usize },
    /// An enum left without variants, e.g. after removing deprecated values.
    #[error("Enum \"{0}\" has no values")]
    EmptyEnum(String),
    /// Missing name field in descriptor.
    #[error("Missing name in descriptor")]
    MissingName,
    /// Missing field number.
    #[error("Missing field number for field \"{0}\"")]
    MissingFieldNumber(String),
}
