//! Descriptor types for the protoc plugin protocol.
//!
//! These types mirror google/protobuf/descriptor.proto and
//! google/protobuf/compiler/plugin.proto, keeping only what the Elm generator
//! reads. They are implemented independently to avoid depending on a
//! protobuf runtime.

mod decode;
mod encode;

pub use decode::decode_code_generator_request;
pub use encode::encode_code_generator_response;

/// The request protoc writes to a plugin's stdin.
/// Corresponds to google.protobuf.compiler.CodeGeneratorRequest.
#[derive(Debug, Clone, Default)]
pub struct CodeGeneratorRequest {
    /// Files protoc was explicitly asked to generate.
    pub file_to_generate: Vec<String>, // field 1
    /// The generator parameter passed on the command line.
    pub parameter: Option<String>, // field 2
    /// Every file in `file_to_generate` plus everything they import.
    pub proto_file: Vec<FileDescriptorProto>, // field 15
}

/// The response a plugin writes to stdout.
/// Corresponds to google.protobuf.compiler.CodeGeneratorResponse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeGeneratorResponse {
    /// Set when generation failed; protoc reports it and writes no files.
    pub error: Option<String>, // field 1
    /// Bitset of `Feature` values the plugin supports.
    pub supported_features: u64, // field 2
    /// Generated files.
    pub file: Vec<GeneratedFile>, // field 15
}

/// Plugin features advertised in [`CodeGeneratorResponse::supported_features`].
pub mod feature {
    pub const PROTO3_OPTIONAL: u64 = 1;
}

/// A single generated file.
/// Corresponds to google.protobuf.compiler.CodeGeneratorResponse.File.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output directory.
    pub name: String, // field 1
    /// File contents.
    pub content: String, // field 15
}

/// Describes a complete .proto file.
/// Corresponds to google.protobuf.FileDescriptorProto.
#[derive(Debug, Clone, Default)]
pub struct FileDescriptorProto {
    /// The file name, relative to root of source tree.
    pub name: Option<String>, // field 1
    /// The package name.
    pub package: Option<String>, // field 2
    /// Names of files imported by this file.
    pub dependency: Vec<String>, // field 3
    /// All top-level message definitions in this file.
    pub message_type: Vec<DescriptorProto>, // field 4
    /// All top-level enum definitions in this file.
    pub enum_type: Vec<EnumDescriptorProto>, // field 5
    /// The syntax of the proto file (e.g., "proto2", "proto3").
    pub syntax: Option<String>, // field 12
}

/// Describes a message type.
/// Corresponds to google.protobuf.DescriptorProto.
#[derive(Debug, Clone, Default)]
pub struct DescriptorProto {
    /// The message name.
    pub name: Option<String>, // field 1
    /// Fields of the message.
    pub field: Vec<FieldDescriptorProto>, // field 2
    /// Nested message types.
    pub nested_type: Vec<DescriptorProto>, // field 3
    /// Nested enum types.
    pub enum_type: Vec<EnumDescriptorProto>, // field 4
    /// Message options.
    pub options: Option<MessageOptions>, // field 7
    /// Oneof declarations.
    pub oneof_decl: Vec<OneofDescriptorProto>, // field 8
}

impl DescriptorProto {
    /// Whether this is the synthetic entry message protoc creates for a map field.
    pub fn is_map_entry(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.map_entry)
            .unwrap_or(false)
    }

    pub fn is_deprecated(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.deprecated)
            .unwrap_or(false)
    }
}

/// Describes a field within a message.
/// Corresponds to google.protobuf.FieldDescriptorProto.
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptorProto {
    /// The field name.
    pub name: Option<String>, // field 1
    /// The field number (tag).
    pub number: Option<i32>, // field 3
    /// The field label (optional, required, repeated).
    pub label: Option<i32>, // field 4
    /// The field type.
    pub r#type: Option<i32>, // field 5
    /// For message and enum types, the fully-qualified type name.
    pub type_name: Option<String>, // field 6
    /// The default value as a string.
    pub default_value: Option<String>, // field 7
    /// Field options.
    pub options: Option<FieldOptions>, // field 8
    /// If set, this field is part of a oneof.
    pub oneof_index: Option<i32>, // field 9
    /// The JSON name for this field.
    pub json_name: Option<String>, // field 10
    /// If true, this is a proto3 optional field.
    pub proto3_optional: Option<bool>, // field 17
}

impl FieldDescriptorProto {
    /// Get the field label.
    pub fn label(&self) -> Label {
        self.label.and_then(Label::from_i32).unwrap_or(Label::Optional)
    }

    /// Get the field type, if it is one this crate knows about.
    pub fn field_type(&self) -> Option<Type> {
        self.r#type.and_then(Type::from_i32)
    }

    pub fn is_deprecated(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.deprecated)
            .unwrap_or(false)
    }

    /// Index of the real (non-synthetic) oneof this field belongs to.
    ///
    /// proto3 `optional` fields live in a synthetic oneof that only exists to
    /// track presence, so they report `None`.
    pub fn real_oneof_index(&self) -> Option<usize> {
        if self.proto3_optional.unwrap_or(false) {
            return None;
        }
        self.oneof_index.and_then(|i| usize::try_from(i).ok())
    }
}

/// Describes an enum type.
/// Corresponds to google.protobuf.EnumDescriptorProto.
#[derive(Debug, Clone, Default)]
pub struct EnumDescriptorProto {
    /// The enum name.
    pub name: Option<String>, // field 1
    /// The enum values.
    pub value: Vec<EnumValueDescriptorProto>, // field 2
    /// Enum options.
    pub options: Option<EnumOptions>, // field 3
}

impl EnumDescriptorProto {
    pub fn is_deprecated(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.deprecated)
            .unwrap_or(false)
    }
}

/// Describes an enum value.
/// Corresponds to google.protobuf.EnumValueDescriptorProto.
#[derive(Debug, Clone, Default)]
pub struct EnumValueDescriptorProto {
    /// The value name.
    pub name: Option<String>, // field 1
    /// The value number.
    pub number: Option<i32>, // field 2
    /// Enum value options.
    pub options: Option<EnumValueOptions>, // field 3
}

impl EnumValueDescriptorProto {
    pub fn is_deprecated(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.deprecated)
            .unwrap_or(false)
    }
}

/// Describes a oneof.
/// Corresponds to google.protobuf.OneofDescriptorProto.
#[derive(Debug, Clone, Default)]
pub struct OneofDescriptorProto {
    /// The oneof name.
    pub name: Option<String>, // field 1
}

/// Options for a message type.
/// Corresponds to google.protobuf.MessageOptions.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub deprecated: Option<bool>, // field 3
    /// Set true if this message is a map entry type.
    pub map_entry: Option<bool>, // field 7
}

/// Options for a field.
/// Corresponds to google.protobuf.FieldOptions.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    pub deprecated: Option<bool>, // field 3
}

/// Options for an enum.
/// Corresponds to google.protobuf.EnumOptions.
#[derive(Debug, Clone, Default)]
pub struct EnumOptions {
    pub deprecated: Option<bool>, // field 3
}

/// Options for an enum value.
/// Corresponds to google.protobuf.EnumValueOptions.
#[derive(Debug, Clone, Default)]
pub struct EnumValueOptions {
    pub deprecated: Option<bool>, // field 1
}

/// Field type enumeration.
/// Corresponds to google.protobuf.FieldDescriptorProto.Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Type {
    Double = 1,
    Float = 2,
    Int64 = 3,
    Uint64 = 4,
    Int32 = 5,
    Fixed64 = 6,
    Fixed32 = 7,
    Bool = 8,
    String = 9,
    Group = 10,
    Message = 11,
    Bytes = 12,
    Uint32 = 13,
    Enum = 14,
    Sfixed32 = 15,
    Sfixed64 = 16,
    Sint32 = 17,
    Sint64 = 18,
}

impl Type {
    /// Convert from i32.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Double),
            2 => Some(Self::Float),
            3 => Some(Self::Int64),
            4 => Some(Self::Uint64),
            5 => Some(Self::Int32),
            6 => Some(Self::Fixed64),
            7 => Some(Self::Fixed32),
            8 => Some(Self::Bool),
            9 => Some(Self::String),
            10 => Some(Self::Group),
            11 => Some(Self::Message),
            12 => Some(Self::Bytes),
            13 => Some(Self::Uint32),
            14 => Some(Self::Enum),
            15 => Some(Self::Sfixed32),
            16 => Some(Self::Sfixed64),
            17 => Some(Self::Sint32),
            18 => Some(Self::Sint64),
            _ => None,
        }
    }
}

/// Field label enumeration.
/// Corresponds to google.protobuf.FieldDescriptorProto.Label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Label {
    Optional = 1,
    Required = 2,
    Repeated = 3,
}

impl Label {
    /// Convert from i32.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Optional),
            2 => Some(Self::Required),
            3 => Some(Self::Repeated),
            _ => None,
        }
    }
}
