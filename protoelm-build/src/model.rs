//! The resolved model of a proto file, ready to be rendered as Elm.
//!
//! Nodes own their children and are never mutated once the walker hands them
//! out. Every identifier and expression is final: the renderer pastes them
//! verbatim.

use crate::ident::{DecoderName, EncoderName, FieldName, TypeName, VariableName, VariantName};

/// One generated Elm module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileModel {
    /// The `.proto` path this module was generated from.
    pub source_file: String,
    /// Dotted Elm module name, e.g. `App.Foo.Bar`.
    pub module_name: String,
    /// Output path relative to the plugin's out dir, e.g. `Foo/Bar.elm`.
    pub output_name: String,
    /// Whether some message declares a map field.
    pub uses_dict: bool,
    /// Modules of the (non-excluded) dependencies.
    pub imports: Vec<String>,
    pub enums: Vec<EnumNode>,
    pub messages: Vec<MessageNode>,
}

/// A message, rendered as a record type alias with a decoder and encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub name: TypeName,
    /// Outer-to-inner ancestor segments; the message's own segment is last.
    pub path: Vec<String>,
    /// The record holding every field's default.
    pub default_name: VariableName,
    pub decoder: DecoderName,
    pub encoder: EncoderName,
    /// Record fields in declaration order, followed by one field per oneof.
    pub fields: Vec<FieldNode>,
    /// Encoder output, one slot per position from 1 to the highest number.
    pub encode_plan: Vec<EncodeSlot>,
    pub oneofs: Vec<OneofNode>,
    pub enums: Vec<EnumNode>,
    pub messages: Vec<MessageNode>,
}

/// How a field's value is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Optional,
    Repeated,
    Map,
    /// Holds the active member of a oneof.
    Oneof,
}

/// A record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub name: FieldName,
    pub type_expr: String,
    /// Wire number; oneof holders span several and have none.
    pub number: Option<u32>,
    pub default: String,
    /// A `Decoder (a -> b)` step for the record pipeline.
    pub decoder: String,
    /// `None` for oneof holders, whose members are encoded per slot.
    pub encoder: Option<String>,
    pub shape: Shape,
}

/// An encoder call waiting for its position in the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeEntry {
    pub number: u32,
    pub expr: String,
}

/// One position of a message's encoded array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeSlot {
    /// No field is declared at this number.
    Placeholder,
    Field(String),
}

impl EncodeSlot {
    pub fn expr(&self) -> &str {
        match self {
            EncodeSlot::Placeholder => "JE.null",
            EncodeSlot::Field(expr) => expr,
        }
    }
}

/// A oneof, rendered as a custom type with an extra `Unspecified` constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofNode {
    pub name: TypeName,
    /// Accessor of the holder field on the owning record.
    pub field: FieldName,
    pub decoder: DecoderName,
    pub encoder: EncoderName,
    pub unspecified: VariantName,
    pub variants: Vec<OneofVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofVariant {
    pub name: VariantName,
    pub number: u32,
    pub type_expr: String,
    /// Reads the member's position, failing on null so the next member is tried.
    pub decoder: String,
    /// Encodes the member's value `x` when the slot being encoded is its own.
    pub encoder: String,
}

/// An enum, rendered as a custom type. The first variant is the default.
///
/// Only the generator builds enums, which keeps the variant list non-empty:
///
/// ```compile_fail
/// use protoelm_build::ident::{decoder_name, encoder_name, enum_default_name, type_name};
/// use protoelm_build::model::EnumNode;
///
/// let ty = type_name("Color", &[]);
/// let node = EnumNode {
///     decoder: decoder_name(&ty),
///     encoder: encoder_name(&ty),
///     default_name: enum_default_name(&ty),
///     name: ty,
///     variants: Vec::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNode {
    pub name: TypeName,
    pub decoder: DecoderName,
    pub encoder: EncoderName,
    pub default_name: VariableName,
    pub(crate) variants: Vec<EnumVariant>,
}

impl EnumNode {
    /// Variants in declaration order.
    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    pub fn default_variant(&self) -> &EnumVariant {
        &self.variants[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: VariantName,
    pub number: i32,
}
