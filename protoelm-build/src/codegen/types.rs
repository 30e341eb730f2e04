//! Type mapping from protobuf types to Elm types and codecs.

use crate::descriptor::{FieldDescriptorProto, Label, Type};
use crate::ident::{
    decoder_name, encoder_name, enum_default_name, external_path, external_type, variant_name,
    DecoderName, EncoderName,
};
use crate::Error;

/// Elm type information for a proto field, before any wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElmType {
    pub type_expr: String,
    pub decoder: DecoderName,
    pub encoder: EncoderName,
    /// Value used when the field is absent on the wire.
    pub default: String,
}

/// A type with a fixed runtime codec instead of a generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownType {
    pub type_expr: &'static str,
    pub decoder: &'static str,
    pub encoder: &'static str,
}

const fn wkt(type_expr: &'static str, decoder: &'static str, encoder: &'static str) -> WellKnownType {
    WellKnownType {
        type_expr,
        decoder,
        encoder,
    }
}

/// Look up the runtime binding of a fully qualified type name.
pub fn well_known_type(type_name: &str) -> Option<WellKnownType> {
    let binding = match type_name {
        ".google.protobuf.Timestamp" => wkt("Timestamp", "timestampDecoder", "timestampEncoder"),
        ".google.protobuf.Int32Value" | ".google.protobuf.UInt32Value" => {
            wkt("Int", "intValueDecoder", "intValueEncoder")
        }
        // 64-bit wrappers travel as numeric strings.
        ".google.protobuf.Int64Value" | ".google.protobuf.UInt64Value" => {
            wkt("Int", "intValueDecoder", "numericStringEncoder")
        }
        ".google.protobuf.DoubleValue" | ".google.protobuf.FloatValue" => {
            wkt("Float", "floatValueDecoder", "floatValueEncoder")
        }
        ".google.protobuf.StringValue" => wkt("String", "stringValueDecoder", "stringValueEncoder"),
        ".google.protobuf.BytesValue" => wkt("Bytes", "bytesValueDecoder", "bytesValueEncoder"),
        ".google.protobuf.BoolValue" => wkt("Bool", "boolValueDecoder", "boolValueEncoder"),
        _ => return None,
    };
    Some(binding)
}

/// Classify a field by its declared type.
///
/// Fails for groups and for type numbers this generator doesn't know; both
/// abort the whole request.
pub fn classify(field: &FieldDescriptorProto) -> Result<ElmType, Error> {
    let name = field.name.as_deref().ok_or(Error::MissingName)?;
    let unsupported = || Error::UnsupportedFieldType {
        field: name.to_string(),
        kind: field.r#type.unwrap_or(0),
    };
    let kind = field.field_type().ok_or_else(unsupported)?;

    let builtin = |type_expr: &str, decoder: &str, encoder: &str, zero: &str| ElmType {
        type_expr: type_expr.to_string(),
        decoder: DecoderName::builtin(decoder),
        encoder: EncoderName::builtin(encoder),
        default: zero.to_string(),
    };

    let mut elm_type = match kind {
        Type::Int32 | Type::Uint32 | Type::Sint32 | Type::Fixed32 | Type::Sfixed32 => {
            builtin("Int", "intDecoder", "JE.int", "0")
        }
        Type::Int64 | Type::Uint64 | Type::Sint64 | Type::Fixed64 | Type::Sfixed64 => {
            builtin("Int", "intDecoder", "numericStringEncoder", "0")
        }
        Type::Float | Type::Double => builtin("Float", "JD.float", "JE.float", "0"),
        Type::Bool => builtin("Bool", "JD.bool", "JE.bool", "False"),
        Type::String => builtin("String", "JD.string", "JE.string", "\"\""),
        Type::Bytes => builtin("Bytes", "bytesFieldDecoder", "bytesFieldEncoder", "[]"),
        Type::Enum | Type::Message => {
            let type_name = field
                .type_name
                .as_deref()
                .ok_or_else(|| Error::MissingTypeName(name.to_string()))?;
            reference_type(kind, type_name)
        }
        Type::Group => return Err(unsupported()),
    };

    if field.label() == Label::Repeated {
        elm_type.default = "[]".to_string();
    } else if let Some(default) = field.default_value.as_deref().filter(|d| !d.is_empty()) {
        if let Some(explicit) = explicit_default(kind, field.type_name.as_deref(), default) {
            elm_type.default = explicit;
        }
    }

    Ok(elm_type)
}

/// Enum and message references: the well-known table first, then the type
/// generated for the referenced definition.
fn reference_type(kind: Type, type_name: &str) -> ElmType {
    if let Some(binding) = well_known_type(type_name) {
        return ElmType {
            type_expr: binding.type_expr.to_string(),
            decoder: DecoderName::builtin(binding.decoder),
            encoder: EncoderName::builtin(binding.encoder),
            default: "Nothing".to_string(),
        };
    }

    let ty = external_type(type_name);
    let default = if kind == Type::Enum {
        enum_default_name(&ty).to_string()
    } else {
        "Nothing".to_string()
    };
    ElmType {
        type_expr: ty.to_string(),
        decoder: decoder_name(&ty),
        encoder: encoder_name(&ty),
        default,
    }
}

/// Translate a proto2 `[default = ...]` literal to Elm.
///
/// Returns `None` when the zero value should be kept.
fn explicit_default(kind: Type, type_name: Option<&str>, value: &str) -> Option<String> {
    let literal = match kind {
        Type::String => format!("\"{}\"", escape_string(value)),
        Type::Bool => {
            if value.eq_ignore_ascii_case("true") {
                "True".to_string()
            } else {
                "False".to_string()
            }
        }
        Type::Float | Type::Double => match value {
            "inf" => "(1/0)".to_string(),
            "-inf" => "(-1/0)".to_string(),
            "nan" => "(0/0)".to_string(),
            _ => numeric_literal(value),
        },
        Type::Enum => {
            // The enum's own segment is last; its variants are prefixed with the rest.
            let mut path = external_path(type_name?);
            path.pop();
            variant_name(value, &path).to_string()
        }
        // protoc escapes bytes defaults C-style; the runtime has no literal for them.
        Type::Bytes | Type::Message | Type::Group => return None,
        _ => numeric_literal(value),
    };
    Some(literal)
}

fn numeric_literal(value: &str) -> String {
    if value.starts_with('-') {
        format!("({})", value)
    } else {
        value.to_string()
    }
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
