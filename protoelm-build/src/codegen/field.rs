//! Field shape resolution.

use crate::context::GenerationContext;
use crate::descriptor::{FieldDescriptorProto, Label, Type};
use crate::ident::{enum_default_name, external_type, field_name};
use crate::model::{EncodeEntry, FieldNode, Shape};
use crate::Error;

use super::types::classify;

/// What a declared field turns into on the owning record.
#[derive(Debug)]
pub enum ResolvedField {
    /// A record field with its own encoder slot.
    Field { node: FieldNode, encode: EncodeEntry },
    /// A member of the oneof at this index; it becomes a variant instead.
    OneofMember(usize),
}

/// Elm types usable as `Dict` keys.
const COMPARABLE_KEY_TYPES: [&str; 3] = ["Int", "Float", "String"];

/// The positive wire number of a field.
pub fn wire_number(field: &FieldDescriptorProto) -> Result<u32, Error> {
    field
        .number
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| Error::MissingFieldNumber(field.name.clone().unwrap_or_default()))
}

/// Pick the field's shape and build its decode/encode expressions.
///
/// Precedence: map, oneof member, optional message, repeated, plain.
pub fn resolve_field(
    ctx: &GenerationContext,
    field: &FieldDescriptorProto,
) -> Result<ResolvedField, Error> {
    let raw_name = field.name.as_deref().ok_or(Error::MissingName)?;
    let number = wire_number(field)?;
    let name = field_name(raw_name);
    // The runtime array is 0-based.
    let idx = number - 1;

    let map_entry = match (field.field_type(), field.type_name.as_deref()) {
        (Some(Type::Message), Some(type_name)) => ctx.get_map_entry(type_name),
        _ => None,
    };

    let (node, encoder) = if let Some(entry) = map_entry {
        let key = classify(entry.key_field)?;
        if !COMPARABLE_KEY_TYPES.contains(&key.type_expr.as_str()) {
            return Err(Error::UnsupportedMapKey {
                field: raw_name.to_string(),
                key: key.type_expr,
            });
        }
        let value = classify(entry.value_field)?;
        let node = FieldNode {
            type_expr: format!("Dict.Dict {} {}", key.type_expr, value.type_expr),
            number: Some(number),
            default: "Dict.empty".to_string(),
            decoder: format!("mapEntries {} {} {}", idx, key.decoder, value.decoder),
            encoder: None,
            shape: Shape::Map,
            name,
        };
        let encoder = format!(
            "mapEntriesFieldEncoder {} {} v.{}",
            key.encoder, value.encoder, node.name
        );
        (node, encoder)
    } else if let Some(index) = field.real_oneof_index() {
        return Ok(ResolvedField::OneofMember(index));
    } else {
        let mut elm_type = classify(field)?;
        if let Some(fallback) = removed_enum_default(ctx, field) {
            elm_type.default = fallback;
        }
        let is_message = field.field_type() == Some(Type::Message);

        match field.label() {
            // Only singular messages get `Maybe`; scalars fall back to their default.
            Label::Optional | Label::Required if is_message => {
                let node = FieldNode {
                    type_expr: format!("Maybe {}", elm_type.type_expr),
                    number: Some(number),
                    default: "Nothing".to_string(),
                    decoder: format!("idxWithDefault {} (JD.maybe {}) Nothing", idx, elm_type.decoder),
                    encoder: None,
                    shape: Shape::Optional,
                    name,
                };
                let encoder = format!("maybeEncoder {} v.{}", elm_type.encoder, node.name);
                (node, encoder)
            }
            Label::Repeated => {
                let node = FieldNode {
                    type_expr: format!("List {}", elm_type.type_expr),
                    number: Some(number),
                    default: elm_type.default,
                    decoder: format!("idxWithDefault {} (JD.list {}) []", idx, elm_type.decoder),
                    encoder: None,
                    shape: Shape::Repeated,
                    name,
                };
                let encoder = format!("JE.list {} v.{}", elm_type.encoder, node.name);
                (node, encoder)
            }
            _ => {
                let node = FieldNode {
                    type_expr: elm_type.type_expr,
                    number: Some(number),
                    decoder: format!(
                        "idxWithDefault {} {} {}",
                        idx, elm_type.decoder, elm_type.default
                    ),
                    default: elm_type.default,
                    encoder: None,
                    shape: Shape::Scalar,
                    name,
                };
                let encoder = format!("{} v.{}", elm_type.encoder, node.name);
                (node, encoder)
            }
        }
    };

    let encode = EncodeEntry {
        number,
        expr: encoder.clone(),
    };
    Ok(ResolvedField::Field {
        node: FieldNode {
            encoder: Some(encoder),
            ..node
        },
        encode,
    })
}

/// An explicit default naming an enum value that `remove-deprecated` dropped
/// falls back to the enum's default constant.
fn removed_enum_default(ctx: &GenerationContext, field: &FieldDescriptorProto) -> Option<String> {
    if field.field_type() != Some(Type::Enum) || field.label() == Label::Repeated {
        return None;
    }
    let type_name = field.type_name.as_deref()?;
    let value = field.default_value.as_deref()?;
    ctx.is_removed_enum_value(type_name, value)
        .then(|| enum_default_name(&external_type(type_name)).to_string())
}
