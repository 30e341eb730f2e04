//! Oneof model generation.
//!
//! A oneof becomes one holder field on the record plus a custom type with a
//! constructor per member. Each member still owns the encoder slot of its own
//! wire number; the oneof encoder emits `JE.null` in every slot except the
//! active member's.

use crate::descriptor::{DescriptorProto, FieldDescriptorProto};
use crate::ident::{decoder_name, encoder_name, field_name, type_name, unspecified_variant, variant_name};
use crate::model::{EncodeEntry, FieldNode, OneofNode, OneofVariant, Shape};
use crate::Error;

use super::field::wire_number;
use super::types::classify;

/// Build the oneofs declared by `message`, indexed like `oneof_decl`.
///
/// Synthetic oneofs, which protoc creates for proto3 `optional` fields, are
/// `None`.
pub fn collect_oneofs(
    message: &DescriptorProto,
    path: &[String],
) -> Result<Vec<Option<OneofNode>>, Error> {
    message
        .oneof_decl
        .iter()
        .enumerate()
        .map(|(index, oneof)| {
            let has_members = message
                .field
                .iter()
                .any(|f| f.real_oneof_index() == Some(index));
            if !has_members {
                return Ok(None);
            }

            let name = oneof.name.as_deref().ok_or(Error::MissingName)?;
            let ty = type_name(name, path);
            Ok(Some(OneofNode {
                field: field_name(name),
                decoder: decoder_name(&ty),
                encoder: encoder_name(&ty),
                unspecified: unspecified_variant(&ty),
                name: ty,
                variants: Vec::new(),
            }))
        })
        .collect()
}

/// Build the constructor for a oneof member.
pub fn oneof_variant(field: &FieldDescriptorProto, path: &[String]) -> Result<OneofVariant, Error> {
    let raw_name = field.name.as_deref().ok_or(Error::MissingName)?;
    let number = wire_number(field)?;
    let elm_type = classify(field)?;
    let name = variant_name(raw_name, path);

    Ok(OneofVariant {
        decoder: format!(
            "JD.map {} (JD.index {} (failOnNull {}))",
            name,
            number - 1,
            elm_type.decoder
        ),
        encoder: format!("if idx == {} then {} x else JE.null", number, elm_type.encoder),
        type_expr: elm_type.type_expr,
        name,
        number,
    })
}

/// The encoder call a member contributes at its own slot.
pub fn variant_encode_entry(oneof: &OneofNode, variant: &OneofVariant) -> EncodeEntry {
    EncodeEntry {
        number: variant.number,
        expr: format!("{} {} v.{}", oneof.encoder, variant.number, oneof.field),
    }
}

/// The record field holding the active member. Absent members decode to the
/// `Unspecified` constructor.
pub fn holder_field(oneof: &OneofNode) -> FieldNode {
    FieldNode {
        name: oneof.field.clone(),
        type_expr: oneof.name.to_string(),
        number: None,
        default: oneof.unspecified.to_string(),
        decoder: format!("custom {}", oneof.decoder),
        encoder: None,
        shape: Shape::Oneof,
    }
}
