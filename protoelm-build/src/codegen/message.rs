//! Message model generation.

use log::debug;

use crate::context::GenerationContext;
use crate::descriptor::DescriptorProto;
use crate::ident::{decoder_name, default_record_name, encoder_name, path_segment, type_name};
use crate::model::MessageNode;
use crate::Error;

use super::align::plan;
use super::enumeration::generate_enums;
use super::field::{resolve_field, ResolvedField};
use super::oneof::{collect_oneofs, holder_field, oneof_variant, variant_encode_entry};

/// Build the messages declared at one nesting level.
///
/// Map entry messages are consumed by their map fields and deprecated
/// messages are dropped when configured to.
pub fn generate_messages(
    ctx: &GenerationContext,
    path: &[String],
    messages: &[DescriptorProto],
) -> Result<Vec<MessageNode>, Error> {
    let mut nodes = Vec::with_capacity(messages.len());
    for message in messages {
        if message.is_map_entry() {
            continue;
        }
        if ctx.config.skips(message.is_deprecated()) {
            debug!("Skipping deprecated message {:?}", message.name);
            continue;
        }
        nodes.push(generate_message(ctx, path, message)?);
    }
    Ok(nodes)
}

/// Build one message and, depth first, everything nested inside it.
pub fn generate_message(
    ctx: &GenerationContext,
    path: &[String],
    message: &DescriptorProto,
) -> Result<MessageNode, Error> {
    let name = message.name.as_deref().ok_or(Error::MissingName)?;
    let ty = type_name(name, path);
    debug!("Generating message {}", ty);

    let mut nested_path = path.to_vec();
    nested_path.push(path_segment(name));

    let mut oneofs = collect_oneofs(message, &nested_path)?;
    let mut fields = Vec::with_capacity(message.field.len());
    let mut encode_entries = Vec::with_capacity(message.field.len());

    for field in &message.field {
        if ctx.config.skips(field.is_deprecated()) {
            continue;
        }

        match resolve_field(ctx, field)? {
            ResolvedField::Field { node, encode } => {
                fields.push(node);
                encode_entries.push(encode);
            }
            ResolvedField::OneofMember(index) => {
                let field_name = field.name.clone().unwrap_or_default();
                let oneof = oneofs
                    .get_mut(index)
                    .and_then(Option::as_mut)
                    .ok_or(Error::InvalidOneofIndex {
                        field: field_name,
                        index,
                    })?;
                let variant = oneof_variant(field, &nested_path)?;
                encode_entries.push(variant_encode_entry(oneof, &variant));
                oneof.variants.push(variant);
            }
        }
    }

    let oneofs: Vec<_> = oneofs.into_iter().flatten().collect();
    fields.extend(oneofs.iter().map(holder_field));

    Ok(MessageNode {
        default_name: default_record_name(&ty),
        decoder: decoder_name(&ty),
        encoder: encoder_name(&ty),
        name: ty,
        fields,
        encode_plan: plan(encode_entries),
        oneofs,
        enums: generate_enums(ctx.config, &nested_path, &message.enum_type)?,
        messages: generate_messages(ctx, &nested_path, &message.nested_type)?,
        path: nested_path,
    })
}
