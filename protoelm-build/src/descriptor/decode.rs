//! Decoder for CodeGeneratorRequest from protobuf binary format.

use protoelm::varint::decode_varint;
use protoelm::wire::{decode_bytes, decode_key, decode_string, skip_field};

use super::*;
use crate::Error;

/// Decode a CodeGeneratorRequest from protobuf binary data.
pub fn decode_code_generator_request(data: &[u8]) -> Result<CodeGeneratorRequest, Error> {
    let mut buf = data;
    let mut req = CodeGeneratorRequest::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => req.file_to_generate.push(decode_string(&mut buf)?),
            2 => req.parameter = Some(decode_string(&mut buf)?),
            15 => {
                let msg_data = decode_bytes(&mut buf)?;
                req.proto_file.push(decode_file_descriptor_proto(msg_data)?);
            }
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(req)
}

/// Decode a FileDescriptorProto.
fn decode_file_descriptor_proto(data: &[u8]) -> Result<FileDescriptorProto, Error> {
    let mut buf = data;
    let mut fdp = FileDescriptorProto::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => fdp.name = Some(decode_string(&mut buf)?),
            2 => fdp.package = Some(decode_string(&mut buf)?),
            3 => fdp.dependency.push(decode_string(&mut buf)?),
            4 => {
                let msg_data = decode_bytes(&mut buf)?;
                fdp.message_type.push(decode_descriptor_proto(msg_data)?);
            }
            5 => {
                let msg_data = decode_bytes(&mut buf)?;
                fdp.enum_type.push(decode_enum_descriptor_proto(msg_data)?);
            }
            12 => fdp.syntax = Some(decode_string(&mut buf)?),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(fdp)
}

/// Decode a DescriptorProto (message type).
fn decode_descriptor_proto(data: &[u8]) -> Result<DescriptorProto, Error> {
    let mut buf = data;
    let mut dp = DescriptorProto::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => dp.name = Some(decode_string(&mut buf)?),
            2 => {
                let msg_data = decode_bytes(&mut buf)?;
                dp.field.push(decode_field_descriptor_proto(msg_data)?);
            }
            3 => {
                let msg_data = decode_bytes(&mut buf)?;
                dp.nested_type.push(decode_descriptor_proto(msg_data)?);
            }
            4 => {
                let msg_data = decode_bytes(&mut buf)?;
                dp.enum_type.push(decode_enum_descriptor_proto(msg_data)?);
            }
            7 => {
                let msg_data = decode_bytes(&mut buf)?;
                dp.options = Some(decode_message_options(msg_data)?);
            }
            8 => {
                let msg_data = decode_bytes(&mut buf)?;
                dp.oneof_decl.push(decode_oneof_descriptor_proto(msg_data)?);
            }
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(dp)
}

/// Decode a FieldDescriptorProto.
fn decode_field_descriptor_proto(data: &[u8]) -> Result<FieldDescriptorProto, Error> {
    let mut buf = data;
    let mut fdp = FieldDescriptorProto::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => fdp.name = Some(decode_string(&mut buf)?),
            3 => fdp.number = Some(decode_varint(&mut buf)? as i32),
            4 => fdp.label = Some(decode_varint(&mut buf)? as i32),
            5 => fdp.r#type = Some(decode_varint(&mut buf)? as i32),
            6 => fdp.type_name = Some(decode_string(&mut buf)?),
            7 => fdp.default_value = Some(decode_string(&mut buf)?),
            8 => {
                let msg_data = decode_bytes(&mut buf)?;
                fdp.options = Some(FieldOptions {
                    deprecated: decode_deprecated(msg_data, 3)?,
                });
            }
            9 => fdp.oneof_index = Some(decode_varint(&mut buf)? as i32),
            10 => fdp.json_name = Some(decode_string(&mut buf)?),
            17 => fdp.proto3_optional = Some(decode_varint(&mut buf)? != 0),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(fdp)
}

/// Decode an EnumDescriptorProto.
fn decode_enum_descriptor_proto(data: &[u8]) -> Result<EnumDescriptorProto, Error> {
    let mut buf = data;
    let mut edp = EnumDescriptorProto::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => edp.name = Some(decode_string(&mut buf)?),
            2 => {
                let msg_data = decode_bytes(&mut buf)?;
                edp.value.push(decode_enum_value_descriptor_proto(msg_data)?);
            }
            3 => {
                let msg_data = decode_bytes(&mut buf)?;
                edp.options = Some(EnumOptions {
                    deprecated: decode_deprecated(msg_data, 3)?,
                });
            }
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(edp)
}

/// Decode an EnumValueDescriptorProto.
fn decode_enum_value_descriptor_proto(data: &[u8]) -> Result<EnumValueDescriptorProto, Error> {
    let mut buf = data;
    let mut evdp = EnumValueDescriptorProto::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => evdp.name = Some(decode_string(&mut buf)?),
            2 => evdp.number = Some(decode_varint(&mut buf)? as i32),
            3 => {
                let msg_data = decode_bytes(&mut buf)?;
                evdp.options = Some(EnumValueOptions {
                    deprecated: decode_deprecated(msg_data, 1)?,
                });
            }
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(evdp)
}

/// Decode a OneofDescriptorProto.
fn decode_oneof_descriptor_proto(data: &[u8]) -> Result<OneofDescriptorProto, Error> {
    let mut buf = data;
    let mut odp = OneofDescriptorProto::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => odp.name = Some(decode_string(&mut buf)?),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(odp)
}

/// Decode MessageOptions.
fn decode_message_options(data: &[u8]) -> Result<MessageOptions, Error> {
    let mut buf = data;
    let mut mo = MessageOptions::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            3 => mo.deprecated = Some(decode_varint(&mut buf)? != 0),
            7 => mo.map_entry = Some(decode_varint(&mut buf)? != 0),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(mo)
}

/// Decode the `deprecated` flag out of an options message, skipping the rest.
///
/// Field, enum and enum value options carry nothing else the generator reads.
fn decode_deprecated(data: &[u8], deprecated_field: u32) -> Result<Option<bool>, Error> {
    let mut buf = data;
    let mut deprecated = None;

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        if field_number == deprecated_field {
            deprecated = Some(decode_varint(&mut buf)? != 0);
        } else {
            skip_field(&mut buf, wire_type)?;
        }
    }

    Ok(deprecated)
}
