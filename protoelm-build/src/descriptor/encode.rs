//! Encoder for CodeGeneratorResponse into protobuf binary format.

use protoelm::wire::{encode_bytes_field, encode_string_field, encode_uint64_field};

use super::{CodeGeneratorResponse, GeneratedFile};
use crate::Error;

/// Encode a CodeGeneratorResponse.
pub fn encode_code_generator_response(resp: &CodeGeneratorResponse) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();

    if let Some(error) = &resp.error {
        encode_string_field(1, error, &mut out)?;
    }
    if resp.supported_features != 0 {
        encode_uint64_field(2, resp.supported_features, &mut out)?;
    }
    for file in &resp.file {
        let file_bytes = encode_generated_file(file)?;
        encode_bytes_field(15, &file_bytes, &mut out)?;
    }

    Ok(out)
}

fn encode_generated_file(file: &GeneratedFile) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    encode_string_field(1, &file.name, &mut out)?;
    encode_string_field(15, &file.content, &mut out)?;
    Ok(out)
}
