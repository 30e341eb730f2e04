//! The protoc plugin protocol: request bytes in, response bytes out.

use log::{error, info};

use crate::codegen;
use crate::descriptor::{
    decode_code_generator_request, encode_code_generator_response, feature, CodeGeneratorRequest,
    CodeGeneratorResponse, GeneratedFile,
};
use crate::render::render_file;
use crate::{Config, Error};

/// Generate one Elm module per proto file in the request.
///
/// Any failure aborts the whole request; no partial set of files is returned.
pub fn generate(request: &CodeGeneratorRequest) -> Result<Vec<GeneratedFile>, Error> {
    let config = Config::from_parameter(request.parameter.as_deref())?;
    if config.is_debug() {
        info!("input: {:#?}", request);
    }

    let models = codegen::compile(&config, &request.proto_file)?;
    Ok(models
        .iter()
        .map(|model| GeneratedFile {
            name: model.output_name.clone(),
            content: render_file(model),
        })
        .collect())
}

/// Run the plugin over an encoded `CodeGeneratorRequest`.
///
/// Generation failures are reported to protoc through the response's error
/// field. Only failing to write the response itself is returned as `Err`.
pub fn execute(input: &[u8]) -> Result<Vec<u8>, Error> {
    let result =
        decode_code_generator_request(input).and_then(|request| generate(&request));

    let response = match result {
        Ok(file) => CodeGeneratorResponse {
            error: None,
            supported_features: feature::PROTO3_OPTIONAL,
            file,
        },
        Err(err) => {
            error!("{}", err);
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features: feature::PROTO3_OPTIONAL,
                file: Vec::new(),
            }
        }
    };

    encode_code_generator_response(&response)
}
