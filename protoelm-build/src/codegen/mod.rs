//! Model generation from protobuf descriptors.

mod align;
mod enumeration;
mod field;
mod message;
mod oneof;
mod types;

use log::{debug, info};

use crate::config::Config;
use crate::context::GenerationContext;
use crate::descriptor::FileDescriptorProto;
use crate::ident::upper_first;
use crate::model::FileModel;
use crate::Error;

use enumeration::generate_enums;
use message::generate_messages;

/// Build the model of every non-excluded file.
///
/// Either every file succeeds or the first error is returned.
pub fn compile(config: &Config, files: &[FileDescriptorProto]) -> Result<Vec<FileModel>, Error> {
    let mut models = Vec::with_capacity(files.len());
    for file in files {
        let name = file.name.as_deref().ok_or(Error::MissingName)?;
        if config.is_excluded(name) {
            debug!("Skipping excluded file {}", name);
            continue;
        }
        info!("Processing file {}", name);
        models.push(build_file(config, file, files)?);
    }
    Ok(models)
}

/// Build the model of one file on its own.
///
/// References into other files are resolved by name only, so an enum default
/// naming a value deprecated in another file is not detected here; use
/// [`compile`] for that.
pub fn generate_file(config: &Config, file: &FileDescriptorProto) -> Result<FileModel, Error> {
    build_file(config, file, &[])
}

fn build_file(
    config: &Config,
    file: &FileDescriptorProto,
    request_files: &[FileDescriptorProto],
) -> Result<FileModel, Error> {
    let source_file = file.name.as_deref().ok_or(Error::MissingName)?;
    let ctx = GenerationContext::new(config, file)?.with_request_files(request_files);

    Ok(FileModel {
        source_file: source_file.to_string(),
        module_name: module_name(&config.module_prefix, source_file),
        output_name: output_name(source_file),
        uses_dict: ctx.has_map_entries(),
        imports: imports(config, &file.dependency),
        enums: generate_enums(config, &[], &file.enum_type)?,
        messages: generate_messages(&ctx, &[], &file.message_type)?,
    })
}

/// Module name for a proto path: `foo/bar_baz.proto` with prefix `App`
/// becomes `App.Foo.Bar_baz`.
pub fn module_name(prefix: &str, proto_path: &str) -> String {
    prefix
        .split('.')
        .chain(proto_path.trim_end_matches(".proto").split('/'))
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect::<Vec<_>>()
        .join(".")
}

/// Output path for a proto path: `foo/bar.proto` becomes `Foo/Bar.elm`.
pub fn output_name(proto_path: &str) -> String {
    let segments: Vec<_> = proto_path
        .trim_end_matches(".proto")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect();
    format!("{}.elm", segments.join("/"))
}

fn imports(config: &Config, dependencies: &[String]) -> Vec<String> {
    dependencies
        .iter()
        .filter(|dep| !config.is_excluded(dep))
        .map(|dep| module_name(&config.module_prefix, dep))
        .collect()
}
