//! `protoelm-build` compiles protobuf schemas into Elm modules: a type per
//! message and enum, plus port decoders and encoders that read and write
//! protobuf.js's JSON array representation.
//!
//! The crate is normally used through the `protoc-gen-elm` binary:
//!
//! ```text
//! protoc --plugin=protoc-gen-elm --elm_out=module-prefix=Api:src/ shop/cart.proto
//! ```
//!
//! # Parameters
//!
//! The generator parameter is a comma separated list of:
//!
//! - `remove-deprecated`: omit deprecated messages, fields, enums and values.
//! - `debug`: log the decoded request to stderr.
//! - `module-prefix=<Name>`: prepend a dotted namespace to every module name.
//! - `exclude=<path.proto>`: skip a file, both as output and as an import.
//!
//! # Library usage
//!
//! ```rust,no_run
//! fn main() -> Result<(), protoelm_build::Error> {
//!     let request = std::fs::read("request.bin")?;
//!     let response = protoelm_build::execute(&request)?;
//!     std::fs::write("response.bin", response)?;
//!     Ok(())
//! }
//! ```
//!
//! Models can also be built and rendered directly:
//!
//! ```rust,no_run
//! # fn files() -> Vec<protoelm_build::descriptor::FileDescriptorProto> { Vec::new() }
//! fn main() -> Result<(), protoelm_build::Error> {
//!     let mut config = protoelm_build::Config::new();
//!     config.module_prefix("Api").remove_deprecated(true);
//!     for model in protoelm_build::compile(&config, &files())? {
//!         println!("{}", protoelm_build::render_file(&model));
//!     }
//!     Ok(())
//! }
//! ```

mod codegen;
mod config;
mod context;
pub mod descriptor;
mod error;
pub mod ident;
pub mod model;
mod plugin;
mod render;

pub use codegen::{compile, generate_file};
pub use config::Config;
pub use error::Error;
pub use plugin::{execute, generate};
pub use render::render_file;
