use std::io::{self, Read, Write};
use std::process::ExitCode;

use log::error;

const USAGE: &str = "\
Usage: protoc --plugin=protoc-gen-elm --elm_out=[PARAMETERS:]OUT_DIR FILE.proto...

Parameters (comma separated):
    remove-deprecated     omit deprecated messages, fields, enums and values
    debug                 log the decoded request to stderr
    module-prefix=NAME    prepend NAME to every generated module name
    exclude=PATH          skip PATH, both as output and as an import
";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() == 2 {
        match args[1].as_str() {
            "--version" => {
                println!("protoc-gen-elm {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            "--help" => {
                print!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), protoelm_build::Error> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let output = protoelm_build::execute(&input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}
