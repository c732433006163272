//! IPPcode23 source checker and XML producer.
//!
//! Reads source text from `--source FILE` or standard input and writes
//! the XML interchange form to standard output.
//!
//! Exit codes:
//! - 0: success
//! - 10: bad command line
//! - 11: cannot open the source file
//! - 21: missing or malformed header
//! - 22: unknown opcode
//! - 23: other lexical or syntactic error

use std::fs;
use std::io::Read;
use std::process;

use ipp_cli::Options;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match Options::parse(&args, false) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("error: {msg}");
            print_usage();
            return 10;
        }
    };

    if opts.help {
        print_usage();
        return 0;
    }

    let source = match read_source(opts.source.as_deref()) {
        Ok(text) => text,
        Err(code) => return code,
    };

    match ipp_translator::translate(&source) {
        Ok(xml) => {
            print!("{xml}");
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn read_source(path: Option<&str>) -> Result<String, i32> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: cannot read '{path}': {e}");
            11
        }),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map_err(|e| {
                eprintln!("error: cannot read standard input: {e}");
                11
            })?;
            Ok(text)
        }
    }
}

fn print_usage() {
    eprintln!("Usage: ipp-parse [--source FILE]");
    eprintln!();
    eprintln!("Checks IPPcode23 source text and writes its XML form to stdout.");
    eprintln!("Without --source the source is read from standard input.");
}
