//! IPPcode23 interpreter front end.
//!
//! Loads the XML interchange form from `--source FILE` and feeds the
//! program's READ instructions from `--input FILE`. At least one of the
//! two must be a file; the other falls back to standard input.
//!
//! Exit codes:
//! - 0-49: the interpreted program's own exit code
//! - 10: bad command line
//! - 11: cannot open a file
//! - 31/32: document-structure / static semantic load failure
//! - 52-58: runtime error of the interpreted program

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::process;

use ipp_cli::Options;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match Options::parse(&args, true) {
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

    // Standard input can stand in for the source or the program input,
    // not both.
    if opts.source.is_none() && opts.input.is_none() {
        eprintln!("error: at least one of --source and --input is required");
        print_usage();
        return 10;
    }

    let xml = match read_source(opts.source.as_deref()) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let program = match ipp_loader::load(&xml) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {e}");
            return e.exit_code();
        }
    };

    let mut input: Box<dyn BufRead> = match opts.input.as_deref() {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("error: cannot open '{path}': {e}");
                return 11;
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut output = io::stdout();
    let mut debug = io::stderr();
    match ipp_vm::run(&program, &mut input, &mut output, &mut debug) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("runtime error: {e}");
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
            io::stdin().read_to_string(&mut text).map_err(|e| {
                eprintln!("error: cannot read standard input: {e}");
                11
            })?;
            Ok(text)
        }
    }
}

fn print_usage() {
    eprintln!("Usage: ipp-interpret [--source FILE] [--input FILE]");
    eprintln!();
    eprintln!("Executes an IPPcode23 program from its XML form. At least one");
    eprintln!("of --source and --input must be given; the other is read from");
    eprintln!("standard input.");
}
