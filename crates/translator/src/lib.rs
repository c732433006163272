//! IPPcode23 translator — source text to the XML interchange form.
//!
//! The translator is the first stage of the toolchain. It checks the
//! header, mnemonics, arities, and operand lexical forms, then renders
//! one `<instruction>` element per source line with orders assigned from
//! source position. It never resolves labels or types; those are the
//! loader's and the machine's concerns.
//!
//! # Usage
//!
//! ```
//! let source = ".IPPcode23\nDEFVAR GF@x\nMOVE GF@x int@5\n";
//! let xml = ipp_translator::translate(source).unwrap();
//! assert!(xml.contains("opcode=\"MOVE\""));
//! ```

pub mod error;

mod lexer;
mod parser;
mod xml;

pub use error::ParseError;

use lexer::tokenize_line;
use parser::parse_line;

/// Translate IPPcode23 source text into the XML interchange form.
///
/// Returns the first error encountered. Blank lines and comments are
/// dropped; the header may be preceded by them but not by instructions.
pub fn translate(source: &str) -> Result<String, ParseError> {
    let mut lines = Vec::new();
    let mut header_seen = false;

    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(raw);
        if tokens.is_empty() {
            continue;
        }

        if !header_seen {
            if tokens.len() != 1 || !tokens[0].eq_ignore_ascii_case(".IPPcode23") {
                return Err(ParseError::BadHeader {
                    line: line_num,
                    found: tokens.join(" "),
                });
            }
            header_seen = true;
            continue;
        }

        lines.push(parse_line(&tokens, line_num)?);
    }

    if !header_seen {
        return Err(ParseError::MissingHeader);
    }

    Ok(xml::emit(&lines))
}
