//! Per-line syntactic analysis: mnemonic lookup and operand checking.

use ipp_common::operand::{decode_string, parse_bool, parse_int, parse_label, parse_nil};
use ipp_common::{DataType, Opcode, OperandKind, VarRef};

use crate::error::ParseError;

/// One checked operand, carrying the XML `type` attribute and the element
/// text. String escapes stay in their `\DDD` form; the loader decodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arg {
    pub(crate) kind: &'static str,
    pub(crate) text: String,
}

/// One checked instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) opcode: &'static str,
    pub(crate) args: Vec<Arg>,
}

/// Check one tokenized instruction line against the opcode catalogue.
///
/// Mnemonics are case-insensitive; the canonical uppercase form is what
/// gets emitted. Operand tokens are fully validated here so that a
/// malformed program never reaches the XML form.
pub(crate) fn parse_line(tokens: &[&str], line_num: usize) -> Result<Line, ParseError> {
    let mnemonic = tokens[0];
    let opcode =
        Opcode::from_name(&mnemonic.to_uppercase()).ok_or_else(|| ParseError::UnknownOpcode {
            line: line_num,
            mnemonic: mnemonic.to_string(),
        })?;

    let signature = opcode.signature();
    let operands = &tokens[1..];
    if operands.len() != signature.len() {
        return Err(ParseError::WrongArity {
            line: line_num,
            opcode: opcode.name(),
            expected: signature.len(),
            found: operands.len(),
        });
    }

    let mut args = Vec::with_capacity(operands.len());
    for (&kind, &token) in signature.iter().zip(operands) {
        args.push(parse_operand(kind, token, line_num)?);
    }

    Ok(Line {
        opcode: opcode.name(),
        args,
    })
}

fn parse_operand(kind: OperandKind, token: &str, line_num: usize) -> Result<Arg, ParseError> {
    let literal_err = |source| ParseError::BadLiteral {
        line: line_num,
        source,
    };

    match kind {
        OperandKind::Var => {
            VarRef::parse(token).map_err(literal_err)?;
            Ok(Arg {
                kind: "var",
                text: token.to_string(),
            })
        }
        OperandKind::Symb => parse_symbol(token, line_num),
        OperandKind::Label => {
            let name = parse_label(token).map_err(literal_err)?;
            Ok(Arg {
                kind: "label",
                text: name,
            })
        }
        OperandKind::Type => {
            let data_type: DataType = token.parse().map_err(literal_err)?;
            Ok(Arg {
                kind: "type",
                text: data_type.as_str().to_string(),
            })
        }
    }
}

/// A symbol is a variable reference or a `type@value` constant.
fn parse_symbol(token: &str, line_num: usize) -> Result<Arg, ParseError> {
    let literal_err = |source| ParseError::BadLiteral {
        line: line_num,
        source,
    };

    if token.starts_with("GF@") || token.starts_with("LF@") || token.starts_with("TF@") {
        VarRef::parse(token).map_err(literal_err)?;
        return Ok(Arg {
            kind: "var",
            text: token.to_string(),
        });
    }

    let Some((prefix, value)) = token.split_once('@') else {
        return Err(ParseError::BadOperand {
            line: line_num,
            token: token.to_string(),
            expected: "symbol",
        });
    };

    let kind = match prefix {
        "int" => {
            parse_int(value).map_err(literal_err)?;
            "int"
        }
        "bool" => {
            parse_bool(value).map_err(literal_err)?;
            "bool"
        }
        "string" => {
            // Validate escapes now; the raw form travels through the XML.
            decode_string(value).map_err(literal_err)?;
            "string"
        }
        "nil" => {
            parse_nil(value).map_err(literal_err)?;
            "nil"
        }
        _ => {
            return Err(ParseError::BadOperand {
                line: line_num,
                token: token.to_string(),
                expected: "symbol",
            })
        }
    };

    Ok(Arg {
        kind,
        text: value.to_string(),
    })
}
