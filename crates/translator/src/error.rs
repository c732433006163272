//! Translator errors with their process exit codes.

use ipp_common::OperandError;
use thiserror::Error;

/// Failures while translating source text to the XML interchange form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `.IPPcode23` header before the first instruction.
    #[error("missing .IPPcode23 header")]
    MissingHeader,

    /// The first meaningful line is not the `.IPPcode23` header.
    #[error("line {line}: expected .IPPcode23 header, found '{found}'")]
    BadHeader { line: usize, found: String },

    /// A mnemonic that names no instruction.
    #[error("line {line}: unknown opcode '{mnemonic}'")]
    UnknownOpcode { line: usize, mnemonic: String },

    /// Wrong number of operands for the instruction.
    #[error("line {line}: {opcode} expects {expected} operand(s), found {found}")]
    WrongArity {
        line: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },

    /// An operand token that does not fit its declared position.
    #[error("line {line}: operand '{token}' is not a valid {expected}")]
    BadOperand {
        line: usize,
        token: String,
        expected: &'static str,
    },

    /// A malformed literal (bad frame, bad int, bad escape, ...).
    #[error("line {line}: {source}")]
    BadLiteral {
        line: usize,
        source: OperandError,
    },
}

impl ParseError {
    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseError::MissingHeader | ParseError::BadHeader { .. } => 21,
            ParseError::UnknownOpcode { .. } => 22,
            ParseError::WrongArity { .. }
            | ParseError::BadOperand { .. }
            | ParseError::BadLiteral { .. } => 23,
        }
    }
}
