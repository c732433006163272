//! Shared error types for the IPPcode23 instruction model.

use thiserror::Error;

/// Failures of the pure operand-evaluation rules.
///
/// These surface during instruction execution but are defined here because
/// the evaluation rules themselves live in [`crate::value`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// An operand had the wrong type for the operation.
    #[error("operand type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Comparison between values that do not share a comparable type.
    #[error("{op} cannot compare {lhs} with {rhs}")]
    IncomparableTypes {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// IDIV with divisor 0.
    #[error("division by zero")]
    DivisionByZero,

    /// String index outside [0, length).
    #[error("string index {index} out of range (length {length})")]
    IndexOutOfRange { index: i64, length: usize },

    /// INT2CHAR with an integer that is not a Unicode scalar value.
    #[error("{value} is not a valid character value")]
    InvalidCharacter { value: i64 },

    /// SETCHAR with an empty replacement string.
    #[error("SETCHAR replacement string is empty")]
    EmptyReplacement,
}

/// Lexical failures when parsing operand text forms.
///
/// Produced by the literal parsers in [`crate::operand`]. The translator
/// reports these as syntactic errors, the loader as static semantic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// Variable reference without a frame prefix or with a bad name.
    #[error("malformed variable reference '{0}'")]
    BadVariable(String),

    /// Frame prefix other than GF, LF, or TF.
    #[error("unknown frame '{0}'")]
    BadFrame(String),

    /// Integer literal that is not a decimal i64.
    #[error("malformed int literal '{0}'")]
    BadInt(String),

    /// Bool literal other than 'true' or 'false'.
    #[error("malformed bool literal '{0}'")]
    BadBool(String),

    /// Nil literal other than 'nil'.
    #[error("malformed nil literal '{0}'")]
    BadNil(String),

    /// Type name other than int, string, or bool.
    #[error("unknown type name '{0}'")]
    BadType(String),

    /// A backslash not followed by exactly three decimal digits, or an
    /// escape that does not denote a Unicode scalar value.
    #[error("invalid escape sequence in string literal '{0}'")]
    BadEscape(String),

    /// Empty or malformed label name.
    #[error("malformed label '{0}'")]
    BadLabel(String),
}

/// Operand list does not match an opcode's declared signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Wrong number of operands.
    #[error("{opcode} expects {expected} operand(s), found {found}")]
    WrongArity {
        opcode: &'static str,
        expected: usize,
        found: usize,
    },

    /// Operand at a position has the wrong kind.
    #[error("{opcode} operand {position} must be a {expected}")]
    WrongKind {
        opcode: &'static str,
        position: usize,
        expected: &'static str,
    },
}

/// Static failures when assembling an execution-ready program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// Two instructions share the same order attribute.
    #[error("duplicate instruction order {0}")]
    DuplicateOrder(u32),

    /// The same label is defined twice.
    #[error("label '{0}' already defined")]
    DuplicateLabel(String),

    /// A jump or call names a label that is never defined.
    #[error("undefined label '{0}'")]
    UndefinedLabel(String),
}
