//! Runtime errors for the IPPcode23 machine.
//!
//! Every error maps to one process exit status via [`RuntimeError::exit_code`].
//! No checked condition is ever downgraded to a no-op: each either succeeds
//! or halts the whole run with its specific code.

use ipp_common::ValueError;
use thiserror::Error;

/// Errors that abort execution at the offending instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Failure of a pure operand-evaluation rule (type mismatch, division
    /// by zero, string index, invalid character value).
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Read or write of a variable never defined in its frame.
    #[error("variable '{name}' is not defined")]
    VariableNotDefined { name: String },

    /// DEFVAR for a name already present in the designated frame.
    #[error("variable '{name}' is already defined")]
    VariableRedefinition { name: String },

    /// Read of a defined but uninitialized variable slot.
    #[error("variable '{name}' has no value")]
    ValueMissing { name: String },

    /// Access to a frame that does not exist: missing temporary frame or
    /// empty local-frame stack.
    #[error("frame {frame} is not accessible")]
    FrameNotAccessible { frame: &'static str },

    /// POPS with an empty data stack.
    #[error("missing value on the data stack")]
    MissingStackValue,

    /// RETURN with an empty call stack.
    #[error("RETURN with no call in progress")]
    MissingCallFrame,

    /// EXIT whose operand is not an Int in 0..=49.
    #[error("invalid EXIT value '{value}'")]
    InvalidExitValue { value: String },
}

impl RuntimeError {
    /// The process exit status this error reports.
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::Value(e) => match e {
                ValueError::TypeMismatch { .. } | ValueError::IncomparableTypes { .. } => 52,
                ValueError::DivisionByZero => 57,
                ValueError::IndexOutOfRange { .. }
                | ValueError::InvalidCharacter { .. }
                | ValueError::EmptyReplacement => 58,
            },
            // Redefinition shares the semantic class of the interpreted
            // language rather than the access-error class.
            RuntimeError::VariableRedefinition { .. } => 52,
            RuntimeError::ValueMissing { .. } => 53,
            RuntimeError::VariableNotDefined { .. } => 54,
            RuntimeError::FrameNotAccessible { .. } => 55,
            RuntimeError::MissingStackValue | RuntimeError::MissingCallFrame => 56,
            RuntimeError::InvalidExitValue { .. } => 57,
        }
    }
}
