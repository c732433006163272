//! Loader errors with their process exit codes.
//!
//! Two classes: document-structure failures (the text is not a
//! well-formed instruction list) and static semantic failures (the list
//! is well-formed but names things that do not exist or do not fit).

use ipp_common::{OperandError, ProgramError, SignatureError};
use thiserror::Error;

/// Failures while loading the XML interchange form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The text is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The root element is not `<program>`.
    #[error("unexpected root element '{found}'")]
    BadRoot { found: String },

    /// The root's `language` attribute is missing or not `IPPcode23`.
    #[error("unsupported language '{found}'")]
    BadLanguage { found: String },

    /// An element that is not `<instruction>` under the root, or not an
    /// `<argN>` under an instruction.
    #[error("unexpected element '{found}'")]
    UnexpectedElement { found: String },

    /// A required attribute is absent.
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// The `order` attribute is not a positive decimal integer.
    #[error("invalid instruction order '{found}'")]
    BadOrder { found: String },

    /// Argument elements are duplicated or not numbered 1..=n.
    #[error("instruction {order}: malformed argument list")]
    BadArguments { order: u32 },

    /// The `opcode` attribute names no instruction.
    #[error("unknown opcode '{found}'")]
    UnknownOpcode { found: String },

    /// An `argN` element has a `type` attribute outside the known set.
    #[error("unknown operand type '{found}'")]
    UnknownOperandType { found: String },

    /// An operand's text does not fit its declared type.
    #[error(transparent)]
    Operand(#[from] OperandError),

    /// The operand list does not match the opcode's signature.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Duplicate orders, duplicate labels, or unresolved jump targets.
    #[error(transparent)]
    Program(#[from] ProgramError),
}

impl LoadError {
    /// The process exit code this error maps to: 31 for a document that
    /// is not a well-formed instruction list, 32 for one that is but
    /// fails the static checks.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::Xml(_)
            | LoadError::BadRoot { .. }
            | LoadError::UnexpectedElement { .. }
            | LoadError::MissingAttribute { .. }
            | LoadError::BadOrder { .. }
            | LoadError::BadArguments { .. }
            | LoadError::Program(ProgramError::DuplicateOrder(_)) => 31,

            LoadError::BadLanguage { .. }
            | LoadError::UnknownOpcode { .. }
            | LoadError::UnknownOperandType { .. }
            | LoadError::Operand(_)
            | LoadError::Signature(_)
            | LoadError::Program(_) => 32,
        }
    }
}
