//! Instruction operands and their text forms.
//!
//! Variable references keep their (frame, name) pair and are resolved
//! against the frame store at execution time, not at load time: frames
//! are created and destroyed dynamically, so late binding is required.

use std::fmt;
use std::str::FromStr;

use crate::error::OperandError;
use crate::value::Value;

/// The frame a variable reference designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Program-lifetime frame, always present.
    Global,
    /// Top of the local-frame stack.
    Local,
    /// The single optional staging frame.
    Temporary,
}

impl FrameKind {
    /// The uppercase wire prefix (GF, LF, TF).
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameKind::Global => "GF",
            FrameKind::Local => "LF",
            FrameKind::Temporary => "TF",
        }
    }
}

impl FromStr for FrameKind {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GF" => Ok(FrameKind::Global),
            "LF" => Ok(FrameKind::Local),
            "TF" => Ok(FrameKind::Temporary),
            other => Err(OperandError::BadFrame(other.to_string())),
        }
    }
}

/// A late-bound variable reference, serialized as `FRAME@name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarRef {
    pub frame: FrameKind,
    pub name: String,
}

impl VarRef {
    /// Parse the `FRAME@name` text form. The frame must be uppercase and
    /// the name must be a valid identifier.
    pub fn parse(text: &str) -> Result<Self, OperandError> {
        let (frame, name) = text
            .split_once('@')
            .ok_or_else(|| OperandError::BadVariable(text.to_string()))?;
        let frame = frame.parse()?;
        if !is_valid_name(name) {
            return Err(OperandError::BadVariable(text.to_string()));
        }
        Ok(VarRef {
            frame,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.frame.as_str(), self.name)
    }
}

/// The type operand of READ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Bool,
    String,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Bool => "bool",
            DataType::String => "string",
        }
    }
}

impl FromStr for DataType {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(DataType::Int),
            "bool" => Ok(DataType::Bool),
            "string" => Ok(DataType::String),
            other => Err(OperandError::BadType(other.to_string())),
        }
    }
}

/// One typed instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Late-bound variable reference.
    Var(VarRef),
    /// Constant with its value already decoded.
    Literal(Value),
    /// Jump/call target name.
    Label(String),
    /// Type name operand (READ).
    Type(DataType),
}

/// Identifier charset shared by variable names and labels: alphanumeric
/// plus `_ - $ & % * ! ?`, not starting with a digit.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() || !is_name_char(first) {
        return false;
    }
    chars.all(is_name_char)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?')
}

/// Validate a label token.
pub fn parse_label(text: &str) -> Result<String, OperandError> {
    if !is_valid_name(text) {
        return Err(OperandError::BadLabel(text.to_string()));
    }
    Ok(text.to_string())
}

/// Parse a decimal integer literal with optional sign.
pub fn parse_int(text: &str) -> Result<i64, OperandError> {
    // `str::parse` accepts a leading '+' or '-', which is exactly the
    // literal grammar. Reject empty text explicitly for a clearer error.
    if text.is_empty() {
        return Err(OperandError::BadInt(text.to_string()));
    }
    text.parse()
        .map_err(|_| OperandError::BadInt(text.to_string()))
}

/// Parse a bool literal: exactly `true` or `false`.
pub fn parse_bool(text: &str) -> Result<bool, OperandError> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(OperandError::BadBool(other.to_string())),
    }
}

/// Parse a nil literal: exactly `nil`.
pub fn parse_nil(text: &str) -> Result<(), OperandError> {
    if text == "nil" {
        Ok(())
    } else {
        Err(OperandError::BadNil(text.to_string()))
    }
}

/// Decode a string literal: every backslash must be followed by exactly
/// three decimal digits naming a Unicode scalar value. Anything else is a
/// lexical error; the rule is strict, so a trailing `\DD` is rejected.
pub fn decode_string(text: &str) -> Result<String, OperandError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut code = 0u32;
        for _ in 0..3 {
            let d = chars
                .next()
                .and_then(|d| d.to_digit(10))
                .ok_or_else(|| OperandError::BadEscape(text.to_string()))?;
            code = code * 10 + d;
        }
        let decoded =
            char::from_u32(code).ok_or_else(|| OperandError::BadEscape(text.to_string()))?;
        out.push(decoded);
    }
    Ok(out)
}
