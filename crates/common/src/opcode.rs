//! The fixed IPPcode23 opcode catalogue and declared operand signatures.

/// Identifies the operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Frames and variables
    Move,
    CreateFrame,
    PushFrame,
    PopFrame,
    DefVar,

    // Control transfer
    Call,
    Return,
    Label,
    Jump,
    JumpIfEq,
    JumpIfNeq,
    Exit,

    // Data stack
    Pushs,
    Pops,

    // Arithmetic and comparison
    Add,
    Sub,
    Mul,
    IDiv,
    Lt,
    Gt,
    Eq,

    // Boolean
    And,
    Or,
    Not,

    // Strings and conversion
    Int2Char,
    Stri2Int,
    Concat,
    StrLen,
    GetChar,
    SetChar,
    Type,

    // I/O and debugging
    Read,
    Write,
    Dprint,
    Break,
}

/// The kind of operand an opcode position accepts.
///
/// `Symb` accepts either a constant literal or a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Var,
    Symb,
    Label,
    Type,
}

impl OperandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperandKind::Var => "variable",
            OperandKind::Symb => "symbol",
            OperandKind::Label => "label",
            OperandKind::Type => "type",
        }
    }
}

use OperandKind::{Label as L, Symb as S, Type as T, Var as V};

impl Opcode {
    /// Canonical uppercase mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Move => "MOVE",
            Opcode::CreateFrame => "CREATEFRAME",
            Opcode::PushFrame => "PUSHFRAME",
            Opcode::PopFrame => "POPFRAME",
            Opcode::DefVar => "DEFVAR",
            Opcode::Call => "CALL",
            Opcode::Return => "RETURN",
            Opcode::Label => "LABEL",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfEq => "JUMPIFEQ",
            Opcode::JumpIfNeq => "JUMPIFNEQ",
            Opcode::Exit => "EXIT",
            Opcode::Pushs => "PUSHS",
            Opcode::Pops => "POPS",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::IDiv => "IDIV",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Eq => "EQ",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Not => "NOT",
            Opcode::Int2Char => "INT2CHAR",
            Opcode::Stri2Int => "STRI2INT",
            Opcode::Concat => "CONCAT",
            Opcode::StrLen => "STRLEN",
            Opcode::GetChar => "GETCHAR",
            Opcode::SetChar => "SETCHAR",
            Opcode::Type => "TYPE",
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
            Opcode::Dprint => "DPRINT",
            Opcode::Break => "BREAK",
        }
    }

    /// Look up an opcode by its canonical uppercase mnemonic.
    /// Case-sensitive: `move` is not an opcode.
    pub fn from_name(name: &str) -> Option<Opcode> {
        ALL_OPCODES.iter().copied().find(|op| op.name() == name)
    }

    /// Declared operand arity and kinds, in positional order.
    pub fn signature(&self) -> &'static [OperandKind] {
        match self {
            Opcode::CreateFrame
            | Opcode::PushFrame
            | Opcode::PopFrame
            | Opcode::Return
            | Opcode::Break => &[],

            Opcode::DefVar | Opcode::Pops => &[V],

            Opcode::Pushs | Opcode::Write | Opcode::Exit | Opcode::Dprint => &[S],

            Opcode::Call | Opcode::Label | Opcode::Jump => &[L],

            Opcode::Move
            | Opcode::Int2Char
            | Opcode::StrLen
            | Opcode::Type
            | Opcode::Not => &[V, S],

            Opcode::Read => &[V, T],

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::IDiv
            | Opcode::Lt
            | Opcode::Gt
            | Opcode::Eq
            | Opcode::And
            | Opcode::Or
            | Opcode::Concat
            | Opcode::Stri2Int
            | Opcode::GetChar
            | Opcode::SetChar => &[V, S, S],

            Opcode::JumpIfEq | Opcode::JumpIfNeq => &[L, S, S],
        }
    }
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 35] = [
    Opcode::Move,
    Opcode::CreateFrame,
    Opcode::PushFrame,
    Opcode::PopFrame,
    Opcode::DefVar,
    Opcode::Call,
    Opcode::Return,
    Opcode::Label,
    Opcode::Jump,
    Opcode::JumpIfEq,
    Opcode::JumpIfNeq,
    Opcode::Exit,
    Opcode::Pushs,
    Opcode::Pops,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::IDiv,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Eq,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::Int2Char,
    Opcode::Stri2Int,
    Opcode::Concat,
    Opcode::StrLen,
    Opcode::GetChar,
    Opcode::SetChar,
    Opcode::Type,
    Opcode::Read,
    Opcode::Write,
    Opcode::Dprint,
    Opcode::Break,
];
