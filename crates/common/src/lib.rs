//! IPPcode23 shared instruction model.
//!
//! This crate provides the foundational data structures shared by the
//! translator, the loader, and the virtual machine:
//!
//! - [`Value`] — tagged runtime value with the pure evaluation rules
//! - [`Opcode`] — the fixed 35-opcode catalogue with declared signatures
//! - [`Operand`] / [`VarRef`] — typed operands and `FRAME@name` references
//! - [`Instruction`] — signature-checked instruction record
//! - [`Program`] — order-sorted instruction stream with resolved labels
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::{OperandError, ProgramError, SignatureError, ValueError};
pub use instruction::Instruction;
pub use opcode::{Opcode, OperandKind};
pub use operand::{DataType, FrameKind, Operand, VarRef};
pub use program::Program;
pub use value::Value;
