//! IPPcode23 virtual machine — executes loaded instruction streams.
//!
//! The machine is a deterministic sequential state machine:
//! - a program counter over the order-sorted instruction list
//! - a call stack of return addresses
//! - a LIFO data stack of values
//! - the frame store (global frame, optional temporary frame, local-frame
//!   stack)
//!
//! # Usage
//!
//! ```
//! use ipp_common::{instruction::lit, Instruction, Opcode, Program, Value};
//! use std::io::Cursor;
//!
//! let program = Program::new(vec![
//!     Instruction::new(1, Opcode::Write, vec![lit(Value::Int(42))]).unwrap(),
//! ]).unwrap();
//!
//! let mut input = Cursor::new("");
//! let mut output = Vec::new();
//! let mut debug = Vec::new();
//! let exit = ipp_vm::run(&program, &mut input, &mut output, &mut debug).unwrap();
//! assert_eq!(exit, 0);
//! assert_eq!(output, b"42");
//! ```

pub mod error;
pub mod execute;
pub mod frame;
pub mod machine;

pub use error::RuntimeError;
pub use frame::FrameStore;
pub use machine::Machine;

use ipp_common::Program;
use std::io::{BufRead, Write};

/// Execute a program and return its exit code.
///
/// This is the primary entry point. The code is 0 for fall-through past
/// the last instruction or the value a successful EXIT named.
///
/// # Errors
///
/// Returns [`RuntimeError`] when execution aborts at an instruction; the
/// machine state up to that point is discarded and `output` carries only
/// the output produced before the failure.
pub fn run(
    program: &Program,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    debug: &mut dyn Write,
) -> Result<i32, RuntimeError> {
    let mut machine = Machine::new(program, input, output, debug);
    machine.run()
}
