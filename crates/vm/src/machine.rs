//! Machine state: program counter, call stack, data stack, frame store.

use std::io::{BufRead, Write};

use ipp_common::{Operand, Program, Value, VarRef};

use crate::error::RuntimeError;
use crate::frame::FrameStore;

/// The IPPcode23 machine.
///
/// Owns the whole mutable machine state and drives the
/// fetch-decode-execute loop. Single-threaded and fully synchronous: one
/// instruction completes entirely before the next begins. The only
/// external interaction is line-oriented reading from `input` and writing
/// to `output` (program output) and `debug` (DPRINT/BREAK).
pub struct Machine<'a> {
    pub(crate) program: &'a Program,
    pub(crate) pc: usize,
    pub(crate) call_stack: Vec<usize>,
    pub(crate) data_stack: Vec<Value>,
    pub(crate) frames: FrameStore,
    pub(crate) input: &'a mut dyn BufRead,
    pub(crate) output: &'a mut dyn Write,
    pub(crate) debug: &'a mut dyn Write,
    /// Instructions executed so far, reported by BREAK.
    pub(crate) executed: u64,
}

impl<'a> Machine<'a> {
    /// Create a machine in its initial state: pc 0, empty stacks, only
    /// the global frame present.
    pub fn new(
        program: &'a Program,
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        debug: &'a mut dyn Write,
    ) -> Self {
        Self {
            program,
            pc: 0,
            call_stack: Vec::new(),
            data_stack: Vec::new(),
            frames: FrameStore::new(),
            input,
            output,
            debug,
            executed: 0,
        }
    }

    /// Resolve a symbol operand to a concrete value: literals directly,
    /// variable references through the frame store.
    pub(crate) fn resolve(&self, operand: &Operand) -> Result<Value, RuntimeError> {
        match operand {
            Operand::Literal(value) => Ok(value.clone()),
            Operand::Var(var) => self.frames.value(var).cloned(),
            // Labels and types never reach a symbol position: signatures
            // are enforced at instruction construction.
            Operand::Label(_) | Operand::Type(_) => {
                Err(RuntimeError::Value(ipp_common::ValueError::TypeMismatch {
                    expected: "symbol",
                    found: "operand",
                }))
            }
        }
    }

    /// Pop the data stack.
    pub(crate) fn pop_data(&mut self) -> Result<Value, RuntimeError> {
        self.data_stack.pop().ok_or(RuntimeError::MissingStackValue)
    }

    /// Write a value into a variable slot.
    pub(crate) fn store(&mut self, var: &VarRef, value: Value) -> Result<(), RuntimeError> {
        self.frames.write(var, value)
    }

    /// Read one line from the program input, without the trailing newline.
    /// Returns `None` at end of input.
    pub(crate) fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }
}
