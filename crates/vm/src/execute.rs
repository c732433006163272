//! The fetch-decode-execute loop and per-opcode execution rules.

use ipp_common::{DataType, Instruction, Opcode, Operand, Value, ValueError, VarRef};

use crate::error::RuntimeError;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    /// Run until fall-through past the last instruction, EXIT, or a
    /// runtime error. Returns the process exit code (0 on fall-through).
    pub fn run(&mut self) -> Result<i32, RuntimeError> {
        let program = self.program;
        while self.pc < program.len() {
            let instr = &program.instructions[self.pc];
            self.pc += 1;
            self.executed += 1;

            match instr.opcode {
                // Frames and variables
                Opcode::Move => {
                    let value = self.symb_at(instr, 1)?;
                    self.store(self.var_at(instr, 0)?, value)?;
                }
                Opcode::CreateFrame => self.frames.create_temporary(),
                Opcode::PushFrame => self.frames.push_temporary()?,
                Opcode::PopFrame => self.frames.pop_to_temporary()?,
                Opcode::DefVar => self.frames.define(self.var_at(instr, 0)?)?,

                // Control transfer
                Opcode::Call => {
                    let target = self.label_target(instr)?;
                    self.call_stack.push(self.pc);
                    self.pc = target;
                }
                Opcode::Return => {
                    self.pc = self
                        .call_stack
                        .pop()
                        .ok_or(RuntimeError::MissingCallFrame)?;
                }
                Opcode::Label => {}
                Opcode::Jump => self.pc = self.label_target(instr)?,
                Opcode::JumpIfEq => {
                    let target = self.label_target(instr)?;
                    if self.compare_eq(instr)? {
                        self.pc = target;
                    }
                }
                Opcode::JumpIfNeq => {
                    let target = self.label_target(instr)?;
                    if !self.compare_eq(instr)? {
                        self.pc = target;
                    }
                }
                Opcode::Exit => return self.exec_exit(instr),

                // Data stack
                Opcode::Pushs => {
                    let value = self.symb_at(instr, 0)?;
                    self.data_stack.push(value);
                }
                Opcode::Pops => {
                    let value = self.pop_data()?;
                    self.store(self.var_at(instr, 0)?, value)?;
                }

                // Arithmetic and comparison
                Opcode::Add => self.binary(instr, |a, b| a.add(b))?,
                Opcode::Sub => self.binary(instr, |a, b| a.sub(b))?,
                Opcode::Mul => self.binary(instr, |a, b| a.mul(b))?,
                Opcode::IDiv => self.binary(instr, |a, b| a.idiv(b))?,
                Opcode::Lt => self.binary(instr, |a, b| a.lt(b).map(Value::Bool))?,
                Opcode::Gt => self.binary(instr, |a, b| a.gt(b).map(Value::Bool))?,
                Opcode::Eq => self.binary(instr, |a, b| a.eq_value(b).map(Value::Bool))?,

                // Boolean
                Opcode::And => self.binary(instr, |a, b| a.and(b))?,
                Opcode::Or => self.binary(instr, |a, b| a.or(b))?,
                Opcode::Not => self.unary(instr, |a| a.not())?,

                // Strings and conversion
                Opcode::Int2Char => self.unary(instr, |a| a.int2char())?,
                Opcode::Stri2Int => self.binary(instr, |a, b| a.stri2int(b))?,
                Opcode::Concat => self.binary(instr, |a, b| a.concat(b))?,
                Opcode::StrLen => self.unary(instr, |a| a.strlen())?,
                Opcode::GetChar => self.binary(instr, |a, b| a.getchar(b))?,
                Opcode::SetChar => self.exec_setchar(instr)?,
                Opcode::Type => self.exec_type(instr)?,

                // I/O and debugging
                Opcode::Read => self.exec_read(instr)?,
                Opcode::Write => {
                    let value = self.symb_at(instr, 0)?;
                    // Sink failures are not machine errors.
                    let _ = write!(self.output, "{value}");
                }
                Opcode::Dprint => {
                    let value = self.symb_at(instr, 0)?;
                    let _ = write!(self.debug, "{value}");
                }
                Opcode::Break => self.exec_break(),
            }
        }
        Ok(0)
    }

    // ---- Operand access ----
    //
    // Signatures are enforced at instruction construction, so these only
    // fail for positions the dispatch never mixes up. The engine trusts
    // the loader but returns an error rather than panicking.

    fn var_at<'i>(&self, instr: &'i Instruction, i: usize) -> Result<&'i VarRef, RuntimeError> {
        instr.var(i).ok_or(RuntimeError::Value(ValueError::TypeMismatch {
            expected: "variable",
            found: "operand",
        }))
    }

    fn symb_at(&self, instr: &Instruction, i: usize) -> Result<Value, RuntimeError> {
        match instr.operand(i) {
            Some(operand @ (Operand::Var(_) | Operand::Literal(_))) => self.resolve(operand),
            _ => Err(RuntimeError::Value(ValueError::TypeMismatch {
                expected: "symbol",
                found: "operand",
            })),
        }
    }

    fn label_target(&self, instr: &Instruction) -> Result<usize, RuntimeError> {
        // Targets are verified at load time; a miss here means the
        // program was not built through `Program::new`.
        instr
            .label(0)
            .and_then(|name| self.program.label_target(name))
            .ok_or(RuntimeError::Value(ValueError::TypeMismatch {
                expected: "label",
                found: "operand",
            }))
    }

    // ---- Execution rules ----

    /// var ← op(symb1): applies a pure unary rule and writes the result.
    fn unary(
        &mut self,
        instr: &Instruction,
        op: fn(&Value) -> Result<Value, ValueError>,
    ) -> Result<(), RuntimeError> {
        let a = self.symb_at(instr, 1)?;
        let result = op(&a)?;
        self.store(self.var_at(instr, 0)?, result)
    }

    /// var ← op(symb1, symb2): applies a pure binary rule and writes the
    /// result.
    fn binary(
        &mut self,
        instr: &Instruction,
        op: fn(&Value, &Value) -> Result<Value, ValueError>,
    ) -> Result<(), RuntimeError> {
        let a = self.symb_at(instr, 1)?;
        let b = self.symb_at(instr, 2)?;
        let result = op(&a, &b)?;
        self.store(self.var_at(instr, 0)?, result)
    }

    fn compare_eq(&self, instr: &Instruction) -> Result<bool, RuntimeError> {
        let a = self.symb_at(instr, 1)?;
        let b = self.symb_at(instr, 2)?;
        Ok(a.eq_value(&b)?)
    }

    fn exec_exit(&mut self, instr: &Instruction) -> Result<i32, RuntimeError> {
        let value = self.symb_at(instr, 0)?;
        match value {
            Value::Int(code @ 0..=49) => Ok(code as i32),
            Value::Int(out_of_range) => Err(RuntimeError::InvalidExitValue {
                value: out_of_range.to_string(),
            }),
            other => Err(RuntimeError::InvalidExitValue {
                value: other.type_name().to_string(),
            }),
        }
    }

    /// SETCHAR mutates the target variable's own string, unlike the other
    /// string rules which only read their operands.
    fn exec_setchar(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let var = self.var_at(instr, 0)?.clone();
        let index = self.symb_at(instr, 1)?;
        let replacement = self.symb_at(instr, 2)?;
        let current = self.frames.value(&var)?.clone();
        let result = current.setchar(&index, &replacement)?;
        self.store(&var, result)
    }

    /// TYPE inspects the slot without demanding a value: an uninitialized
    /// variable yields the empty string, and the slot is never mutated.
    fn exec_type(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let name = match instr.operand(1) {
            Some(Operand::Literal(value)) => value.type_name(),
            Some(Operand::Var(var)) => match self.frames.slot(var)? {
                Some(value) => value.type_name(),
                None => "",
            },
            _ => {
                return Err(RuntimeError::Value(ValueError::TypeMismatch {
                    expected: "symbol",
                    found: "operand",
                }))
            }
        };
        self.store(self.var_at(instr, 0)?, Value::String(name.to_string()))
    }

    /// READ stores Nil on end of input or failed conversion; it never
    /// errors on malformed input lines.
    fn exec_read(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let data_type = instr
            .data_type(1)
            .ok_or(RuntimeError::Value(ValueError::TypeMismatch {
                expected: "type",
                found: "operand",
            }))?;
        let value = match self.read_line() {
            None => Value::Nil,
            Some(line) => match data_type {
                DataType::Int => line
                    .trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .unwrap_or(Value::Nil),
                DataType::Bool => Value::Bool(line.trim().eq_ignore_ascii_case("true")),
                DataType::String => Value::String(line),
            },
        };
        self.store(self.var_at(instr, 0)?, value)
    }

    fn exec_break(&mut self) {
        let _ = writeln!(
            self.debug,
            "== break ==\npc: {}\nexecuted: {}\n{}\ndata stack: {} value(s)",
            self.pc,
            self.executed,
            self.frames,
            self.data_stack.len()
        );
        for value in self.data_stack.iter().rev() {
            let _ = writeln!(self.debug, "  {}@{}", value.type_name(), value);
        }
    }
}
