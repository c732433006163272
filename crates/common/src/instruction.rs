//! The execution-ready instruction record.
//!
//! Operand count and kinds are checked against the opcode's declared
//! signature at construction, so a malformed instruction cannot exist as
//! a value. Built once at load time, immutable thereafter.

use crate::error::SignatureError;
use crate::opcode::{Opcode, OperandKind};
use crate::operand::{DataType, Operand, VarRef};
use crate::value::Value;

/// One instruction: order, opcode, and 0–3 signature-checked operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Positive integer unique across the program; defines sequencing.
    pub order: u32,
    pub opcode: Opcode,
    operands: Vec<Operand>,
}

impl Instruction {
    /// Build an instruction, rejecting arity or operand-kind mismatches.
    pub fn new(
        order: u32,
        opcode: Opcode,
        operands: Vec<Operand>,
    ) -> Result<Self, SignatureError> {
        let signature = opcode.signature();
        if operands.len() != signature.len() {
            return Err(SignatureError::WrongArity {
                opcode: opcode.name(),
                expected: signature.len(),
                found: operands.len(),
            });
        }
        for (i, (kind, operand)) in signature.iter().zip(&operands).enumerate() {
            if !kind_matches(*kind, operand) {
                return Err(SignatureError::WrongKind {
                    opcode: opcode.name(),
                    position: i + 1,
                    expected: kind.as_str(),
                });
            }
        }
        Ok(Self {
            order,
            opcode,
            operands,
        })
    }

    /// Operand at position `i` (0-based). Positions beyond the arity do
    /// not exist by construction.
    pub fn operand(&self, i: usize) -> Option<&Operand> {
        self.operands.get(i)
    }

    /// The variable reference at position `i`, if that operand is one.
    pub fn var(&self, i: usize) -> Option<&VarRef> {
        match self.operands.get(i) {
            Some(Operand::Var(v)) => Some(v),
            _ => None,
        }
    }

    /// The label at position `i`, if that operand is one.
    pub fn label(&self, i: usize) -> Option<&str> {
        match self.operands.get(i) {
            Some(Operand::Label(l)) => Some(l),
            _ => None,
        }
    }

    /// The type operand at position `i`, if that operand is one.
    pub fn data_type(&self, i: usize) -> Option<DataType> {
        match self.operands.get(i) {
            Some(Operand::Type(t)) => Some(*t),
            _ => None,
        }
    }
}

fn kind_matches(kind: OperandKind, operand: &Operand) -> bool {
    match kind {
        OperandKind::Var => matches!(operand, Operand::Var(_)),
        OperandKind::Symb => matches!(operand, Operand::Var(_) | Operand::Literal(_)),
        OperandKind::Label => matches!(operand, Operand::Label(_)),
        OperandKind::Type => matches!(operand, Operand::Type(_)),
    }
}

/// Convenience constructor for a literal operand.
pub fn lit(value: Value) -> Operand {
    Operand::Literal(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::FrameKind;

    fn gf(name: &str) -> Operand {
        Operand::Var(VarRef {
            frame: FrameKind::Global,
            name: name.to_string(),
        })
    }

    #[test]
    fn zero_operand_opcodes() {
        let i = Instruction::new(1, Opcode::CreateFrame, vec![]).unwrap();
        assert_eq!(i.opcode, Opcode::CreateFrame);
        assert_eq!(i.operand(0), None);
    }

    #[test]
    fn move_accepts_var_and_literal() {
        let i = Instruction::new(1, Opcode::Move, vec![gf("x"), lit(Value::Int(5))]).unwrap();
        assert_eq!(i.var(0).unwrap().name, "x");
        assert_eq!(i.operand(1), Some(&lit(Value::Int(5))));
    }

    #[test]
    fn symb_position_accepts_variable() {
        assert!(Instruction::new(1, Opcode::Write, vec![gf("x")]).is_ok());
        assert!(Instruction::new(1, Opcode::Move, vec![gf("x"), gf("y")]).is_ok());
    }

    #[test]
    fn wrong_arity_rejected() {
        let err = Instruction::new(1, Opcode::Move, vec![gf("x")]).unwrap_err();
        assert_eq!(
            err,
            SignatureError::WrongArity {
                opcode: "MOVE",
                expected: 2,
                found: 1,
            }
        );
        assert!(Instruction::new(1, Opcode::Return, vec![gf("x")]).is_err());
    }

    #[test]
    fn var_position_rejects_literal() {
        let err =
            Instruction::new(1, Opcode::DefVar, vec![lit(Value::Int(1))]).unwrap_err();
        assert_eq!(
            err,
            SignatureError::WrongKind {
                opcode: "DEFVAR",
                position: 1,
                expected: "variable",
            }
        );
    }

    #[test]
    fn label_position_rejects_symbol() {
        assert!(Instruction::new(1, Opcode::Jump, vec![gf("x")]).is_err());
        assert!(
            Instruction::new(1, Opcode::Jump, vec![Operand::Label("end".into())]).is_ok()
        );
    }

    #[test]
    fn read_requires_type_operand() {
        assert!(Instruction::new(1, Opcode::Read, vec![gf("x"), gf("y")]).is_err());
        assert!(Instruction::new(
            1,
            Opcode::Read,
            vec![gf("x"), Operand::Type(DataType::Int)]
        )
        .is_ok());
    }

    #[test]
    fn accessors_return_none_for_other_kinds() {
        let i = Instruction::new(1, Opcode::Jump, vec![Operand::Label("l".into())]).unwrap();
        assert_eq!(i.label(0), Some("l"));
        assert_eq!(i.var(0), None);
        assert_eq!(i.data_type(0), None);
    }
}
