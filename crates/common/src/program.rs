//! Execution-ready program: order-sorted instructions plus a label table.

use std::collections::HashMap;

use crate::error::ProgramError;
use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// An IPPcode23 program, sorted by instruction order, with every label
/// resolved to an instruction index at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream, sorted by `order`.
    pub instructions: Vec<Instruction>,
    labels: HashMap<String, usize>,
}

impl Program {
    /// Build a program from unordered instructions.
    ///
    /// Sorts by `order`, rejects duplicate orders and duplicate labels,
    /// and checks that every jump and call target is defined. All of this
    /// happens before any instruction can execute.
    pub fn new(mut instructions: Vec<Instruction>) -> Result<Self, ProgramError> {
        instructions.sort_by_key(|i| i.order);
        for pair in instructions.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(ProgramError::DuplicateOrder(pair[0].order));
            }
        }

        let mut labels = HashMap::new();
        for (index, instr) in instructions.iter().enumerate() {
            if instr.opcode == Opcode::Label {
                // LABEL's single operand is a label by construction.
                if let Some(name) = instr.label(0) {
                    if labels.insert(name.to_string(), index).is_some() {
                        return Err(ProgramError::DuplicateLabel(name.to_string()));
                    }
                }
            }
        }

        for instr in &instructions {
            let target = match instr.opcode {
                Opcode::Jump | Opcode::Call | Opcode::JumpIfEq | Opcode::JumpIfNeq => {
                    instr.label(0)
                }
                _ => None,
            };
            if let Some(name) = target {
                if !labels.contains_key(name) {
                    return Err(ProgramError::UndefinedLabel(name.to_string()));
                }
            }
        }

        Ok(Self {
            instructions,
            labels,
        })
    }

    /// Instruction index of a label. Targets of jumps and calls are known
    /// to exist after construction.
    pub fn label_target(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Operand;

    fn label_instr(order: u32, name: &str) -> Instruction {
        Instruction::new(order, Opcode::Label, vec![Operand::Label(name.into())]).unwrap()
    }

    fn jump_instr(order: u32, name: &str) -> Instruction {
        Instruction::new(order, Opcode::Jump, vec![Operand::Label(name.into())]).unwrap()
    }

    fn plain(order: u32) -> Instruction {
        Instruction::new(order, Opcode::CreateFrame, vec![]).unwrap()
    }

    #[test]
    fn empty_program() {
        let p = Program::new(vec![]).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn sorts_by_order() {
        let p = Program::new(vec![plain(30), plain(10), plain(20)]).unwrap();
        let orders: Vec<u32> = p.instructions.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![10, 20, 30]);
    }

    #[test]
    fn duplicate_order_rejected() {
        let err = Program::new(vec![plain(1), plain(1)]).unwrap_err();
        assert_eq!(err, ProgramError::DuplicateOrder(1));
    }

    #[test]
    fn labels_resolve_to_sorted_indices() {
        let p = Program::new(vec![label_instr(5, "end"), plain(1), plain(2)]).unwrap();
        assert_eq!(p.label_target("end"), Some(2));
        assert_eq!(p.label_target("missing"), None);
    }

    #[test]
    fn duplicate_label_rejected() {
        let err =
            Program::new(vec![label_instr(1, "a"), label_instr(2, "a")]).unwrap_err();
        assert_eq!(err, ProgramError::DuplicateLabel("a".into()));
    }

    #[test]
    fn undefined_jump_target_rejected() {
        let err = Program::new(vec![jump_instr(1, "nowhere")]).unwrap_err();
        assert_eq!(err, ProgramError::UndefinedLabel("nowhere".into()));
    }

    #[test]
    fn undefined_call_target_rejected() {
        let call = Instruction::new(1, Opcode::Call, vec![Operand::Label("f".into())])
            .unwrap();
        assert_eq!(
            Program::new(vec![call]).unwrap_err(),
            ProgramError::UndefinedLabel("f".into())
        );
    }

    #[test]
    fn conditional_jump_target_checked() {
        use crate::instruction::lit;
        use crate::value::Value;
        let jie = Instruction::new(
            1,
            Opcode::JumpIfEq,
            vec![
                Operand::Label("t".into()),
                lit(Value::Int(1)),
                lit(Value::Int(1)),
            ],
        )
        .unwrap();
        assert_eq!(
            Program::new(vec![jie]).unwrap_err(),
            ProgramError::UndefinedLabel("t".into())
        );
    }

    #[test]
    fn forward_and_backward_targets_both_resolve() {
        let p = Program::new(vec![
            jump_instr(1, "fwd"),
            label_instr(2, "back"),
            jump_instr(3, "back"),
            label_instr(4, "fwd"),
        ])
        .unwrap();
        assert_eq!(p.label_target("fwd"), Some(3));
        assert_eq!(p.label_target("back"), Some(1));
    }
}
