//! IPPcode23 loader — XML interchange form to an executable program.
//!
//! The loader is the static half of the interpreter: it checks the
//! document shape, decodes operands (including `\DDD` string escapes),
//! enforces opcode signatures, and resolves every jump target before a
//! single instruction runs. A program that loads successfully can only
//! fail dynamically.
//!
//! # Usage
//!
//! ```
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <program language="IPPcode23">
//!   <instruction order="1" opcode="WRITE">
//!     <arg1 type="int">42</arg1>
//!   </instruction>
//! </program>"#;
//! let program = ipp_loader::load(xml).unwrap();
//! assert_eq!(program.len(), 1);
//! ```

pub mod error;

pub use error::LoadError;

use ipp_common::operand::{decode_string, parse_bool, parse_int, parse_label, parse_nil};
use ipp_common::{DataType, Instruction, Opcode, Operand, Program, Value, VarRef};
use roxmltree::{Document, Node};

/// Load an XML interchange document into an execution-ready program.
pub fn load(xml: &str) -> Result<Program, LoadError> {
    let doc = Document::parse(xml).map_err(|e| LoadError::Xml(e.to_string()))?;
    let root = doc.root_element();

    if root.tag_name().name() != "program" {
        return Err(LoadError::BadRoot {
            found: root.tag_name().name().to_string(),
        });
    }
    let language = root.attribute("language").unwrap_or("");
    if !language.eq_ignore_ascii_case("IPPcode23") {
        return Err(LoadError::BadLanguage {
            found: language.to_string(),
        });
    }

    let mut instructions = Vec::new();
    for node in root.children().filter(Node::is_element) {
        instructions.push(load_instruction(node)?);
    }

    Ok(Program::new(instructions)?)
}

fn load_instruction(node: Node) -> Result<Instruction, LoadError> {
    if node.tag_name().name() != "instruction" {
        return Err(LoadError::UnexpectedElement {
            found: node.tag_name().name().to_string(),
        });
    }

    let order_text = node
        .attribute("order")
        .ok_or(LoadError::MissingAttribute {
            element: "instruction",
            attribute: "order",
        })?;
    let order: u32 = order_text
        .parse()
        .ok()
        .filter(|&o| o >= 1)
        .ok_or_else(|| LoadError::BadOrder {
            found: order_text.to_string(),
        })?;

    let opcode_name = node
        .attribute("opcode")
        .ok_or(LoadError::MissingAttribute {
            element: "instruction",
            attribute: "opcode",
        })?;
    let opcode = Opcode::from_name(opcode_name).ok_or_else(|| LoadError::UnknownOpcode {
        found: opcode_name.to_string(),
    })?;

    let operands = load_arguments(node, order)?;
    Ok(Instruction::new(order, opcode, operands)?)
}

/// Collect `<argN>` children: each position 1..=n exactly once, in any
/// document order.
fn load_arguments(node: Node, order: u32) -> Result<Vec<Operand>, LoadError> {
    let mut slots: [Option<Operand>; 3] = [None, None, None];
    let mut count = 0usize;

    for arg in node.children().filter(Node::is_element) {
        let position = match arg.tag_name().name() {
            "arg1" => 0,
            "arg2" => 1,
            "arg3" => 2,
            other => {
                return Err(LoadError::UnexpectedElement {
                    found: other.to_string(),
                })
            }
        };
        if slots[position].is_some() {
            return Err(LoadError::BadArguments { order });
        }
        slots[position] = Some(load_operand(arg)?);
        count += 1;
    }

    let mut operands = Vec::with_capacity(count);
    for slot in slots.into_iter().take(count) {
        // A gap (e.g. arg1 + arg3) leaves a None inside the first
        // `count` slots.
        operands.push(slot.ok_or(LoadError::BadArguments { order })?);
    }
    Ok(operands)
}

fn load_operand(arg: Node) -> Result<Operand, LoadError> {
    let kind = arg.attribute("type").ok_or(LoadError::MissingAttribute {
        element: "arg",
        attribute: "type",
    })?;
    let text = arg.text().unwrap_or("");

    let operand = match kind {
        // Strings keep their text verbatim; everything else tolerates
        // the whitespace pretty-printers put around element text.
        "string" => Operand::Literal(Value::String(decode_string(text)?)),
        "var" => Operand::Var(VarRef::parse(text.trim())?),
        "int" => Operand::Literal(Value::Int(parse_int(text.trim())?)),
        "bool" => Operand::Literal(Value::Bool(parse_bool(text.trim())?)),
        "nil" => {
            parse_nil(text.trim())?;
            Operand::Literal(Value::Nil)
        }
        "label" => Operand::Label(parse_label(text.trim())?),
        "type" => Operand::Type(text.trim().parse::<DataType>()?),
        other => {
            return Err(LoadError::UnknownOperandType {
                found: other.to_string(),
            })
        }
    };
    Ok(operand)
}
