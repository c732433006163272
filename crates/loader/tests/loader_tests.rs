//! End-to-end loader tests on whole documents.

use ipp_common::{Opcode, Operand, Value};
use ipp_loader::{load, LoadError};

fn wrap(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <program language=\"IPPcode23\">\n{body}\n</program>\n"
    )
}

#[test]
fn loads_a_full_program_sorted_by_order() {
    // Orders are sparse and out of document order; execution order is
    // by ascending order attribute.
    let xml = wrap(
        "<instruction order=\"30\" opcode=\"WRITE\">\
           <arg1 type=\"var\">GF@x</arg1>\
         </instruction>\
         <instruction order=\"10\" opcode=\"DEFVAR\">\
           <arg1 type=\"var\">GF@x</arg1>\
         </instruction>\
         <instruction order=\"20\" opcode=\"MOVE\">\
           <arg1 type=\"var\">GF@x</arg1>\
           <arg2 type=\"int\">5</arg2>\
         </instruction>",
    );
    let program = load(&xml).unwrap();
    let opcodes: Vec<Opcode> = program.instructions.iter().map(|i| i.opcode).collect();
    assert_eq!(opcodes, vec![Opcode::DefVar, Opcode::Move, Opcode::Write]);
    let orders: Vec<u32> = program.instructions.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![10, 20, 30]);
}

#[test]
fn empty_program_is_valid() {
    let program = load(&wrap("")).unwrap();
    assert!(program.is_empty());
}

#[test]
fn labels_resolve_across_the_whole_program() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"JUMP\">\
           <arg1 type=\"label\">end</arg1>\
         </instruction>\
         <instruction order=\"2\" opcode=\"LABEL\">\
           <arg1 type=\"label\">end</arg1>\
         </instruction>",
    );
    let program = load(&xml).unwrap();
    assert_eq!(program.label_target("end"), Some(1));
}

#[test]
fn jump_to_undefined_label_fails_before_execution() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"JUMP\">\
           <arg1 type=\"label\">missing</arg1>\
         </instruction>",
    );
    let err = load(&xml).unwrap_err();
    assert!(matches!(err, LoadError::Program(_)));
    assert_eq!(err.exit_code(), 32);
}

#[test]
fn duplicate_label_is_32() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"LABEL\">\
           <arg1 type=\"label\">here</arg1>\
         </instruction>\
         <instruction order=\"2\" opcode=\"LABEL\">\
           <arg1 type=\"label\">here</arg1>\
         </instruction>",
    );
    assert_eq!(load(&xml).unwrap_err().exit_code(), 32);
}

#[test]
fn string_escapes_decode_at_load_time() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"WRITE\">\
           <arg1 type=\"string\">new\\010line\\092and\\035hash</arg1>\
         </instruction>",
    );
    let program = load(&xml).unwrap();
    assert_eq!(
        program.instructions[0].operand(0),
        Some(&Operand::Literal(Value::String(
            "new\nline\\and#hash".into()
        )))
    );
}

#[test]
fn xml_entities_decode_before_escape_handling() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"WRITE\">\
           <arg1 type=\"string\">a&lt;b&amp;c&gt;d</arg1>\
         </instruction>",
    );
    let program = load(&xml).unwrap();
    assert_eq!(
        program.instructions[0].operand(0),
        Some(&Operand::Literal(Value::String("a<b&c>d".into())))
    );
}

#[test]
fn every_operand_kind_loads() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"DEFVAR\">\
           <arg1 type=\"var\">GF@x</arg1>\
         </instruction>\
         <instruction order=\"2\" opcode=\"READ\">\
           <arg1 type=\"var\">GF@x</arg1>\
           <arg2 type=\"type\">bool</arg2>\
         </instruction>\
         <instruction order=\"3\" opcode=\"JUMPIFEQ\">\
           <arg1 type=\"label\">end</arg1>\
           <arg2 type=\"bool\">true</arg2>\
           <arg3 type=\"nil\">nil</arg3>\
         </instruction>\
         <instruction order=\"4\" opcode=\"LABEL\">\
           <arg1 type=\"label\">end</arg1>\
         </instruction>",
    );
    assert_eq!(load(&xml).unwrap().len(), 4);
}

#[test]
fn operand_text_that_contradicts_its_type_is_32() {
    for (kind, text) in [
        ("int", "4.5"),
        ("int", ""),
        ("bool", "True"),
        ("nil", "null"),
        ("var", "GF@2bad"),
        ("var", "QF@x"),
        ("type", "nil"),
    ] {
        let xml = wrap(&format!(
            "<instruction order=\"1\" opcode=\"WRITE\">\
               <arg1 type=\"{kind}\">{text}</arg1>\
             </instruction>"
        ));
        let err = load(&xml).unwrap_err();
        assert_eq!(err.exit_code(), 32, "for {kind}@{text}");
    }
}

#[test]
fn arity_mismatch_is_32() {
    let xml = wrap(
        "<instruction order=\"1\" opcode=\"MOVE\">\
           <arg1 type=\"var\">GF@x</arg1>\
         </instruction>",
    );
    let err = load(&xml).unwrap_err();
    assert!(matches!(err, LoadError::Signature(_)));
    assert_eq!(err.exit_code(), 32);
}
