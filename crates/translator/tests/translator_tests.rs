//! End-to-end translator tests on whole source programs.

use ipp_translator::{translate, ParseError};

#[test]
fn full_program_shape() {
    let source = "\
.IPPcode23
DEFVAR GF@counter        # loop counter
MOVE GF@counter int@3
LABEL loop
JUMPIFEQ end GF@counter int@0
WRITE GF@counter
SUB GF@counter GF@counter int@1
JUMP loop
LABEL end
";
    let xml = translate(source).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(xml.contains("<program language=\"IPPcode23\">"));
    assert!(xml.trim_end().ends_with("</program>"));

    assert!(xml.contains("<instruction order=\"1\" opcode=\"DEFVAR\">"));
    assert!(xml.contains("<instruction order=\"8\" opcode=\"LABEL\">"));
    assert!(xml.contains("<arg1 type=\"var\">GF@counter</arg1>"));
    assert!(xml.contains("<arg1 type=\"label\">loop</arg1>"));
    assert!(xml.contains("<arg2 type=\"var\">GF@counter</arg2>"));
    assert!(xml.contains("<arg3 type=\"int\">0</arg3>"));
}

#[test]
fn mnemonics_normalize_to_uppercase() {
    let xml = translate(".IPPcode23\nmove GF@x nil@nil\n").unwrap();
    assert!(xml.contains("opcode=\"MOVE\""));
    assert!(xml.contains("<arg2 type=\"nil\">nil</arg2>"));
}

#[test]
fn all_constant_kinds() {
    let source = "\
.IPPcode23
WRITE int@-42
WRITE bool@false
WRITE string@hi
WRITE nil@nil
";
    let xml = translate(source).unwrap();
    assert!(xml.contains("<arg1 type=\"int\">-42</arg1>"));
    assert!(xml.contains("<arg1 type=\"bool\">false</arg1>"));
    assert!(xml.contains("<arg1 type=\"string\">hi</arg1>"));
    assert!(xml.contains("<arg1 type=\"nil\">nil</arg1>"));
}

#[test]
fn string_special_characters_are_xml_escaped() {
    let xml = translate(".IPPcode23\nWRITE string@x<&>y\n").unwrap();
    assert!(xml.contains("<arg1 type=\"string\">x&lt;&amp;&gt;y</arg1>"));
}

#[test]
fn string_backslash_escapes_are_validated_but_not_decoded() {
    let xml = translate(".IPPcode23\nWRITE string@a\\032b\n").unwrap();
    assert!(xml.contains(">a\\032b<"));

    let err = translate(".IPPcode23\nWRITE string@bad\\9x\n").unwrap_err();
    assert_eq!(err.exit_code(), 23);
}

#[test]
fn read_type_operand_forms() {
    let xml = translate(".IPPcode23\nREAD GF@x bool\n").unwrap();
    assert!(xml.contains("<arg2 type=\"type\">bool</arg2>"));
}

#[test]
fn missing_header_is_21() {
    assert_eq!(translate("BREAK\n").unwrap_err().exit_code(), 21);
    assert_eq!(translate("").unwrap_err().exit_code(), 21);
}

#[test]
fn unknown_opcode_is_22() {
    let err = translate(".IPPcode23\nSHUFFLE GF@x\n").unwrap_err();
    assert!(matches!(err, ParseError::UnknownOpcode { line: 2, .. }));
    assert_eq!(err.exit_code(), 22);
}

#[test]
fn operand_errors_are_23() {
    for bad in [
        ".IPPcode23\nMOVE GF@x\n",           // arity
        ".IPPcode23\nMOVE int@1 int@2\n",    // constant where var required
        ".IPPcode23\nWRITE float@1.5\n",     // unknown constant kind
        ".IPPcode23\nDEFVAR gf@x\n",         // lowercase frame
        ".IPPcode23\nWRITE int@\n",          // empty int
        ".IPPcode23\nJUMP 1st\n",            // label starts with digit
    ] {
        let err = translate(bad).unwrap_err();
        assert_eq!(err.exit_code(), 23, "for source: {bad:?}");
    }
}

#[test]
fn translation_is_deterministic() {
    let source = ".IPPcode23\nPUSHS int@1\nPOPS GF@x\n";
    assert_eq!(translate(source).unwrap(), translate(source).unwrap());
}
