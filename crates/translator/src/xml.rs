//! XML emission for the interchange form.
//!
//! The document shape is fixed and shallow, so emission is direct string
//! building rather than a DOM. Only text content needs escaping; every
//! attribute value is a canonical opcode name, a type keyword, or a
//! decimal order.

use crate::parser::Line;

/// Render checked instruction lines as an interchange document. Orders
/// are assigned from the 1-based source position of each instruction.
pub(crate) fn emit(lines: &[Line]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<program language=\"IPPcode23\">\n");
    for (idx, line) in lines.iter().enumerate() {
        let order = idx + 1;
        if line.args.is_empty() {
            out.push_str(&format!(
                "  <instruction order=\"{order}\" opcode=\"{}\"/>\n",
                line.opcode
            ));
            continue;
        }
        out.push_str(&format!(
            "  <instruction order=\"{order}\" opcode=\"{}\">\n",
            line.opcode
        ));
        for (pos, arg) in line.args.iter().enumerate() {
            out.push_str(&format!(
                "    <arg{n} type=\"{}\">{}</arg{n}>\n",
                arg.kind,
                escape_text(&arg.text),
                n = pos + 1
            ));
        }
        out.push_str("  </instruction>\n");
    }
    out.push_str("</program>\n");
    out
}

/// Escape the three characters with meaning in element text.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Arg;

    fn line(opcode: &'static str, args: Vec<(&'static str, &str)>) -> Line {
        Line {
            opcode,
            args: args
                .into_iter()
                .map(|(kind, text)| Arg {
                    kind,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_program() {
        let doc = emit(&[]);
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <program language=\"IPPcode23\">\n\
             </program>\n"
        );
    }

    #[test]
    fn niladic_instruction_is_self_closing() {
        let doc = emit(&[line("CREATEFRAME", vec![])]);
        assert!(doc.contains("<instruction order=\"1\" opcode=\"CREATEFRAME\"/>"));
    }

    #[test]
    fn args_are_numbered_from_one() {
        let doc = emit(&[line("MOVE", vec![("var", "GF@x"), ("int", "5")])]);
        assert!(doc.contains("<arg1 type=\"var\">GF@x</arg1>"));
        assert!(doc.contains("<arg2 type=\"int\">5</arg2>"));
    }

    #[test]
    fn orders_follow_source_position() {
        let doc = emit(&[line("BREAK", vec![]), line("BREAK", vec![])]);
        assert!(doc.contains("order=\"1\""));
        assert!(doc.contains("order=\"2\""));
    }

    #[test]
    fn text_is_escaped() {
        let doc = emit(&[line("WRITE", vec![("string", "a<b&c>d")])]);
        assert!(doc.contains("<arg1 type=\"string\">a&lt;b&amp;c&gt;d</arg1>"));
    }

    #[test]
    fn backslash_escapes_pass_through() {
        let doc = emit(&[line("WRITE", vec![("string", "a\\032b")])]);
        assert!(doc.contains(">a\\032b<"));
    }
}
