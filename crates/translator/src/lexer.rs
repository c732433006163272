//! Tokenizer for IPPcode23 source text.

/// Split one source line into tokens.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `#` and extend to end of line; tokens are
/// whitespace-separated words.
pub(crate) fn tokenize_line(line: &str) -> Vec<&str> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line() {
        assert_eq!(tokenize_line(""), Vec::<&str>::new());
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize_line("   \t  "), Vec::<&str>::new());
    }

    #[test]
    fn comment_only() {
        assert_eq!(tokenize_line("# just a comment"), Vec::<&str>::new());
    }

    #[test]
    fn simple_instruction() {
        assert_eq!(
            tokenize_line("MOVE GF@x int@5"),
            vec!["MOVE", "GF@x", "int@5"]
        );
    }

    #[test]
    fn trailing_comment_stripped() {
        assert_eq!(
            tokenize_line("WRITE GF@x # print it"),
            vec!["WRITE", "GF@x"]
        );
    }

    #[test]
    fn comment_glued_to_token() {
        assert_eq!(tokenize_line("BREAK#note"), vec!["BREAK"]);
    }

    #[test]
    fn tabs_and_runs_of_spaces() {
        assert_eq!(
            tokenize_line("\tADD\t GF@a   GF@a  int@1"),
            vec!["ADD", "GF@a", "GF@a", "int@1"]
        );
    }
}
