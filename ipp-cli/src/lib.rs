//! Shared command-line option handling for the toolchain binaries.
//!
//! Both front ends take file flags and fall back to standard input for
//! whatever is not given. Flags come in two spellings: `--flag value`
//! and `--flag=value`.

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub help: bool,
    pub source: Option<String>,
    pub input: Option<String>,
}

impl Options {
    /// Parse raw arguments (without the program name).
    ///
    /// `accepts_input` gates the `--input` flag, which only the
    /// interpreter front end understands. `--help` must stand alone;
    /// combining it with any other argument is a usage error.
    pub fn parse(args: &[String], accepts_input: bool) -> Result<Options, String> {
        let mut opts = Options::default();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline_value) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };

            match flag {
                "--help" | "-h" => {
                    if inline_value.is_some() {
                        return Err(format!("flag '{flag}' takes no value"));
                    }
                    opts.help = true;
                }
                "--source" => {
                    let value = take_value(flag, inline_value, &mut iter)?;
                    if opts.source.replace(value).is_some() {
                        return Err("duplicate flag '--source'".to_string());
                    }
                }
                "--input" if accepts_input => {
                    let value = take_value(flag, inline_value, &mut iter)?;
                    if opts.input.replace(value).is_some() {
                        return Err("duplicate flag '--input'".to_string());
                    }
                }
                other => return Err(format!("unknown argument '{other}'")),
            }
        }

        if opts.help && (opts.source.is_some() || opts.input.is_some()) {
            return Err("'--help' cannot be combined with other flags".to_string());
        }

        Ok(opts)
    }
}

fn take_value(
    flag: &str,
    inline: Option<String>,
    iter: &mut std::slice::Iter<'_, String>,
) -> Result<String, String> {
    match inline {
        Some(value) => Ok(value),
        None => iter
            .next()
            .cloned()
            .ok_or_else(|| format!("flag '{flag}' requires a value")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_args() {
        let opts = Options::parse(&[], true).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn separate_and_inline_values() {
        let a = Options::parse(&args(&["--source", "prog.src"]), false).unwrap();
        let b = Options::parse(&args(&["--source=prog.src"]), false).unwrap();
        assert_eq!(a.source.as_deref(), Some("prog.src"));
        assert_eq!(a, b);
    }

    #[test]
    fn both_files() {
        let opts =
            Options::parse(&args(&["--source=a.xml", "--input", "b.txt"]), true).unwrap();
        assert_eq!(opts.source.as_deref(), Some("a.xml"));
        assert_eq!(opts.input.as_deref(), Some("b.txt"));
    }

    #[test]
    fn input_rejected_where_not_accepted() {
        assert!(Options::parse(&args(&["--input", "b.txt"]), false).is_err());
    }

    #[test]
    fn help_must_stand_alone() {
        assert!(Options::parse(&args(&["--help"]), true).unwrap().help);
        assert!(Options::parse(&args(&["-h"]), true).unwrap().help);
        assert!(Options::parse(&args(&["--help", "--source=x"]), true).is_err());
        assert!(Options::parse(&args(&["--source=x", "--help"]), true).is_err());
    }

    #[test]
    fn missing_value() {
        assert!(Options::parse(&args(&["--source"]), true).is_err());
    }

    #[test]
    fn duplicate_flag() {
        assert!(Options::parse(&args(&["--source=a", "--source=b"]), true).is_err());
    }

    #[test]
    fn unknown_and_positional_arguments() {
        assert!(Options::parse(&args(&["--verbose"]), true).is_err());
        assert!(Options::parse(&args(&["prog.src"]), true).is_err());
        assert!(Options::parse(&args(&["--help=1"]), true).is_err());
    }

    #[test]
    fn inline_value_may_contain_equals() {
        let opts = Options::parse(&args(&["--source=a=b.xml"]), false).unwrap();
        assert_eq!(opts.source.as_deref(), Some("a=b.xml"));
    }
}
