//! Raw input line to structured command.

/// One input line split into a command name and its raw argument tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub raw_args: Vec<String>,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Parse raw input bytes. Never fails; invalid UTF-8 is replaced.
pub fn parse(raw: &[u8]) -> ParsedCommand {
    parse_line(&String::from_utf8_lossy(raw))
}

/// Parse one line of text.
///
/// The first whitespace-delimited token is the command name; the rest become
/// `raw_args`. No quoting or escaping. The name is not checked against the
/// command table.
pub fn parse_line(line: &str) -> ParsedCommand {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().unwrap_or_default().to_string();
    let raw_args = tokens.map(str::to_string).collect();
    ParsedCommand { name, raw_args }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_args_are_split_on_whitespace() {
        let cmd = parse_line("cmd a b");
        assert_eq!(cmd.name, "cmd");
        assert_eq!(cmd.raw_args, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn bare_command_has_no_args() {
        let cmd = parse_line("cmd");
        assert_eq!(cmd.name, "cmd");
        assert!(cmd.raw_args.is_empty());
    }

    #[test]
    fn empty_and_blank_lines_yield_empty_command() {
        assert_eq!(parse_line(""), ParsedCommand::default());
        assert_eq!(parse_line("   \t \n"), ParsedCommand::default());
        assert!(parse_line("").is_empty());
    }

    #[test]
    fn extra_whitespace_and_line_endings_are_dropped() {
        let cmd = parse(b"  cp   a.txt \t  b.txt \r\n");
        assert_eq!(cmd.name, "cp");
        assert_eq!(cmd.raw_args, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let cmd = parse(b"cat \xff.txt");
        assert_eq!(cmd.name, "cat");
        assert_eq!(cmd.raw_args.len(), 1);
    }

    #[test]
    fn unknown_names_are_passed_through() {
        assert_eq!(parse_line("frobnicate --now").name, "frobnicate");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_matches_whitespace_split(
                tokens in proptest::collection::vec(
                    proptest::string::string_regex("[!-~]{1,12}").expect("regex"),
                    1..6
                ),
                gap in proptest::string::string_regex("[ \t]{1,3}").expect("regex")
            ) {
                let line = tokens.join(&gap);
                let cmd = parse_line(&line);
                prop_assert_eq!(&cmd.name, &tokens[0]);
                prop_assert_eq!(&cmd.raw_args[..], &tokens[1..]);
            }
        }
    }
}
