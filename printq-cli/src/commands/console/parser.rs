//! Command parsing for console commands

use anyhow::{anyhow, bail, Result};

/// A parsed console command.
///
/// Positions are 1-based as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Fields are passed on unvalidated; missing ones are empty
    Add {
        job_id: String,
        pages: String,
        category: String,
        priority: String,
    },
    List,
    Remove { position: usize },
    Submit { position: usize },
    SubmitAll,
    Output,
    OutputClear,
    Help,
    Clear,
    History,
    Exit,
}

impl ConsoleCommand {
    /// Names offered by tab completion
    pub fn names() -> &'static [&'static str] {
        &[
            "add",
            "list",
            "remove",
            "submit",
            "submit-all",
            "output",
            "help",
            "clear",
            "history",
            "exit",
            "quit",
        ]
    }
}

/// Command parser for console input
#[derive(Default)]
pub struct CommandParser {}

impl CommandParser {
    pub fn new() -> Self {
        Self {}
    }

    /// Parse a command line. Blank input yields `None`.
    pub fn parse(&self, input: &str) -> Result<Option<ConsoleCommand>> {
        let tokens = self.tokenize(input)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name.to_lowercase().as_str() {
            "add" => {
                if args.len() > 4 {
                    bail!("Usage: add <id> <pages> <category> <priority>");
                }
                let field = |i: usize| args.get(i).cloned().unwrap_or_default();
                ConsoleCommand::Add {
                    job_id: field(0),
                    pages: field(1),
                    category: field(2),
                    priority: field(3),
                }
            }
            "list" | "ls" => {
                no_args(name, args)?;
                ConsoleCommand::List
            }
            "remove" | "rm" => ConsoleCommand::Remove {
                position: single_position(name, args)?,
            },
            "submit" => match args {
                [] => bail!("Usage: submit <position>  (or submit-all)"),
                [all] if all == "all" => ConsoleCommand::SubmitAll,
                _ => ConsoleCommand::Submit {
                    position: single_position(name, args)?,
                },
            },
            "submit-all" => {
                no_args(name, args)?;
                ConsoleCommand::SubmitAll
            }
            "output" => match args {
                [] => ConsoleCommand::Output,
                [action] if action == "clear" => ConsoleCommand::OutputClear,
                _ => bail!("Usage: output [clear]"),
            },
            "help" | "?" => ConsoleCommand::Help,
            "clear" => ConsoleCommand::Clear,
            "history" => ConsoleCommand::History,
            "exit" | "quit" => ConsoleCommand::Exit,
            other => bail!("Unknown command '{}'. Type 'help' for commands.", other),
        };

        Ok(Some(command))
    }

    /// Split on whitespace, keeping quoted text together
    fn tokenize(&self, input: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut quote: Option<char> = None;
        let mut quoted_token = false;

        for ch in input.chars() {
            match (quote, ch) {
                (None, '"' | '\'') => {
                    quote = Some(ch);
                    quoted_token = true;
                }
                (Some(open), _) if ch == open => quote = None,
                (None, c) if c.is_whitespace() => {
                    if !current.is_empty() || quoted_token {
                        tokens.push(std::mem::take(&mut current));
                        quoted_token = false;
                    }
                }
                _ => current.push(ch),
            }
        }

        if quote.is_some() {
            return Err(anyhow!("Unclosed quote in command"));
        }
        if !current.is_empty() || quoted_token {
            tokens.push(current);
        }

        Ok(tokens)
    }
}

fn no_args(name: &str, args: &[String]) -> Result<()> {
    if !args.is_empty() {
        bail!("'{}' takes no arguments", name);
    }
    Ok(())
}

fn single_position(name: &str, args: &[String]) -> Result<usize> {
    let [arg] = args else {
        bail!("Usage: {} <position>", name);
    };
    match arg.parse::<usize>() {
        Ok(0) => bail!("Positions start at 1"),
        Ok(position) => Ok(position),
        Err(_) => bail!("'{}' is not a position", arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ConsoleCommand {
        CommandParser::new().parse(input).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(CommandParser::new().parse("   ").unwrap(), None);
    }

    #[test]
    fn test_add_with_quoted_labels() {
        assert_eq!(
            parse("add 7 3 \"2 - Magazine/Book\" '3 - Low'"),
            ConsoleCommand::Add {
                job_id: "7".into(),
                pages: "3".into(),
                category: "2 - Magazine/Book".into(),
                priority: "3 - Low".into(),
            }
        );
    }

    #[test]
    fn test_add_with_missing_fields_defers_validation() {
        assert_eq!(
            parse("add 7 3"),
            ConsoleCommand::Add {
                job_id: "7".into(),
                pages: "3".into(),
                category: String::new(),
                priority: String::new(),
            }
        );
        assert!(CommandParser::new().parse("add 1 2 3 4 5").is_err());
    }

    #[test]
    fn test_empty_quoted_field_is_kept() {
        match parse("add 1 '' 1 1") {
            ConsoleCommand::Add { pages, category, .. } => {
                assert_eq!(pages, "");
                assert_eq!(category, "1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_positions() {
        assert_eq!(parse("remove 2"), ConsoleCommand::Remove { position: 2 });
        assert_eq!(parse("submit 1"), ConsoleCommand::Submit { position: 1 });
        assert_eq!(parse("submit all"), ConsoleCommand::SubmitAll);
        assert_eq!(parse("SUBMIT-ALL"), ConsoleCommand::SubmitAll);

        let parser = CommandParser::new();
        assert!(parser.parse("remove 0").is_err());
        assert!(parser.parse("remove first").is_err());
        assert!(parser.parse("remove").is_err());
        assert!(parser.parse("submit").is_err());
    }

    #[test]
    fn test_output_commands() {
        assert_eq!(parse("output"), ConsoleCommand::Output);
        assert_eq!(parse("output clear"), ConsoleCommand::OutputClear);
        assert!(CommandParser::new().parse("output everything").is_err());
    }

    #[test]
    fn test_unknown_and_unclosed() {
        let parser = CommandParser::new();
        assert!(parser.parse("print 1").is_err());
        assert!(parser.parse("add 1 1 \"2 - Magazine").is_err());
    }
}
