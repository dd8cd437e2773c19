//! Terminal command parsing
//!
//! One line of user input becomes a [`TerminalCommand`]. The first
//! whitespace-separated token, lower-cased, picks the command; the rest is
//! re-joined with single spaces as its argument. Anything that is not a
//! known command is a free-form question for the model.

use thiserror::Error;

use crate::ai::prompts;

pub const HELP_TEXT: &str = "\
Commands:
  help                Show this help message
  list [category]     List components (passive/active/input/output)
  info <component>    Component details (e.g., info led)
  identify <image>    Identify a component from a photo
  clear               Clear the conversation
  key                 Show how to set your Anthropic API key

Or just type a question about electronics!
Examples:
  \"What resistor for a 5V LED?\"
  \"How does a transistor work?\"
  \"Calculate voltage divider 5V to 3.3V\"";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: info <component-name>")]
    MissingComponent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Help,
    Clear,
    Key,
    Identify { image: Option<String> },
    List { category: Option<String> },
    Info { component: String },
    Ask { question: String },
}

impl TerminalCommand {
    /// `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Ok(None);
        };
        let args = tokens.collect::<Vec<_>>().join(" ");
        let args = (!args.is_empty()).then_some(args);

        let command = match first.to_lowercase().as_str() {
            "help" => TerminalCommand::Help,
            "clear" => TerminalCommand::Clear,
            "key" => TerminalCommand::Key,
            "identify" => TerminalCommand::Identify { image: args },
            "list" => TerminalCommand::List { category: args },
            "info" => TerminalCommand::Info {
                component: args.ok_or(CommandError::MissingComponent)?,
            },
            _ => TerminalCommand::Ask {
                question: line.trim().to_string(),
            },
        };

        Ok(Some(command))
    }

    /// Text to send to the model, for commands the model answers
    pub fn prompt(&self) -> Option<String> {
        match self {
            TerminalCommand::List { category } => {
                Some(prompts::build_list_prompt(category.as_deref()))
            }
            TerminalCommand::Info { component } => Some(prompts::build_info_prompt(component)),
            TerminalCommand::Ask { question } => Some(question.clone()),
            TerminalCommand::Identify { .. } => Some(prompts::IDENTIFY_PROMPT.to_string()),
            TerminalCommand::Help | TerminalCommand::Clear | TerminalCommand::Key => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> TerminalCommand {
        TerminalCommand::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(TerminalCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_builtin_commands_are_case_insensitive() {
        assert_eq!(parse("HELP"), TerminalCommand::Help);
        assert_eq!(parse(" clear "), TerminalCommand::Clear);
        assert_eq!(parse("Key"), TerminalCommand::Key);
    }

    #[test]
    fn test_arguments_are_rejoined() {
        assert_eq!(
            parse("info   red    led"),
            TerminalCommand::Info {
                component: "red led".to_string()
            }
        );
        assert_eq!(
            parse("list passive"),
            TerminalCommand::List {
                category: Some("passive".to_string())
            }
        );
        assert_eq!(parse("list"), TerminalCommand::List { category: None });
        assert_eq!(
            parse("identify ./part.jpg"),
            TerminalCommand::Identify {
                image: Some("./part.jpg".to_string())
            }
        );
    }

    #[test]
    fn test_info_requires_component() {
        let err = TerminalCommand::parse("info").unwrap_err();
        assert_eq!(err.to_string(), "Usage: info <component-name>");
    }

    #[test]
    fn test_anything_else_is_a_question() {
        let command = parse("What resistor for a 5V LED?");
        assert_eq!(
            command,
            TerminalCommand::Ask {
                question: "What resistor for a 5V LED?".to_string()
            }
        );
        assert_eq!(command.prompt().as_deref(), Some("What resistor for a 5V LED?"));
    }

    #[test]
    fn test_prompts() {
        assert!(parse("info led").prompt().unwrap().contains("\"led\""));
        assert!(parse("list output").prompt().unwrap().contains("output components"));
        assert_eq!(parse("help").prompt(), None);
    }
}
