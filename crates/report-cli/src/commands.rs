//! Command parsing for the interactive client
//!
//! Plain lines are ticker submissions, including blank ones, which the form
//! rejects like any other too-short value. Lines starting with `/` are
//! commands.

use crate::error::{ClientError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a ticker to the form
    Add { ticker: String },
    /// Request the report for every collected ticker
    Generate,
    /// Show help
    Help,
    /// Exit the client
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let Some(cmd) = input.strip_prefix('/') else {
            return Ok(Command::Add {
                ticker: input.to_string(),
            });
        };

        match cmd.trim().to_lowercase().as_str() {
            "report" | "generate" | "r" => Ok(Command::Generate),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(ClientError::CommandError(format!(
                "Unknown command: /{other}. Type /help for available commands"
            ))),
        }
    }

    /// Help text listing every command
    pub fn help_text() -> &'static str {
        "Type a ticker (e.g. TSLA) and press enter to add it.\n\
         Commands:\n  \
           /report  - Generate the report for the tickers added so far\n  \
           /help    - Show this help\n  \
           /exit    - Exit"
    }
}
