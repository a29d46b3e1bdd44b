use std::io;

use rustyline::error::ReadlineError;

use crate::{config::ConfigError, domain::InvoiceId, errors::LedgerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Errors raised by a single command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Ledger(err) if err.is_fatal())
    }
}

pub(crate) fn parse_id(input: &str) -> Result<InvoiceId, CommandError> {
    let trimmed = input.trim().trim_start_matches('#');
    match trimmed.parse::<InvoiceId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid invoice id `{}`",
            input
        ))),
    }
}

/// Parses a money amount, tolerating a leading currency symbol and thousands separators.
pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid amount `{}`", input)))
}
