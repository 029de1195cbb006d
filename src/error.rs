use crate::domain::banknote::Banknote;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The reason a withdrawal was refused.
///
/// Exactly one kind is reported per failed withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The amount cannot be composed exactly from the banknotes in the deposit.
    WrongAmount,
    /// The requested currency differs from the deposit currency.
    WrongCurrency,
    /// The bank refused the pin/card pair, or could not be reached to check it.
    Authorization,
    /// The bank refused to charge the account after a successful authorization.
    NoFundsOnAccount,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorKind::WrongAmount => "WRONG_AMOUNT",
            ErrorKind::WrongCurrency => "WRONG_CURRENCY",
            ErrorKind::Authorization => "AUTHORIZATION",
            ErrorKind::NoFundsOnAccount => "NO_FUNDS_ON_ACCOUNT",
        };
        f.write_str(code)
    }
}

#[derive(Error, Debug)]
pub enum AtmError {
    #[error("ATM operation failed: {0}")]
    Operation(ErrorKind),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Deposit holds {available} x {banknote}, cannot dispense {requested}")]
    InsufficientBanknotes {
        banknote: Banknote,
        requested: u32,
        available: u32,
    },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AtmError {
    /// The withdrawal error kind, if this is a refused withdrawal.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AtmError::Operation(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<ErrorKind> for AtmError {
    fn from(kind: ErrorKind) -> Self {
        AtmError::Operation(kind)
    }
}

pub type Result<T> = std::result::Result<T, AtmError>;
