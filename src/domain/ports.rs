use super::card::{Card, PinCode};
use super::money::Money;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Proof of a successful authorization, handed back to the bank when charging.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthorizationToken(String);

impl AuthorizationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for AuthorizationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthorizationToken(..)")
    }
}

/// Faults raised by the bank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Insufficient funds on account")]
    InsufficientFunds,
    #[error("Unknown or expired authorization token")]
    UnknownToken,
    #[error("Bank unavailable: {0}")]
    Unavailable(String),
}

/// The external bank, consulted to authorize a card and charge its account.
///
/// Implementations must be safe to call concurrently; the machine never
/// holds its deposit lock across these calls.
#[async_trait]
pub trait Bank: Send + Sync {
    async fn authorize(
        &self,
        pin: &PinCode,
        card: &Card,
    ) -> Result<AuthorizationToken, BankError>;
    async fn charge(&self, token: &AuthorizationToken, amount: &Money) -> Result<(), BankError>;
}
