use crate::domain::card::{Card, PinCode};
use crate::domain::money::Money;
use crate::domain::ports::{AuthorizationToken, Bank, BankError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct BankAccount {
    pin: PinCode,
    balance: Money,
}

/// A thread-safe in-memory bank.
///
/// Keeps one account per card and hands out single-use authorization tokens.
/// Ideal for testing and for running the simulator without a real bank.
#[derive(Default, Clone)]
pub struct InMemoryBank {
    accounts: Arc<RwLock<HashMap<Card, BankAccount>>>,
    tokens: Arc<RwLock<HashMap<AuthorizationToken, Card>>>,
    next_token: Arc<AtomicU64>,
}

impl InMemoryBank {
    /// Creates a new bank without accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or replaces) the account behind `card`.
    pub async fn open_account(&self, card: Card, pin: PinCode, balance: Money) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(card, BankAccount { pin, balance });
    }

    pub async fn balance(&self, card: &Card) -> Option<Money> {
        let accounts = self.accounts.read().await;
        accounts.get(card).map(|account| account.balance)
    }
}

#[async_trait]
impl Bank for InMemoryBank {
    async fn authorize(
        &self,
        pin: &PinCode,
        card: &Card,
    ) -> Result<AuthorizationToken, BankError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(card)
            .ok_or_else(|| BankError::Rejected(format!("unknown card {}", card)))?;
        if account.pin != *pin {
            return Err(BankError::Rejected("wrong PIN".to_string()));
        }

        let id = self.next_token.fetch_add(1, Ordering::Relaxed);
        let token = AuthorizationToken::new(format!("{}-{}", card.token(), id));
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.clone(), card.clone());
        Ok(token)
    }

    async fn charge(&self, token: &AuthorizationToken, amount: &Money) -> Result<(), BankError> {
        let card = self
            .tokens
            .write()
            .await
            .remove(token)
            .ok_or(BankError::UnknownToken)?;

        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&card).ok_or(BankError::UnknownToken)?;
        if account.balance.currency() != amount.currency() {
            return Err(BankError::Rejected(format!(
                "account is held in {}",
                account.balance.currency()
            )));
        }
        let remaining = account.balance.amount() - amount.amount();
        account.balance =
            Money::new(remaining, amount.currency()).map_err(|_| BankError::InsufficientFunds)?;
        Ok(())
    }
}
