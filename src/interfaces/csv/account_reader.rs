use crate::domain::card::{Card, PinCode};
use crate::domain::money::{Currency, Money};
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryBank;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct AccountRecord {
    card: String,
    pin: String,
    balance: Decimal,
    currency: Option<String>,
}

/// Seeds `bank` with the accounts listed in a CSV source
/// (`card, pin, balance, currency`). Returns the number of accounts opened.
///
/// Stops at the first invalid row.
pub async fn load_accounts<R: Read>(source: R, bank: &InMemoryBank) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut opened = 0;
    for record in reader.deserialize::<AccountRecord>() {
        let record = record?;
        let currency = match record.currency.as_deref() {
            Some(code) if !code.is_empty() => code.parse()?,
            _ => Currency::DEFAULT,
        };
        let pin: PinCode = record.pin.parse()?;
        let balance = Money::new(record.balance, currency)?;
        bank.open_account(Card::new(record.card)?, pin, balance).await;
        opened += 1;
    }
    tracing::debug!(accounts = opened, "accounts_loaded");
    Ok(opened)
}
