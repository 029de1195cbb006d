use crate::domain::card::{Card, PinCode};
use crate::domain::money::{Currency, Money};
use crate::error::{AtmError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a withdrawal requests file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct WithdrawalRequest {
    pub card: String,
    pub pin: String,
    pub amount: Decimal,
    /// Falls back to the default currency when left empty.
    pub currency: Option<String>,
}

impl WithdrawalRequest {
    /// Validates the raw row into domain values.
    pub fn parse(&self) -> Result<(Card, PinCode, Money)> {
        let card = Card::new(self.card.clone())?;
        let pin: PinCode = self.pin.parse()?;
        let currency = match self.currency.as_deref() {
            Some(code) if !code.trim().is_empty() => code.parse()?,
            _ => Currency::DEFAULT,
        };
        let money = Money::new(self.amount, currency)?;
        Ok((card, pin, money))
    }
}

/// Withdrawal requests, one per CSV row: `card, pin, amount[, currency]`.
///
/// Cells are trimmed, so `123456789, 1289, 100` is accepted. Rows without the
/// currency cell fall back to the default currency when parsed.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Rows in file order. A row that fails to deserialize yields an error
    /// and does not stop the ones after it.
    pub fn requests(self) -> impl Iterator<Item = Result<WithdrawalRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(AtmError::from))
    }
}
