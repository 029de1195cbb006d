use crate::error::{AtmError, Result};
use std::fmt;
use std::str::FromStr;

/// A four-digit personal identification number.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinCode([u8; 4]);

impl PinCode {
    pub fn new(first: u8, second: u8, third: u8, fourth: u8) -> Result<Self> {
        let digits = [first, second, third, fourth];
        if let Some(digit) = digits.iter().find(|d| **d > 9) {
            return Err(AtmError::ValidationError(format!(
                "PIN digit out of range: {}",
                digit
            )));
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> [u8; 4] {
        self.0
    }
}

impl FromStr for PinCode {
    type Err = AtmError;

    /// Parses exactly four decimal digits, e.g. `"1289"`.
    fn from_str(s: &str) -> Result<Self> {
        let digits: Vec<u8> = s
            .trim()
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| AtmError::ValidationError("PIN must contain only digits".to_string()))?;
        match digits.as_slice() {
            [a, b, c, d] => Self::new(*a, *b, *c, *d),
            _ => Err(AtmError::ValidationError(
                "PIN must have exactly 4 digits".to_string(),
            )),
        }
    }
}

impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinCode(****)")
    }
}

/// Opaque identifier of the account behind a payment card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card(String);

impl Card {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AtmError::ValidationError(
                "Card token must not be empty".to_string(),
            ));
        }
        Ok(Self(token))
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
