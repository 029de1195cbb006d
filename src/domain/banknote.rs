use super::money::Currency;
use crate::error::{AtmError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A banknote denomination accepted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Banknote {
    #[serde(rename = "PL_10")]
    Pl10,
    #[serde(rename = "PL_20")]
    Pl20,
    #[serde(rename = "PL_50")]
    Pl50,
    #[serde(rename = "PL_100")]
    Pl100,
    #[serde(rename = "PL_200")]
    Pl200,
    #[serde(rename = "PL_500")]
    Pl500,
    #[serde(rename = "EU_5")]
    Eu5,
    #[serde(rename = "EU_10")]
    Eu10,
    #[serde(rename = "EU_20")]
    Eu20,
    #[serde(rename = "EU_50")]
    Eu50,
    #[serde(rename = "EU_100")]
    Eu100,
    #[serde(rename = "EU_200")]
    Eu200,
    #[serde(rename = "EU_500")]
    Eu500,
}

impl Banknote {
    /// Every denomination, in declaration order.
    pub const ALL: [Banknote; 13] = [
        Banknote::Pl10,
        Banknote::Pl20,
        Banknote::Pl50,
        Banknote::Pl100,
        Banknote::Pl200,
        Banknote::Pl500,
        Banknote::Eu5,
        Banknote::Eu10,
        Banknote::Eu20,
        Banknote::Eu50,
        Banknote::Eu100,
        Banknote::Eu200,
        Banknote::Eu500,
    ];

    pub fn face_value(&self) -> u32 {
        match self {
            Banknote::Pl10 | Banknote::Eu10 => 10,
            Banknote::Pl20 | Banknote::Eu20 => 20,
            Banknote::Pl50 | Banknote::Eu50 => 50,
            Banknote::Pl100 | Banknote::Eu100 => 100,
            Banknote::Pl200 | Banknote::Eu200 => 200,
            Banknote::Pl500 | Banknote::Eu500 => 500,
            Banknote::Eu5 => 5,
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            Banknote::Pl10
            | Banknote::Pl20
            | Banknote::Pl50
            | Banknote::Pl100
            | Banknote::Pl200
            | Banknote::Pl500 => Currency::PLN,
            _ => Currency::EUR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Banknote::Pl10 => "PL_10",
            Banknote::Pl20 => "PL_20",
            Banknote::Pl50 => "PL_50",
            Banknote::Pl100 => "PL_100",
            Banknote::Pl200 => "PL_200",
            Banknote::Pl500 => "PL_500",
            Banknote::Eu5 => "EU_5",
            Banknote::Eu10 => "EU_10",
            Banknote::Eu20 => "EU_20",
            Banknote::Eu50 => "EU_50",
            Banknote::Eu100 => "EU_100",
            Banknote::Eu200 => "EU_200",
            Banknote::Eu500 => "EU_500",
        }
    }

    /// Denominations valid for `currency`, highest face value first.
    ///
    /// Equal face values keep declaration order.
    pub fn catalog(currency: Currency) -> Vec<Banknote> {
        let mut notes: Vec<Banknote> = Self::ALL
            .into_iter()
            .filter(|note| note.currency() == currency)
            .collect();
        notes.sort_by(|a, b| b.face_value().cmp(&a.face_value()));
        notes
    }
}

impl fmt::Display for Banknote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Banknote {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|note| note.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AtmError::ValidationError(format!("Unknown banknote '{}'", s)))
    }
}

/// A quantity of banknotes of one denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanknotesPack {
    pub count: u32,
    pub banknote: Banknote,
}

impl BanknotesPack {
    pub fn new(count: u32, banknote: Banknote) -> Self {
        Self { count, banknote }
    }

    /// Total face value of the pack.
    pub fn value(&self) -> Decimal {
        Decimal::from(self.count) * Decimal::from(self.banknote.face_value())
    }
}
