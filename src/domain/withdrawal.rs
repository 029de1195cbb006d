use super::banknote::{Banknote, BanknotesPack};
use super::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::Serialize;

/// Banknotes handed out by a successful withdrawal, highest denomination first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Withdrawal {
    currency: Currency,
    banknotes: Vec<Banknote>,
}

impl Withdrawal {
    pub fn new(currency: Currency, banknotes: Vec<Banknote>) -> Self {
        Self {
            currency,
            banknotes,
        }
    }

    pub fn banknotes(&self) -> &[Banknote] {
        &self.banknotes
    }

    pub fn total(&self) -> Money {
        let total: Decimal = self
            .banknotes
            .iter()
            .map(|note| Decimal::from(note.face_value()))
            .sum();
        Money::new(total, self.currency).unwrap_or_else(|_| Money::zero(self.currency))
    }

    /// Groups the banknotes into one pack per denomination, keeping order.
    pub fn packs(&self) -> Vec<BanknotesPack> {
        let mut packs: Vec<BanknotesPack> = Vec::new();
        for &note in &self.banknotes {
            match packs.last_mut() {
                Some(pack) if pack.banknote == note => pack.count += 1,
                _ => packs.push(BanknotesPack::new(1, note)),
            }
        }
        packs
    }
}
