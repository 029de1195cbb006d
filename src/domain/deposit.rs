use super::banknote::{Banknote, BanknotesPack};
use super::money::{Currency, Money};
use crate::error::{AtmError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The cash held by the machine, as banknote counts per denomination.
///
/// All packs share the deposit currency and each denomination appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepositConfig")]
pub struct MoneyDeposit {
    currency: Currency,
    packs: Vec<BanknotesPack>,
}

/// Unvalidated deposit layout, as found in deposit files.
#[derive(Debug, Deserialize)]
pub struct DepositConfig {
    pub currency: Currency,
    pub packs: Vec<BanknotesPack>,
}

impl TryFrom<DepositConfig> for MoneyDeposit {
    type Error = AtmError;

    fn try_from(config: DepositConfig) -> Result<Self> {
        Self::new(config.currency, config.packs)
    }
}

impl MoneyDeposit {
    /// Builds a deposit, merging packs of the same denomination.
    ///
    /// Fails if any pack holds banknotes of a different currency.
    pub fn new(currency: Currency, packs: impl IntoIterator<Item = BanknotesPack>) -> Result<Self> {
        let mut merged: Vec<BanknotesPack> = Vec::new();
        for pack in packs {
            if pack.banknote.currency() != currency {
                return Err(AtmError::ValidationError(format!(
                    "Banknote {} does not belong to deposit currency {}",
                    pack.banknote, currency
                )));
            }
            match merged.iter_mut().find(|p| p.banknote == pack.banknote) {
                Some(existing) => {
                    existing.count = existing.count.checked_add(pack.count).ok_or_else(|| {
                        AtmError::ValidationError(format!("Too many {} banknotes", pack.banknote))
                    })?;
                }
                None => merged.push(pack),
            }
        }
        Ok(Self {
            currency,
            packs: merged,
        })
    }

    pub fn empty(currency: Currency) -> Self {
        Self {
            currency,
            packs: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn packs(&self) -> &[BanknotesPack] {
        &self.packs
    }

    pub fn count_of(&self, banknote: Banknote) -> u32 {
        self.packs
            .iter()
            .find(|p| p.banknote == banknote)
            .map_or(0, |p| p.count)
    }

    /// Sum of count x face value over all packs.
    ///
    /// Diagnostic only: a large enough total does not mean an amount can be paid out.
    pub fn total_value(&self) -> Money {
        let total: Decimal = self.packs.iter().map(BanknotesPack::value).sum();
        Money::new(total, self.currency).unwrap_or_else(|_| Money::zero(self.currency))
    }

    /// Removes dispensed banknotes from the deposit.
    ///
    /// All-or-nothing: if any denomination would go below zero the deposit is
    /// left untouched.
    pub fn apply(&mut self, banknotes: &[Banknote]) -> Result<()> {
        let requested = tally(banknotes);
        for (banknote, count) in &requested {
            let available = self.count_of(*banknote);
            if *count > available {
                return Err(AtmError::InsufficientBanknotes {
                    banknote: *banknote,
                    requested: *count,
                    available,
                });
            }
        }
        for (banknote, count) in requested {
            if let Some(pack) = self.packs.iter_mut().find(|p| p.banknote == banknote) {
                pack.count -= count;
            }
        }
        Ok(())
    }

    /// Puts banknotes back, e.g. a reservation that was not paid out.
    pub fn restore(&mut self, banknotes: &[Banknote]) -> Result<()> {
        if let Some(foreign) = banknotes.iter().find(|b| b.currency() != self.currency) {
            return Err(AtmError::ValidationError(format!(
                "Banknote {} does not belong to deposit currency {}",
                foreign, self.currency
            )));
        }
        for (banknote, count) in tally(banknotes) {
            match self.packs.iter_mut().find(|p| p.banknote == banknote) {
                Some(pack) => pack.count = pack.count.saturating_add(count),
                None => self.packs.push(BanknotesPack::new(count, banknote)),
            }
        }
        Ok(())
    }
}

/// Counts banknotes per denomination, keeping first-seen order.
fn tally(banknotes: &[Banknote]) -> Vec<(Banknote, u32)> {
    let mut counts: Vec<(Banknote, u32)> = Vec::new();
    for note in banknotes {
        match counts.iter_mut().find(|(b, _)| b == note) {
            Some((_, count)) => *count += 1,
            None => counts.push((*note, 1)),
        }
    }
    counts
}
