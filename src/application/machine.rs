use crate::domain::banknote::Banknote;
use crate::domain::card::{Card, PinCode};
use crate::domain::deposit::MoneyDeposit;
use crate::domain::money::{Currency, Money};
use crate::domain::ports::Bank;
use crate::domain::selector;
use crate::domain::withdrawal::Withdrawal;
use crate::error::{AtmError, ErrorKind, Result};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Steps a withdrawal goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalStage {
    Idle,
    ValidatingCurrency,
    ValidatingAmount,
    Authorizing,
    Charging,
    Dispensing,
    Complete,
    Failed(ErrorKind),
}

impl fmt::Display for WithdrawalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawalStage::Idle => f.write_str("idle"),
            WithdrawalStage::ValidatingCurrency => f.write_str("validating_currency"),
            WithdrawalStage::ValidatingAmount => f.write_str("validating_amount"),
            WithdrawalStage::Authorizing => f.write_str("authorizing"),
            WithdrawalStage::Charging => f.write_str("charging"),
            WithdrawalStage::Dispensing => f.write_str("dispensing"),
            WithdrawalStage::Complete => f.write_str("complete"),
            WithdrawalStage::Failed(kind) => write!(f, "failed({})", kind),
        }
    }
}

/// An automated teller machine paying out cash from its own deposit.
///
/// Checks run strictly in order: currency, amount, authorization, charge,
/// dispense. The first failing check ends the withdrawal and leaves both the
/// deposit and the bank account as they were.
///
/// The banknotes for a request are reserved (taken out of the deposit) in the
/// same critical section that validates the amount, so concurrent requests
/// never get approved against the same notes. The lock is released while the
/// bank is consulted. Unless the withdrawal reaches dispensing, the
/// reservation goes back into the deposit it was taken from, including when
/// the withdrawal future is dropped mid-flight.
pub struct ATMachine {
    bank: Arc<dyn Bank>,
    currency: Currency,
    deposit: Mutex<LoadedDeposit>,
}

/// The deposit together with the number of times it has been replaced.
struct LoadedDeposit {
    deposit: MoneyDeposit,
    generation: u64,
}

impl ATMachine {
    /// Creates a machine with an empty deposit in `currency`.
    pub fn new(bank: Arc<dyn Bank>, currency: Currency) -> Self {
        Self {
            bank,
            currency,
            deposit: Mutex::new(LoadedDeposit {
                deposit: MoneyDeposit::empty(currency),
                generation: 0,
            }),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Replaces the whole deposit. The deposit must be in the machine's currency.
    ///
    /// Banknotes reserved by in-flight withdrawals belong to the replaced
    /// deposit and are not added to the new one if those withdrawals fail.
    pub fn set_deposit(&self, deposit: MoneyDeposit) -> Result<()> {
        if deposit.currency() != self.currency {
            return Err(AtmError::ValidationError(format!(
                "Deposit currency {} does not match machine currency {}",
                deposit.currency(),
                self.currency
            )));
        }
        tracing::info!(
            currency = %deposit.currency(),
            total = %deposit.total_value(),
            "deposit_replaced"
        );
        let mut loaded = self.lock_deposit();
        loaded.deposit = deposit;
        loaded.generation += 1;
        Ok(())
    }

    /// A snapshot of the current deposit.
    pub fn deposit(&self) -> MoneyDeposit {
        self.lock_deposit().deposit.clone()
    }

    /// Pays out `money` to the holder of `card`.
    #[tracing::instrument(name = "withdraw", skip_all, fields(card = %card, amount = %money))]
    pub async fn withdraw(
        &self,
        pin: &PinCode,
        card: &Card,
        money: &Money,
    ) -> Result<Withdrawal> {
        enter(WithdrawalStage::Idle);
        let reservation = self.reserve(money)?;

        enter(WithdrawalStage::Authorizing);
        let token = self.bank.authorize(pin, card).await.map_err(|fault| {
            tracing::debug!(%fault, "authorization_fault");
            refuse(ErrorKind::Authorization)
        })?;

        enter(WithdrawalStage::Charging);
        self.bank.charge(&token, money).await.map_err(|fault| {
            tracing::debug!(%fault, "charge_fault");
            refuse(ErrorKind::NoFundsOnAccount)
        })?;

        enter(WithdrawalStage::Dispensing);
        let withdrawal = Withdrawal::new(money.currency(), reservation.dispense());

        enter(WithdrawalStage::Complete);
        tracing::info!(
            banknotes = ?withdrawal.banknotes(),
            total = %withdrawal.total(),
            "withdrawal_complete"
        );
        Ok(withdrawal)
    }

    /// Validates currency and amount and takes the selected banknotes out of
    /// the deposit, all under one lock.
    fn reserve(&self, money: &Money) -> Result<Reservation<'_>> {
        let mut loaded = self.lock_deposit();

        enter(WithdrawalStage::ValidatingCurrency);
        if money.currency() != loaded.deposit.currency() {
            return Err(refuse(ErrorKind::WrongCurrency));
        }

        enter(WithdrawalStage::ValidatingAmount);
        let plan = selector::select(money, &loaded.deposit).map_err(|infeasible| {
            tracing::debug!(%infeasible, "amount_infeasible");
            refuse(ErrorKind::WrongAmount)
        })?;

        loaded.deposit.apply(&plan)?;
        Ok(Reservation {
            deposit: &self.deposit,
            generation: loaded.generation,
            plan,
            dispensed: false,
        })
    }

    fn lock_deposit(&self) -> MutexGuard<'_, LoadedDeposit> {
        // Deposit updates are all-or-nothing, so a poisoned lock still holds a consistent deposit.
        self.deposit.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Banknotes taken out of the deposit for one withdrawal.
///
/// Dropping an undispensed reservation returns the notes, unless the deposit
/// was replaced in the meantime.
struct Reservation<'a> {
    deposit: &'a Mutex<LoadedDeposit>,
    generation: u64,
    plan: Vec<Banknote>,
    dispensed: bool,
}

impl Reservation<'_> {
    fn dispense(mut self) -> Vec<Banknote> {
        self.dispensed = true;
        std::mem::take(&mut self.plan)
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.dispensed || self.plan.is_empty() {
            return;
        }
        let mut loaded = self.deposit.lock().unwrap_or_else(PoisonError::into_inner);
        if loaded.generation != self.generation {
            tracing::debug!(
                reserved = ?self.plan,
                "reservation_dropped_after_deposit_replaced"
            );
            return;
        }
        if let Err(e) = loaded.deposit.restore(&self.plan) {
            tracing::error!(error = %e, "reservation_restore_failed");
        }
    }
}

fn enter(stage: WithdrawalStage) {
    tracing::debug!(%stage, "withdrawal_stage");
}

fn refuse(kind: ErrorKind) -> AtmError {
    enter(WithdrawalStage::Failed(kind));
    tracing::warn!(%kind, "withdrawal_refused");
    AtmError::Operation(kind)
}
