#![allow(dead_code)]

use async_trait::async_trait;
use atm_sim::application::machine::ATMachine;
use atm_sim::domain::banknote::{Banknote, BanknotesPack};
use atm_sim::domain::card::{Card, PinCode};
use atm_sim::domain::deposit::MoneyDeposit;
use atm_sim::domain::money::{Currency, Money};
use atm_sim::domain::ports::{AuthorizationToken, Bank, BankError};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A bank double that counts calls and can be told to fail.
#[derive(Default)]
pub struct MockBank {
    authorize_calls: AtomicUsize,
    charge_calls: AtomicUsize,
    authorize_fault: Mutex<Option<BankError>>,
    charge_fault: Mutex<Option<BankError>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockBank {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_authorization(fault: BankError) -> Arc<Self> {
        let bank = Self::default();
        *bank.authorize_fault.lock().unwrap() = Some(fault);
        Arc::new(bank)
    }

    pub fn failing_charge(fault: BankError) -> Arc<Self> {
        let bank = Self::default();
        *bank.charge_fault.lock().unwrap() = Some(fault);
        Arc::new(bank)
    }

    pub fn authorize_calls(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }

    pub fn charge_calls(&self) -> usize {
        self.charge_calls.load(Ordering::SeqCst)
    }

    /// Names of the bank operations invoked, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bank for MockBank {
    async fn authorize(
        &self,
        _pin: &PinCode,
        card: &Card,
    ) -> Result<AuthorizationToken, BankError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push("authorize");
        match self.authorize_fault.lock().unwrap().clone() {
            Some(fault) => Err(fault),
            None => Ok(AuthorizationToken::new(card.token())),
        }
    }

    async fn charge(&self, _token: &AuthorizationToken, _amount: &Money) -> Result<(), BankError> {
        self.charge_calls.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push("charge");
        match self.charge_fault.lock().unwrap().clone() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

/// 10 x 100 and 10 x 200 in the default currency.
pub fn standard_deposit() -> MoneyDeposit {
    MoneyDeposit::new(
        Currency::DEFAULT,
        [
            BanknotesPack::new(10, Banknote::Pl100),
            BanknotesPack::new(10, Banknote::Pl200),
        ],
    )
    .unwrap()
}

pub fn standard_machine(bank: Arc<MockBank>) -> ATMachine {
    let atm = ATMachine::new(bank, Currency::DEFAULT);
    atm.set_deposit(standard_deposit()).unwrap();
    atm
}

pub fn pin() -> PinCode {
    PinCode::new(1, 2, 8, 9).unwrap()
}

pub fn card() -> Card {
    Card::new("123456789").unwrap()
}
