mod common;

use atm_sim::domain::banknote::Banknote;
use atm_sim::domain::money::{Currency, Money};
use atm_sim::domain::ports::BankError;
use atm_sim::error::ErrorKind;
use common::{MockBank, card, pin, standard_deposit, standard_machine};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_single_banknote_withdrawal() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let money = Money::with_default_currency(dec!(100)).unwrap();

    let withdrawal = atm.withdraw(&pin(), &card(), &money).await.unwrap();

    assert_eq!(withdrawal.banknotes(), &[Banknote::Pl100]);
    let deposit = atm.deposit();
    assert_eq!(deposit.count_of(Banknote::Pl100), 9);
    assert_eq!(deposit.count_of(Banknote::Pl200), 10);
    assert_eq!(bank.calls(), vec!["authorize", "charge"]);
}

#[tokio::test]
async fn test_amount_above_deposit_is_wrong_amount() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let money = Money::with_default_currency(dec!(9000)).unwrap();

    let err = atm.withdraw(&pin(), &card(), &money).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::WrongAmount));
    assert_eq!(atm.deposit(), standard_deposit());
    assert_eq!(bank.authorize_calls(), 0);
    assert_eq!(bank.charge_calls(), 0);
}

#[tokio::test]
async fn test_fractional_amount_is_wrong_amount() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let money = Money::with_default_currency(dec!(92.999)).unwrap();

    let err = atm.withdraw(&pin(), &card(), &money).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::WrongAmount));
    assert_eq!(bank.authorize_calls(), 0);
}

#[tokio::test]
async fn test_authorization_fault() {
    let bank = MockBank::failing_authorization(BankError::Rejected("bad pin".into()));
    let atm = standard_machine(bank.clone());
    let money = Money::with_default_currency(dec!(100)).unwrap();

    let err = atm.withdraw(&pin(), &card(), &money).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Authorization));
    assert_eq!(atm.deposit(), standard_deposit());
    assert_eq!(bank.authorize_calls(), 1);
    assert_eq!(bank.charge_calls(), 0);
}

#[tokio::test]
async fn test_unreachable_bank_is_authorization_failure() {
    let bank = MockBank::failing_authorization(BankError::Unavailable("timeout".into()));
    let atm = standard_machine(bank.clone());
    let money = Money::with_default_currency(dec!(200)).unwrap();

    let err = atm.withdraw(&pin(), &card(), &money).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Authorization));
    assert_eq!(bank.authorize_calls(), 1);
}

#[tokio::test]
async fn test_wrong_currency_never_reaches_bank() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let euros = Money::new(dec!(500), Currency::EUR).unwrap();

    let err = atm.withdraw(&pin(), &card(), &euros).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::WrongCurrency));
    assert_eq!(bank.authorize_calls(), 0);
    assert_eq!(bank.charge_calls(), 0);
    assert_eq!(atm.deposit(), standard_deposit());
}

#[tokio::test]
async fn test_currency_checked_before_amount() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    // Neither the currency nor the amount is acceptable.
    let money = Money::new(dec!(92.999), Currency::EUR).unwrap();

    let err = atm.withdraw(&pin(), &card(), &money).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::WrongCurrency));
}

#[tokio::test]
async fn test_charge_fault_is_no_funds_on_account() {
    let bank = MockBank::failing_charge(BankError::InsufficientFunds);
    let atm = standard_machine(bank.clone());
    let money = Money::with_default_currency(dec!(300)).unwrap();

    let err = atm.withdraw(&pin(), &card(), &money).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::NoFundsOnAccount));
    assert_eq!(bank.calls(), vec!["authorize", "charge"]);
    assert_eq!(atm.deposit(), standard_deposit());
}

#[tokio::test]
async fn test_failures_are_repeatable() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let too_much = Money::with_default_currency(dec!(9000)).unwrap();
    let euros = Money::new(dec!(100), Currency::EUR).unwrap();

    for _ in 0..3 {
        let err = atm.withdraw(&pin(), &card(), &too_much).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::WrongAmount));
        let err = atm.withdraw(&pin(), &card(), &euros).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::WrongCurrency));
    }
    assert_eq!(atm.deposit(), standard_deposit());
    assert_eq!(bank.authorize_calls(), 0);
}

#[tokio::test]
async fn test_machine_serves_next_request_after_failure() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let too_much = Money::with_default_currency(dec!(9000)).unwrap();
    let ok = Money::with_default_currency(dec!(700)).unwrap();

    assert!(atm.withdraw(&pin(), &card(), &too_much).await.is_err());
    let withdrawal = atm.withdraw(&pin(), &card(), &ok).await.unwrap();

    assert_eq!(
        withdrawal.banknotes(),
        &[Banknote::Pl200, Banknote::Pl200, Banknote::Pl200, Banknote::Pl100]
    );
    assert_eq!(withdrawal.total(), ok);
}

#[tokio::test]
async fn test_deposit_drains_to_exact_zero() {
    let bank = MockBank::new();
    let atm = standard_machine(bank.clone());
    let everything = Money::with_default_currency(dec!(3000)).unwrap();

    atm.withdraw(&pin(), &card(), &everything).await.unwrap();

    let deposit = atm.deposit();
    assert_eq!(deposit.total_value(), Money::zero(Currency::DEFAULT));
    let one_more = Money::with_default_currency(dec!(100)).unwrap();
    let err = atm.withdraw(&pin(), &card(), &one_more).await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::WrongAmount));
}
