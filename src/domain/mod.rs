//! Domain layer: money, banknotes, the machine's cash deposit, the
//! banknote selector and the port to the external bank.

pub mod banknote;
pub mod card;
pub mod deposit;
pub mod money;
pub mod ports;
pub mod selector;
pub mod withdrawal;
