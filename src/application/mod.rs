//! Application layer containing the withdrawal orchestration.
//!
//! This module defines the `ATMachine`, which validates a request against its
//! own deposit, consults the bank and pays out banknotes. Its deposit is
//! guarded by a `tokio` mutex so one machine can serve concurrent requests.

pub mod machine;
