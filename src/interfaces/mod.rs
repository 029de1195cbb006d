//! Adapters between the outside world and the domain: CSV for requests,
//! accounts and outcomes, JSON for deposit files.

pub mod csv;
pub mod json;
