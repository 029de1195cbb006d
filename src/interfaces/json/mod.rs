use crate::domain::deposit::MoneyDeposit;
use crate::error::Result;
use std::io::Read;

/// Reads a deposit description such as
/// `{"currency":"PLN","packs":[{"banknote":"PL_100","count":10}]}`.
pub fn read_deposit<R: Read>(source: R) -> Result<MoneyDeposit> {
    let deposit: MoneyDeposit = serde_json::from_reader(source)?;
    Ok(deposit)
}
