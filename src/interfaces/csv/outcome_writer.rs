use crate::domain::withdrawal::Withdrawal;
use crate::error::Result;
use crate::interfaces::csv::request_reader::WithdrawalRequest;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct OutcomeRecord<'a> {
    card: &'a str,
    amount: String,
    currency: &'a str,
    outcome: String,
    banknotes: String,
}

/// Writes one CSV row per processed withdrawal request.
///
/// Columns: `card,amount,currency,outcome,banknotes`. `outcome` is `OK` or
/// the refusal kind; `banknotes` lists `<count>x<face value>` per
/// denomination, highest first, e.g. `2x200 1x50`.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Records the outcome of `request`. `outcome` is the withdrawal, or the
    /// label of the reason it was refused.
    pub fn write_outcome(
        &mut self,
        request: &WithdrawalRequest,
        outcome: std::result::Result<&Withdrawal, String>,
    ) -> Result<()> {
        let (outcome, banknotes) = match outcome {
            Ok(withdrawal) => (
                "OK".to_string(),
                withdrawal
                    .packs()
                    .iter()
                    .map(|pack| format!("{}x{}", pack.count, pack.banknote.face_value()))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Err(reason) => (reason, String::new()),
        };
        self.writer.serialize(OutcomeRecord {
            card: &request.card,
            amount: request.amount.normalize().to_string(),
            currency: request.currency.as_deref().unwrap_or_default(),
            outcome,
            banknotes,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
