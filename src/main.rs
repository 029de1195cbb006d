use atm_sim::application::machine::ATMachine;
use atm_sim::domain::money::Currency;
use atm_sim::infrastructure::in_memory::InMemoryBank;
use atm_sim::interfaces::csv::account_reader::load_accounts;
use atm_sim::interfaces::csv::outcome_writer::OutcomeWriter;
use atm_sim::interfaces::csv::request_reader::RequestReader;
use atm_sim::interfaces::json::read_deposit;
use atm_sim::logging;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input withdrawal requests CSV file (card, pin, amount, currency)
    input: PathBuf,

    /// Deposit JSON file describing the banknotes loaded into the machine
    #[arg(long)]
    deposit: PathBuf,

    /// Bank accounts CSV file (card, pin, balance, currency)
    #[arg(long)]
    accounts: PathBuf,

    /// Currency the machine operates in
    #[arg(long, default_value = "PLN")]
    currency: Currency,

    /// Log filter directives, e.g. "atm_sim=debug". Overrides RUST_LOG.
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_filter.as_deref()).into_diagnostic()?;

    let bank = InMemoryBank::new();
    let accounts = File::open(&cli.accounts).into_diagnostic()?;
    load_accounts(accounts, &bank).await.into_diagnostic()?;

    let atm = ATMachine::new(Arc::new(bank), cli.currency);
    let deposit = read_deposit(File::open(&cli.deposit).into_diagnostic()?).into_diagnostic()?;
    atm.set_deposit(deposit).into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());

    // Process requests
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    for request in reader.requests() {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Error reading request: {}", e);
                continue;
            }
        };
        let (card, pin, money) = match request.parse() {
            Ok(parts) => parts,
            Err(e) => {
                eprintln!("Error reading request: {}", e);
                continue;
            }
        };
        match atm.withdraw(&pin, &card, &money).await {
            Ok(withdrawal) => writer.write_outcome(&request, Ok(&withdrawal)),
            Err(e) => match e.kind() {
                Some(kind) => writer.write_outcome(&request, Err(kind.to_string())),
                None => Err(e),
            },
        }
        .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    let remaining = atm.deposit();
    tracing::info!(total = %remaining.total_value(), packs = ?remaining.packs(), "deposit_remaining");
    Ok(())
}
