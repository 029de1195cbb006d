pub mod account_reader;
pub mod outcome_writer;
pub mod request_reader;
