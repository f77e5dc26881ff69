//! # Service Layer
//!
//! Writer and reader services over the ledger port.

mod history;
mod writer;

pub use history::HistoryReader;
pub use writer::LedgerWriter;
