//! Service layer for sankey-gen
//!
//! The service layer turns raw ledger data into category totals: importing
//! the ledger, filtering it for one report pass and summarizing it.

pub mod filter;
pub mod import;
pub mod summary;

pub use filter::{filter_transactions, TransactionFilter};
pub use import::{parse_ledger, parse_ledger_from_reader};
pub use summary::summarize_transactions;
