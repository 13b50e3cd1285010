//! Reports module for sankey-gen
//!
//! Builds the SankeyMatic flow diagram: income flows into `Total Income`,
//! expense flows out of it, and the savings residual closes the balance.

pub mod expenses;
pub mod income;
pub mod sankey;

pub use expenses::{emit_expenses, ExpenseTotals};
pub use income::{income_source_for, IncomeSource, PaystubIncome, TransactionIncome};
pub use sankey::{run, run_with_paths, SankeyReport};
