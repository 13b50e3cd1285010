//! Sankey Report
//!
//! Runs the whole pipeline for one reporting window: the income pass
//! produces the take-home figure, the expense pass spends it, and the
//! resulting flow lines are written in emission order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{SankeyError, SankeyResult};
use crate::models::{DateWindow, FlowLine, Transaction, TransactionKind};
use crate::services::{
    filter_transactions, parse_ledger, summarize_transactions, TransactionFilter,
};

use super::expenses::{emit_expenses, ExpenseTotals};
use super::income::income_source_for;

/// A generated flow diagram
#[derive(Debug, Clone)]
pub struct SankeyReport {
    /// Window the report covers
    pub window: DateWindow,
    /// Income the expenses were measured against
    pub take_home: i64,
    /// Expense pass totals, in currency units
    pub totals: ExpenseTotals,
    /// Flow lines in emission order
    pub lines: Vec<FlowLine>,
}

impl SankeyReport {
    /// Generate the report for `transactions`
    pub fn generate(config: &Config, transactions: &[Transaction]) -> SankeyResult<Self> {
        let rules = &config.transactions;
        let mut lines = Vec::new();

        let income = income_source_for(config, transactions)?;
        let take_home = income.emit(&mut lines)?;
        log::debug!("Take-home from {} income: {}", income.name(), take_home);

        let filter = TransactionFilter::from_config(config, TransactionKind::Debit);
        let debits = filter_transactions(transactions, &filter);
        let sums =
            summarize_transactions(&debits, rules.prefer_labels, rules.category_threshold)?;

        let totals = emit_expenses(
            &sums,
            take_home,
            &config.categories,
            rules.use_percentages,
            &mut lines,
        )?;
        log::debug!(
            "Expenditure {} against take-home {}, savings {}",
            totals.expenditure,
            take_home,
            totals.savings
        );

        Ok(Self {
            window: config.window(),
            take_home,
            totals,
            lines,
        })
    }

    /// Write every line, newline-terminated, in emission order
    pub fn write_to<W: Write>(&self, writer: &mut W) -> SankeyResult<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line).map_err(|e| SankeyError::Export(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| SankeyError::Export(e.to_string()))?;
        Ok(())
    }

    /// Render the report as text
    pub fn to_text(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }

    /// Write the report to a file, creating parent directories as needed
    pub fn export(&self, path: &Path) -> SankeyResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SankeyError::Export(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            SankeyError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;

        log::info!("Wrote {} flow lines to {}", self.lines.len(), path.display());
        Ok(())
    }
}

/// Read the configured ledger, generate the report and write it
///
/// Returns the path the report was written to.
pub fn run(config: &Config) -> SankeyResult<PathBuf> {
    run_with_paths(config, &config.input_path(), &config.output_path())
}

/// Same as [`run`] with explicit input and output files
pub fn run_with_paths(config: &Config, input: &Path, output: &Path) -> SankeyResult<PathBuf> {
    let transactions = parse_ledger(input)?;
    let report = SankeyReport::generate(config, &transactions)?;
    report.export(output)?;
    Ok(output.to_path_buf())
}
