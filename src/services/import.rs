//! Ledger import service
//!
//! Reads a transaction ledger CSV export into [`Transaction`] values. The
//! expected columns are:
//!
//! | # | Column | Use |
//! |---|---|---|
//! | 0 | Date (`MM/DD/YYYY`) | transaction date |
//! | 1 | Description | vendor |
//! | 2 | Original description | ignored |
//! | 3 | Amount | truncated to whole units |
//! | 4 | Transaction type | `debit`, anything else is a credit |
//! | 5 | Category | category |
//! | 6 | Account name | ignored |
//! | 7 | Labels | label, may be empty |
//!
//! The first row is a header. Any row that cannot be read aborts the whole
//! import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder};

use crate::config::settings::DATE_FORMAT;
use crate::error::{SankeyError, SankeyResult};
use crate::models::Transaction;

const DATE_COLUMN: usize = 0;
const VENDOR_COLUMN: usize = 1;
const AMOUNT_COLUMN: usize = 3;
const TYPE_COLUMN: usize = 4;
const CATEGORY_COLUMN: usize = 5;
const LABEL_COLUMN: usize = 7;

/// Minimum number of fields a ledger row must have
pub const MIN_FIELDS: usize = LABEL_COLUMN + 1;

/// Marker in the type column that identifies a debit
pub const DEBIT_MARKER: &str = "debit";

/// Read every transaction from a ledger file
pub fn parse_ledger(path: &Path) -> SankeyResult<Vec<Transaction>> {
    let file = File::open(path).map_err(|e| {
        SankeyError::Io(format!("Failed to open ledger {}: {}", path.display(), e))
    })?;

    let transactions = parse_ledger_from_reader(file)?;
    log::info!(
        "Read {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Read every transaction from a ledger stream
pub fn parse_ledger_from_reader<R: Read>(reader: R) -> SankeyResult<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        let more = reader.read_byte_record(&mut record).map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            SankeyError::malformed(line, format!("Error reading CSV record: {}", e))
        })?;
        if !more {
            break;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        transactions.push(parse_record(&record, line)?);
    }

    Ok(transactions)
}

/// Turn one ledger row into a transaction
fn parse_record(record: &ByteRecord, line: u64) -> SankeyResult<Transaction> {
    if record.len() < MIN_FIELDS {
        return Err(SankeyError::malformed(
            line,
            format!("expected at least {} fields, found {}", MIN_FIELDS, record.len()),
        ));
    }

    let field = |idx: usize| decode_field(record.get(idx).unwrap_or_default());

    let date = parse_date(&field(DATE_COLUMN)).map_err(|e| SankeyError::malformed(line, e))?;
    let amount =
        parse_amount(&field(AMOUNT_COLUMN)).map_err(|e| SankeyError::malformed(line, e))?;
    let is_debit = field(TYPE_COLUMN) == DEBIT_MARKER;

    Ok(
        Transaction::new(date, field(VENDOR_COLUMN), amount, is_debit, field(CATEGORY_COLUMN))
            .with_label(field(LABEL_COLUMN)),
    )
}

/// Decode a field as UTF-8, or as ISO-8859-1 when it is not valid UTF-8
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("Could not parse date: '{}'", s))
}

/// Parse an amount, truncating toward zero to whole units
fn parse_amount(s: &str) -> Result<i64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Could not parse amount: '{}'", s))?;

    if !value.is_finite() {
        return Err(format!("Amount is not a finite number: '{}'", s));
    }

    let whole = value.trunc();
    if whole < 0.0 {
        return Err(format!("Amount must not be negative: '{}'", s));
    }
    // `i64::MAX as f64` rounds up to 2^63, the first value that does not fit
    if whole >= i64::MAX as f64 {
        return Err(format!("Amount is out of range: '{}'", s));
    }
    Ok(whole as i64)
}
