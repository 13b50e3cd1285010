//! Expense and savings flows
//!
//! Spreads take-home income over spending categories. Categories that
//! belong to a configured group are routed through the group node; the rest
//! leave `Total Income` directly. Whatever is not spent goes to savings, and
//! overspending is drawn from savings.

use std::collections::HashSet;

use crate::config::CategoryGroup;
use crate::error::{SankeyError, SankeyResult};
use crate::models::{
    percent_of, CategorySums, FlowLine, FROM_SAVINGS, TOTAL_INCOME, TO_SAVINGS,
};

/// Outcome of the expense pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseTotals {
    /// Sum of every emitted category, in currency units
    pub expenditure: i64,
    /// `take_home - expenditure`, in currency units
    pub savings: i64,
}

/// Append expense lines for `sums` and the closing savings line
///
/// Group member lines and group rollups always carry currency units;
/// ungrouped categories and the savings line become percentages of
/// `take_home` when `use_percentages` is set. Sums are taken in `i128`, and
/// a rollup, expenditure or savings figure outside the `i64` range is an
/// error.
pub fn emit_expenses(
    sums: &CategorySums,
    take_home: i64,
    groups: &[CategoryGroup],
    use_percentages: bool,
    lines: &mut Vec<FlowLine>,
) -> SankeyResult<ExpenseTotals> {
    let sorted = sums.sorted_desc();
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut expenditure: i128 = 0;

    for group in groups {
        let mut subtotal: i128 = 0;
        for &(name, value) in &sorted {
            if consumed.contains(name) || !group.includes(name) {
                continue;
            }
            lines.push(FlowLine::new(group.name.as_str(), value, name));
            subtotal += i128::from(value);
            consumed.insert(name);
        }

        if subtotal > 0 {
            let rollup = to_amount(subtotal, &group.name)?;
            lines.push(FlowLine::new(TOTAL_INCOME, rollup, group.name.as_str()));
        }
        expenditure += subtotal;
    }

    for &(name, value) in &sorted {
        if consumed.contains(name) {
            continue;
        }
        let amount = if use_percentages {
            percent_of(value, take_home)
        } else {
            value
        };
        lines.push(FlowLine::new(TOTAL_INCOME, amount, name));
        expenditure += i128::from(value);
    }

    let savings = to_amount(i128::from(take_home) - expenditure, "savings")?;
    lines.push(savings_line(savings, take_home, use_percentages));

    Ok(ExpenseTotals {
        expenditure: to_amount(expenditure, "expenditure")?,
        savings,
    })
}

fn to_amount(value: i128, what: &str) -> SankeyResult<i64> {
    i64::try_from(value)
        .map_err(|_| SankeyError::Overflow(format!("{} of {} does not fit", what, value)))
}

/// `Total Income -> To Savings`, or `From Savings -> Total Income` when the
/// period spent more than it earned
fn savings_line(savings: i64, take_home: i64, use_percentages: bool) -> FlowLine {
    let amount = if use_percentages {
        percent_of(savings, take_home)
    } else {
        savings
    };

    if amount < 0 {
        FlowLine::new(FROM_SAVINGS, amount.saturating_neg(), TOTAL_INCOME)
    } else {
        FlowLine::new(TOTAL_INCOME, amount, TO_SAVINGS)
    }
}
