//! Flow lines
//!
//! One line of SankeyMatic input: a quantity moving from a source node to a
//! target node, written as `Source [Amount] Target`.

use std::fmt;

/// Node every income flow runs into and every expense flow leaves from
pub const TOTAL_INCOME: &str = "Total Income";

/// Target of a positive savings residual
pub const TO_SAVINGS: &str = "To Savings";

/// Source of a negative savings residual
pub const FROM_SAVINGS: &str = "From Savings";

/// A single flow between two diagram nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLine {
    pub source: String,
    pub amount: i64,
    pub target: String,
}

impl FlowLine {
    pub fn new(source: impl Into<String>, amount: i64, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            amount,
            target: target.into(),
        }
    }
}

impl fmt::Display for FlowLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.source, self.amount, self.target)
    }
}

/// `100 * value / base`, truncated toward zero
///
/// A zero base yields 0. The product is taken in `i128`, so any pair of
/// `i64` inputs is valid; a quotient beyond the `i64` range saturates.
pub fn percent_of(value: i64, base: i64) -> i64 {
    if base == 0 {
        return 0;
    }
    let percent = 100 * i128::from(value) / i128::from(base);
    percent.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
