//! Income flows
//!
//! Two ways of producing the income side of the diagram and the take-home
//! figure the expense side is measured against:
//!
//! - [`TransactionIncome`] totals the credit transactions in the window.
//! - [`PaystubIncome`] scales a configured paycheck and its pretax
//!   deductions to the window length. Kept for older configurations.

use crate::config::{Config, IncomeSourceKind};
use crate::error::{SankeyError, SankeyResult};
use crate::models::{
    percent_of, CategorySums, FlowLine, Transaction, TransactionKind, TOTAL_INCOME,
};
use crate::services::{filter_transactions, summarize_transactions, TransactionFilter};

/// Length of one pay period in days
pub const PAY_PERIOD_DAYS: f64 = 14.0;

/// Something that can emit the income half of the diagram
pub trait IncomeSource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Append income flow lines and return the take-home amount
    fn emit(&self, lines: &mut Vec<FlowLine>) -> SankeyResult<i64>;
}

/// Pick the income source the configuration asks for
pub fn income_source_for(
    config: &Config,
    transactions: &[Transaction],
) -> SankeyResult<Box<dyn IncomeSource>> {
    Ok(match config.transactions.income_source {
        IncomeSourceKind::Transactions => {
            Box::new(TransactionIncome::from_config(config, transactions)?)
        }
        IncomeSourceKind::Paystub => Box::new(PaystubIncome::from_config(config)),
    })
}

/// Income taken from credit transactions
#[derive(Debug, Clone)]
pub struct TransactionIncome {
    sums: CategorySums,
    use_percentages: bool,
}

impl TransactionIncome {
    pub fn new(sums: CategorySums, use_percentages: bool) -> Self {
        Self {
            sums,
            use_percentages,
        }
    }

    /// Filter and summarize the credits in the configured window
    pub fn from_config(config: &Config, transactions: &[Transaction]) -> SankeyResult<Self> {
        let rules = &config.transactions;
        let filter = TransactionFilter::from_config(config, TransactionKind::Credit);
        let credits = filter_transactions(transactions, &filter);
        let sums =
            summarize_transactions(&credits, rules.prefer_labels, rules.category_threshold)?;

        Ok(Self::new(sums, rules.use_percentages))
    }
}

impl IncomeSource for TransactionIncome {
    fn name(&self) -> &'static str {
        "transactions"
    }

    /// One `{category} [amount] Total Income` line per income category,
    /// largest first
    fn emit(&self, lines: &mut Vec<FlowLine>) -> SankeyResult<i64> {
        let total = self.sums.total();

        for (name, value) in self.sums.sorted_desc() {
            let amount = if self.use_percentages {
                percent_of(value, total)
            } else {
                value
            };
            lines.push(FlowLine::new(name, amount, TOTAL_INCOME));
        }

        Ok(total)
    }
}

/// Income derived from a fixed paycheck
#[derive(Debug, Clone)]
pub struct PaystubIncome {
    net_earnings: f64,
    pretax: Vec<(String, f64)>,
    scale: f64,
    use_percentages: bool,
}

impl PaystubIncome {
    /// `scale` is the number of pay periods covered by the report
    pub fn new(
        net_earnings: f64,
        pretax: Vec<(String, f64)>,
        scale: f64,
        use_percentages: bool,
    ) -> Self {
        Self {
            net_earnings,
            pretax,
            scale,
            use_percentages,
        }
    }

    /// Scale the configured paycheck to the report window
    pub fn from_config(config: &Config) -> Self {
        let scale = config.window().days() as f64 / PAY_PERIOD_DAYS;
        Self::new(
            config.paycheck.net_earnings,
            config.paycheck.pretax.clone(),
            scale,
            config.transactions.use_percentages,
        )
    }

    /// `100 * value / base` in whole percent, 0 for a zero base
    fn ratio(value: f64, base: f64) -> SankeyResult<i64> {
        if base == 0.0 {
            Ok(0)
        } else {
            whole_units(100.0 * value / base)
        }
    }

    /// Share of the scaled paycheck left after deductions, in whole percent
    ///
    /// Divides by earnings and then by the scale, in that order, so the
    /// truncated figure matches configurations written for the paycheck
    /// layout.
    fn remaining_percent(&self, take_home: f64) -> SankeyResult<i64> {
        if self.net_earnings == 0.0 || self.scale == 0.0 {
            Ok(0)
        } else {
            whole_units(100.0 * take_home / self.net_earnings / self.scale)
        }
    }
}

/// Truncate toward zero, rejecting values outside the `i64` range
fn whole_units(value: f64) -> SankeyResult<i64> {
    let whole = value.trunc();
    // `i64::MIN as f64` is exact and `i64::MAX as f64` rounds up to 2^63
    if whole.is_nan() || whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return Err(SankeyError::Overflow(format!(
            "paycheck amount {} does not fit",
            value
        )));
    }
    Ok(whole as i64)
}

impl IncomeSource for PaystubIncome {
    fn name(&self) -> &'static str {
        "paystub"
    }

    /// `Spending -> Wages`, then `Wages -> {deduction}` largest first, then
    /// `Wages -> Total Income` for what is left
    fn emit(&self, lines: &mut Vec<FlowLine>) -> SankeyResult<i64> {
        let mut take_home = self.net_earnings * self.scale;

        let wages = if self.use_percentages {
            100
        } else {
            whole_units(take_home)?
        };
        lines.push(FlowLine::new("Spending", wages, "Wages"));

        let mut pretax: Vec<&(String, f64)> = self.pretax.iter().collect();
        pretax.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (name, value) in pretax {
            let amount = if self.use_percentages {
                Self::ratio(*value, self.net_earnings)?
            } else {
                whole_units(value * self.scale)?
            };
            lines.push(FlowLine::new("Wages", amount, name.as_str()));
            take_home -= value * self.scale;
        }

        let take_home_units = whole_units(take_home)?;
        let remaining = if self.use_percentages {
            self.remaining_percent(take_home)?
        } else {
            take_home_units
        };
        lines.push(FlowLine::new("Wages", remaining, TOTAL_INCOME));

        Ok(take_home_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(lines: &[FlowLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    fn income_sums() -> CategorySums {
        CategorySums::from_pairs([("Interest", 25), ("Paycheck", 900), ("Refund", 75)]).unwrap()
    }

    #[test]
    fn test_transaction_income_absolute() {
        let mut lines = Vec::new();
        let take_home = TransactionIncome::new(income_sums(), false)
            .emit(&mut lines)
            .unwrap();

        assert_eq!(take_home, 1000);
        assert_eq!(
            render(&lines),
            vec![
                "Paycheck [900] Total Income",
                "Refund [75] Total Income",
                "Interest [25] Total Income",
            ]
        );
    }

    #[test]
    fn test_transaction_income_percentages() {
        let sums = CategorySums::from_pairs([("Paycheck", 2), ("Refund", 1)]).unwrap();
        let mut lines = Vec::new();
        let take_home = TransactionIncome::new(sums, true)
            .emit(&mut lines)
            .unwrap();

        assert_eq!(take_home, 3);
        assert_eq!(
            render(&lines),
            vec!["Paycheck [66] Total Income", "Refund [33] Total Income"]
        );
    }

    #[test]
    fn test_transaction_income_empty() {
        let mut lines = Vec::new();
        let take_home = TransactionIncome::new(CategorySums::new(), true)
            .emit(&mut lines)
            .unwrap();

        assert_eq!(take_home, 0);
        assert!(lines.is_empty());
    }

    fn paystub(scale: f64, use_percentages: bool) -> PaystubIncome {
        PaystubIncome::new(
            1000.0,
            vec![
                ("Social Security".to_string(), 30.0),
                ("Federal Income Tax".to_string(), 100.0),
            ],
            scale,
            use_percentages,
        )
    }

    #[test]
    fn test_paystub_single_period() {
        let mut lines = Vec::new();
        let take_home = paystub(1.0, false).emit(&mut lines).unwrap();

        assert_eq!(take_home, 870);
        assert_eq!(
            render(&lines),
            vec![
                "Spending [1000] Wages",
                "Wages [100] Federal Income Tax",
                "Wages [30] Social Security",
                "Wages [870] Total Income",
            ]
        );
    }

    #[test]
    fn test_paystub_scaled() {
        let mut lines = Vec::new();
        let take_home = paystub(2.5, false).emit(&mut lines).unwrap();

        assert_eq!(take_home, 2175);
        assert_eq!(lines[1], FlowLine::new("Wages", 250, "Federal Income Tax"));
        assert_eq!(lines[3], FlowLine::new("Wages", 2175, TOTAL_INCOME));
    }

    #[test]
    fn test_paystub_percentages() {
        let mut lines = Vec::new();
        let take_home = paystub(2.0, true).emit(&mut lines).unwrap();

        assert_eq!(take_home, 1740);
        assert_eq!(
            render(&lines),
            vec![
                "Spending [100] Wages",
                "Wages [10] Federal Income Tax",
                "Wages [3] Social Security",
                "Wages [87] Total Income",
            ]
        );
    }

    #[test]
    fn test_paystub_zero_scale() {
        let mut lines = Vec::new();
        let take_home = paystub(0.0, true).emit(&mut lines).unwrap();

        assert_eq!(take_home, 0);
        assert_eq!(lines.last().unwrap().amount, 0);
    }

    #[test]
    fn test_paystub_remaining_percent_divides_in_order() {
        let income = PaystubIncome::new(
            1019.3,
            vec![("Federal Income Tax".to_string(), 203.86)],
            24.14,
            true,
        );
        let mut lines = Vec::new();
        income.emit(&mut lines).unwrap();
        assert_eq!(lines[2], FlowLine::new("Wages", 79, TOTAL_INCOME));

        let income = PaystubIncome::new(1254.89, Vec::new(), 16.76, true);
        let mut lines = Vec::new();
        income.emit(&mut lines).unwrap();
        assert_eq!(lines[1], FlowLine::new("Wages", 99, TOTAL_INCOME));
    }

    #[test]
    fn test_paystub_out_of_range_is_an_error() {
        let income = PaystubIncome::new(1e30, Vec::new(), 1.0, false);
        let err = income.emit(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, SankeyError::Overflow(_)));

        let income = PaystubIncome::new(1000.0, vec![("Tax".to_string(), f64::MAX)], 2.0, true);
        assert!(income.emit(&mut Vec::new()).is_err());
    }

    #[test]
    fn test_income_source_selection() {
        use crate::config::settings::tests::SAMPLE;

        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(income_source_for(&config, &[]).unwrap().name(), "transactions");

        let yaml = SAMPLE.replace(
            "  use_percentages: false\n",
            "  use_percentages: false\n  income_source: paystub\n",
        );
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(income_source_for(&config, &[]).unwrap().name(), "paystub");
    }
}
