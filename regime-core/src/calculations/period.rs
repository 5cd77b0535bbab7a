//! Conversion of caller figures to annual amounts.
//!
//! Every later stage works on annual values, so normalisation happens once,
//! before eligibility, payroll or regime rules run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{DeductionBreakdown, DeductionLine, FinancialInputs, Period};

/// Annualises a single amount.
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::Period;
/// use regime_core::calculations::annualize;
///
/// assert_eq!(annualize(dec!(1000000), Period::Monthly), dec!(12000000));
/// assert_eq!(annualize(dec!(1000000), Period::Annual), dec!(1000000));
/// ```
pub fn annualize(
    value: Decimal,
    period: Period,
) -> Decimal {
    value * period.periods_per_year()
}

/// Annual figures derived from [`FinancialInputs`].
///
/// Only included expense categories are carried over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualFigures {
    pub income: Decimal,
    pub payroll_gross: Decimal,
    pub amortization: Decimal,
    pub expenses: Vec<DeductionLine>,
}

impl AnnualFigures {
    pub fn expenses_total(&self) -> Decimal {
        self.expenses.iter().map(|l| l.amount).sum()
    }

    /// Income less expenses, payroll and amortization. May be negative.
    pub fn profit(&self) -> Decimal {
        self.income - self.expenses_total() - self.payroll_gross - self.amortization
    }

    /// Itemised deductions: included expenses, then payroll and amortization.
    pub fn deduction_breakdown(&self) -> DeductionBreakdown {
        let mut lines = self.expenses.clone();
        lines.push(DeductionLine {
            label: "Payroll".to_string(),
            amount: self.payroll_gross,
        });
        lines.push(DeductionLine {
            label: "Amortization".to_string(),
            amount: self.amortization,
        });
        DeductionBreakdown { lines }
    }
}

/// Annualises every monetary field of `inputs`, leaving `inputs` untouched.
pub fn annualize_inputs(inputs: &FinancialInputs) -> AnnualFigures {
    let period = inputs.period;
    debug!(
        period = period.as_str(),
        multiplier = %period.periods_per_year(),
        "annualising inputs"
    );

    let expenses = inputs
        .expenses
        .iter()
        .filter(|e| e.included)
        .map(|e| DeductionLine {
            label: e.name.clone(),
            amount: annualize(e.amount, period),
        })
        .collect();

    AnnualFigures {
        income: annualize(inputs.income, period),
        payroll_gross: annualize(inputs.payroll_gross, period),
        amortization: annualize(inputs.amortization, period),
        expenses,
    }
}
