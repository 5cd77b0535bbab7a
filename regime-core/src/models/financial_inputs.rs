use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount accepted for any monetary input (10^18).
///
/// Annualising, applying rates and summing costs stay well inside the
/// range of [`Decimal`] below this bound.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// A monetary input outside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: Decimal },

    #[error("{field} must not exceed {max}, got {value}", max = MAX_AMOUNT)]
    TooLarge { field: String, value: Decimal },
}

/// Checks that `value` lies in `[0, MAX_AMOUNT]`.
///
/// ```
/// use rust_decimal::Decimal;
/// use regime_core::{InputError, check_amount};
///
/// assert!(check_amount("income", Decimal::ONE_HUNDRED).is_ok());
/// assert!(matches!(
///     check_amount("income", Decimal::MAX),
///     Err(InputError::TooLarge { .. })
/// ));
/// ```
pub fn check_amount(
    field: &str,
    value: Decimal,
) -> Result<Decimal, InputError> {
    if value < Decimal::ZERO {
        return Err(InputError::Negative {
            field: field.to_string(),
            value,
        });
    }
    if value > MAX_AMOUNT {
        return Err(InputError::TooLarge {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Period the caller's figures are denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Monthly,
    #[default]
    Annual,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Annual => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "month" | "monthly" => Some(Self::Monthly),
            "year" | "annual" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Number of periods in a year.
    pub fn periods_per_year(&self) -> Decimal {
        match self {
            Self::Monthly => Decimal::from(12),
            Self::Annual => Decimal::ONE,
        }
    }
}

/// A named deductible expense category.
///
/// An excluded category keeps the amount the caller entered but contributes
/// nothing to the deductible total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: Decimal,
    pub included: bool,
}

impl ExpenseCategory {
    pub fn included(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            included: true,
        }
    }

    pub fn excluded(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            included: false,
        }
    }
}

/// Financial figures supplied by the caller for one calculation request.
///
/// Monetary fields must lie in `[0, MAX_AMOUNT]`; see [`FinancialInputs::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInputs {
    pub income: Decimal,
    pub payroll_gross: Decimal,
    pub amortization: Decimal,
    pub expenses: Vec<ExpenseCategory>,
    pub period: Period,
}

impl FinancialInputs {
    /// Inputs carrying only income; every cost starts at zero.
    pub fn new(
        income: Decimal,
        period: Period,
    ) -> Self {
        Self {
            income,
            payroll_gross: Decimal::ZERO,
            amortization: Decimal::ZERO,
            expenses: Vec::new(),
            period,
        }
    }

    pub fn with_payroll(
        self,
        payroll_gross: Decimal,
    ) -> Self {
        Self {
            payroll_gross,
            ..self
        }
    }

    pub fn with_amortization(
        self,
        amortization: Decimal,
    ) -> Self {
        Self {
            amortization,
            ..self
        }
    }

    pub fn with_expense(
        mut self,
        expense: ExpenseCategory,
    ) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Checks every monetary field with [`check_amount`]. Expense
    /// categories are reported under their own name.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, in field order.
    pub fn validate(&self) -> Result<(), InputError> {
        check_amount("income", self.income)?;
        check_amount("payroll", self.payroll_gross)?;
        check_amount("amortization", self.amortization)?;
        for expense in &self.expenses {
            check_amount(&expense.name, expense.amount)?;
        }
        Ok(())
    }
}
