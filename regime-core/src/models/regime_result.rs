use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::to_money;
use crate::models::{EntityType, RegimeKind};

/// A soft condition attached to a regime result.
///
/// Warnings never abort a calculation. The only one tied to a numeric
/// adjustment is [`RegimeWarning::Loss`], which accompanies a tax floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RegimeWarning {
    /// The self-employed simplified regime was evaluated for an employer.
    EmployeesPresent,
    MonthlyCeilingExceeded {
        monthly_income: Decimal,
        ceiling: Decimal,
    },
    AnnualCeilingExceeded { income: Decimal, ceiling: Decimal },
    /// Income does not exceed deductible costs; no profit tax is due.
    Loss { profit: Decimal },
}

impl fmt::Display for RegimeWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::EmployeesPresent => {
                f.write_str("simplified regime for the self-employed is not applicable with employees")
            }
            Self::MonthlyCeilingExceeded {
                monthly_income,
                ceiling,
            } => write!(
                f,
                "average monthly income {} exceeds the simplified regime limit of {} per month",
                to_money(*monthly_income),
                ceiling
            ),
            Self::AnnualCeilingExceeded { income, ceiling } => write!(
                f,
                "annual income {} exceeds the simplified regime limit of {} per year",
                to_money(*income),
                ceiling
            ),
            Self::Loss { profit } if profit.is_zero() => {
                f.write_str("no taxable profit; no profit tax is due")
            }
            Self::Loss { profit } => write!(
                f,
                "loss of {}; no profit tax is due",
                to_money(-*profit)
            ),
        }
    }
}

/// Why a regime is not open to the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Individuals with employees cannot use the self-employed regime.
    EmployeesNotPermitted,
    EntityTypeNotEligible { entity: EntityType },
    AnnualCeilingExceeded { income: Decimal, ceiling: Decimal },
}

impl fmt::Display for UnavailableReason {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::EmployeesNotPermitted => {
                f.write_str("not available to individuals with employees")
            }
            Self::EntityTypeNotEligible { entity } => {
                write!(f, "not available to entity type '{}'", entity.as_str())
            }
            Self::AnnualCeilingExceeded { income, ceiling } => write!(
                f,
                "annual income {} exceeds the limit of {}",
                to_money(*income),
                ceiling
            ),
        }
    }
}

/// Outcome of evaluating one regime for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub kind: RegimeKind,
    /// Label of the regime's own tax line, e.g. `Single tax (4%)`.
    pub tax_line: String,
    pub tax_amount: Decimal,
    pub taxable_base: Decimal,
    pub warnings: Vec<RegimeWarning>,
    pub available: bool,
    pub unavailable_reason: Option<UnavailableReason>,
    /// Regime tax plus employer payroll contributions.
    pub entity_tax_burden: Decimal,
    pub net_income: Decimal,
}

impl RegimeResult {
    /// Warnings rendered as display strings, in the order they were raised.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}
