use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies a single payroll withholding or contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollItem {
    Pension,
    EmployeeHealth,
    IncomeTax,
    SocialPayment,
    EmployerHealth,
    SocialTax,
    InjuryInsurance,
}

impl PayrollItem {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pension => "Pension contribution",
            Self::EmployeeHealth => "Health insurance",
            Self::IncomeTax => "Income tax",
            Self::SocialPayment => "Social payment",
            Self::EmployerHealth => "Employer health insurance",
            Self::SocialTax => "Social tax",
            Self::InjuryInsurance => "Occupational injury insurance",
        }
    }

    /// Whether the item is withheld from the employee rather than paid by the employer.
    pub fn is_withholding(&self) -> bool {
        matches!(self, Self::Pension | Self::EmployeeHealth | Self::IncomeTax)
    }
}

/// One computed payroll line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    pub item: PayrollItem,
    /// Display label including the rate, e.g. `Social tax (9.5%)`.
    pub label: String,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Payroll withholdings and employer contributions for an annual gross payroll.
///
/// Employee withholdings are informational: they are paid out of gross pay
/// and never form part of the entity's own tax burden. Totals are derived on
/// demand rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub payroll_gross: Decimal,
    pub employee_withholdings: Vec<PayrollLine>,
    pub employer_contributions: Vec<PayrollLine>,
}

impl PayrollBreakdown {
    pub fn employee_total(&self) -> Decimal {
        self.employee_withholdings.iter().map(|l| l.amount).sum()
    }

    pub fn employer_total(&self) -> Decimal {
        self.employer_contributions.iter().map(|l| l.amount).sum()
    }

    /// Looks up a line by item in either table.
    pub fn line(
        &self,
        item: PayrollItem,
    ) -> Option<&PayrollLine> {
        self.employee_withholdings
            .iter()
            .chain(&self.employer_contributions)
            .find(|l| l.item == item)
    }
}
