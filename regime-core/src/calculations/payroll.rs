//! Payroll withholdings and employer contributions.
//!
//! | Item | Side | Base |
//! |------|------|------|
//! | Pension contribution | employee | gross |
//! | Health insurance | employee | gross |
//! | Income tax | employee | gross − pension − health |
//! | Social payment | employer | gross |
//! | Employer health insurance | employer | gross |
//! | Social tax | employer | gross |
//! | Occupational injury insurance | employer | gross |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::PayrollRates;
//! use regime_core::calculations::PayrollCalculator;
//!
//! let rates = PayrollRates::default();
//! let breakdown = PayrollCalculator::new(&rates).calculate(dec!(1000000));
//!
//! // 100 000 pension + 20 000 health + 10% of 880 000 income tax
//! assert_eq!(breakdown.employee_total(), dec!(208000));
//! // 3.5% + 3% + 9.5% + 0.5%
//! assert_eq!(breakdown.employer_total(), dec!(165000));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::format_percent;
use crate::models::{PayrollBreakdown, PayrollItem, PayrollLine, PayrollRates};

/// Calculator for payroll withholdings and contributions.
#[derive(Debug, Clone)]
pub struct PayrollCalculator<'a> {
    rates: &'a PayrollRates,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(rates: &'a PayrollRates) -> Self {
        Self { rates }
    }

    /// Computes every line for an annual gross payroll.
    ///
    /// A zero payroll yields zero-valued lines rather than an empty table.
    pub fn calculate(
        &self,
        payroll_gross: Decimal,
    ) -> PayrollBreakdown {
        let pension = self.line(PayrollItem::Pension, self.rates.pension_rate, payroll_gross);
        let health = self.line(
            PayrollItem::EmployeeHealth,
            self.rates.employee_health_rate,
            payroll_gross,
        );
        let income_tax_base = payroll_gross - pension.amount - health.amount;
        let income_tax = self.line(
            PayrollItem::IncomeTax,
            self.rates.income_tax_rate,
            income_tax_base,
        );

        let employer_contributions = vec![
            self.line(
                PayrollItem::SocialPayment,
                self.rates.social_payment_rate,
                payroll_gross,
            ),
            self.line(
                PayrollItem::EmployerHealth,
                self.rates.employer_health_rate,
                payroll_gross,
            ),
            self.line(PayrollItem::SocialTax, self.rates.social_tax_rate, payroll_gross),
            self.line(
                PayrollItem::InjuryInsurance,
                self.rates.injury_rate,
                payroll_gross,
            ),
        ];

        PayrollBreakdown {
            payroll_gross,
            employee_withholdings: vec![pension, health, income_tax],
            employer_contributions,
        }
    }

    fn line(
        &self,
        item: PayrollItem,
        rate: Decimal,
        base: Decimal,
    ) -> PayrollLine {
        PayrollLine {
            item,
            label: format!("{} ({})", item.name(), format_percent(rate)),
            rate,
            amount: base * rate,
        }
    }
}
