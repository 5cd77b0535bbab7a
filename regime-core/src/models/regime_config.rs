use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a rate table fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A percentage rate lies outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },

    /// An income ceiling is zero or negative.
    #[error("{field} must be positive, got {value}")]
    InvalidCeiling { field: &'static str, value: Decimal },
}

/// Payroll withholding and contribution rates.
///
/// Employee withholdings (pension, health, income tax) are deducted from
/// gross pay; employer contributions are paid on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRates {
    /// Mandatory pension contribution withheld from the employee.
    pub pension_rate: Decimal,
    /// Employee share of compulsory health insurance.
    pub employee_health_rate: Decimal,
    /// Individual income tax, applied to gross less pension and health withholdings.
    pub income_tax_rate: Decimal,
    /// Employer social payment.
    pub social_payment_rate: Decimal,
    /// Employer share of compulsory health insurance.
    pub employer_health_rate: Decimal,
    pub social_tax_rate: Decimal,
    /// Occupational-injury insurance.
    pub injury_rate: Decimal,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            pension_rate: Decimal::new(10, 2),
            employee_health_rate: Decimal::new(2, 2),
            income_tax_rate: Decimal::new(10, 2),
            social_payment_rate: Decimal::new(35, 3),
            employer_health_rate: Decimal::new(3, 2),
            social_tax_rate: Decimal::new(95, 3),
            injury_rate: Decimal::new(5, 3),
        }
    }
}

/// Rates and thresholds for every regime the engine evaluates.
///
/// The value is fixed once the engine is built; substitute a different table
/// by constructing a new engine.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::RegimeConfig;
///
/// let config = RegimeConfig {
///     company_profit_rate: dec!(0.15),
///     ..RegimeConfig::default()
/// };
///
/// assert_eq!(config.validate(), Ok(()));
/// assert_eq!(config.simplified_rate, dec!(0.04));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    /// Flat rate applied to gross income under both simplified regimes.
    pub simplified_rate: Decimal,
    /// Profit tax rate for sole proprietors on the general regime.
    pub proprietor_profit_rate: Decimal,
    /// Corporate income tax rate on the general regime.
    pub company_profit_rate: Decimal,
    /// Average monthly income above which the simplified regime warns.
    pub simplified_monthly_ceiling: Decimal,
    /// Annual income above which the simplified regime is unavailable.
    pub simplified_annual_ceiling: Decimal,
    pub payroll: PayrollRates,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            simplified_rate: Decimal::new(4, 2),
            proprietor_profit_rate: Decimal::new(10, 2),
            company_profit_rate: Decimal::new(20, 2),
            simplified_monthly_ceiling: Decimal::from(1_300_000u64),
            simplified_annual_ceiling: Decimal::from(2_500_000_000u64),
            payroll: PayrollRates::default(),
        }
    }
}

impl RegimeConfig {
    /// Validates every rate and ceiling, reporting the first offending field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - any rate is not in `[0, 1]`
    /// - either simplified-regime ceiling is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("simplified_rate", self.simplified_rate),
            ("proprietor_profit_rate", self.proprietor_profit_rate),
            ("company_profit_rate", self.company_profit_rate),
            ("payroll.pension_rate", self.payroll.pension_rate),
            ("payroll.employee_health_rate", self.payroll.employee_health_rate),
            ("payroll.income_tax_rate", self.payroll.income_tax_rate),
            ("payroll.social_payment_rate", self.payroll.social_payment_rate),
            ("payroll.employer_health_rate", self.payroll.employer_health_rate),
            ("payroll.social_tax_rate", self.payroll.social_tax_rate),
            ("payroll.injury_rate", self.payroll.injury_rate),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::InvalidRate { field, value });
            }
        }

        let ceilings = [
            ("simplified_monthly_ceiling", self.simplified_monthly_ceiling),
            ("simplified_annual_ceiling", self.simplified_annual_ceiling),
        ];
        for (field, value) in ceilings {
            if value <= Decimal::ZERO {
                return Err(ConfigError::InvalidCeiling { field, value });
            }
        }

        Ok(())
    }
}
