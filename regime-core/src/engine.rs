//! Entry point tying the calculation stages to one validated rate table.

use rust_decimal::Decimal;

use crate::calculations::{
    AnnualFigures, ComparisonEngine, EligibilityEvaluator, PayrollCalculator, RegimeAssessment,
    RegimeEvaluator, RegimeInputs, annualize_inputs,
};
use crate::models::{
    ComparisonReport, ConfigError, EntityType, FinancialInputs, InputError, PayrollBreakdown,
    RegimeConfig, RegimeKind,
};

pub use crate::calculations::comparison::ComparisonRequest;

/// Tax engine bound to an immutable [`RegimeConfig`].
///
/// The configuration is validated once in [`TaxEngine::new`]; every
/// per-request operation is then infallible and free of side effects, so a
/// single engine can be shared across threads.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::{
///     ComparisonRequest, EntityType, FinancialInputs, Period, RegimeConfig, RegimeKind, TaxEngine,
/// };
///
/// let engine = TaxEngine::new(RegimeConfig::default()).unwrap();
///
/// let request = ComparisonRequest::new(
///     EntityType::Farm,
///     false,
///     FinancialInputs::new(dec!(1000000), Period::Monthly),
/// );
/// let report = engine.compare(&request);
///
/// assert_eq!(report.recommended, Some(RegimeKind::SimplifiedEntity));
/// assert_eq!(report.results[0].tax_amount, dec!(480000));
/// ```
#[derive(Debug, Clone)]
pub struct TaxEngine {
    config: RegimeConfig,
}

impl TaxEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any rate or ceiling is out of range.
    pub fn new(config: RegimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    pub fn annualize(
        &self,
        inputs: &FinancialInputs,
    ) -> AnnualFigures {
        annualize_inputs(inputs)
    }

    pub fn payroll(
        &self,
        payroll_gross_annual: Decimal,
    ) -> PayrollBreakdown {
        PayrollCalculator::new(&self.config.payroll).calculate(payroll_gross_annual)
    }

    pub fn eligible_regimes(
        &self,
        entity: EntityType,
        has_employees: bool,
        income_annual: Decimal,
    ) -> Vec<RegimeKind> {
        EligibilityEvaluator::new(&self.config).eligible_regimes(entity, has_employees, income_annual)
    }

    pub fn evaluate(
        &self,
        kind: RegimeKind,
        inputs: &RegimeInputs,
    ) -> RegimeAssessment {
        RegimeEvaluator::new(&self.config).evaluate(kind, inputs)
    }

    /// Compares regimes for inputs already checked with
    /// [`FinancialInputs::validate`].
    ///
    /// # Panics
    ///
    /// Decimal arithmetic overflows if an amount exceeds
    /// [`MAX_AMOUNT`](crate::MAX_AMOUNT) by many orders of magnitude. Use
    /// [`TaxEngine::try_compare`] for unchecked input.
    pub fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> ComparisonReport {
        ComparisonEngine::new(&self.config).compare(request)
    }

    /// Validates the request's amounts, then compares.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if any amount is negative or above
    /// [`MAX_AMOUNT`](crate::MAX_AMOUNT).
    pub fn try_compare(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonReport, InputError> {
        request.inputs.validate()?;
        Ok(self.compare(request))
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self {
            config: RegimeConfig::default(),
        }
    }
}
