//! Cross-regime comparison and recommendation.
//!
//! For each evaluated regime the entity's own burden is the regime tax plus
//! employer payroll contributions. Employee withholdings come out of gross
//! pay and are excluded. Net income is income less included expenses,
//! payroll, amortization and that burden.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{
    EligibilityEvaluator, PayrollCalculator, RegimeEvaluator, RegimeInputs, annualize_inputs,
};
use crate::models::{
    ComparisonReport, EntityType, FinancialInputs, RegimeConfig, RegimeKind, RegimeResult,
};

/// A single calculation request from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub entity_type: EntityType,
    pub has_employees: bool,
    pub inputs: FinancialInputs,
    /// Regimes the caller wants shown in addition to the eligible ones.
    /// The first entry is the primary regime shown in detail.
    #[serde(default)]
    pub selected: Vec<RegimeKind>,
}

impl ComparisonRequest {
    pub fn new(
        entity_type: EntityType,
        has_employees: bool,
        inputs: FinancialInputs,
    ) -> Self {
        Self {
            entity_type,
            has_employees,
            inputs,
            selected: Vec::new(),
        }
    }

    pub fn with_selected(
        self,
        selected: Vec<RegimeKind>,
    ) -> Self {
        Self { selected, ..self }
    }
}

/// Runs eligibility, payroll and every relevant regime rule for a request.
#[derive(Debug, Clone)]
pub struct ComparisonEngine<'a> {
    config: &'a RegimeConfig,
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(config: &'a RegimeConfig) -> Self {
        Self { config }
    }

    /// Builds the comparison report for `request`.
    ///
    /// Results cover every eligible regime plus any the caller selected, in
    /// enumeration order. Selected regimes the entity cannot elect are still
    /// computed and returned with `available = false` and a reason.
    pub fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> ComparisonReport {
        let figures = annualize_inputs(&request.inputs);
        let eligibility = EligibilityEvaluator::new(self.config);
        let eligible =
            eligibility.eligible_regimes(request.entity_type, request.has_employees, figures.income);

        let payroll = PayrollCalculator::new(&self.config.payroll).calculate(figures.payroll_gross);
        let employer_total = payroll.employer_total();
        let costs = figures.expenses_total() + figures.payroll_gross + figures.amortization;

        let regime_inputs = RegimeInputs::from_annual(&figures, request.has_employees);
        let evaluator = RegimeEvaluator::new(self.config);

        let results: Vec<RegimeResult> = RegimeKind::ALL
            .into_iter()
            .filter(|kind| eligible.contains(kind) || request.selected.contains(kind))
            .map(|kind| {
                let availability = eligibility.assess(
                    kind,
                    request.entity_type,
                    request.has_employees,
                    figures.income,
                );
                let assessment = evaluator.evaluate(kind, &regime_inputs);
                let entity_tax_burden = assessment.tax_amount + employer_total;

                RegimeResult {
                    kind,
                    tax_line: assessment.tax_line,
                    tax_amount: assessment.tax_amount,
                    taxable_base: assessment.taxable_base,
                    warnings: assessment.warnings,
                    available: availability.is_ok(),
                    unavailable_reason: availability.err(),
                    entity_tax_burden,
                    net_income: figures.income - costs - entity_tax_burden,
                }
            })
            .collect();

        let ranking = rank(&results);
        let recommended = ranking.first().copied();
        let primary = request.selected.first().copied().or(recommended);

        match recommended {
            Some(kind) => debug!(
                entity = request.entity_type.as_str(),
                recommended = kind.as_str(),
                evaluated = results.len(),
                "comparison complete"
            ),
            None => debug!(
                entity = request.entity_type.as_str(),
                "no regime available"
            ),
        }

        ComparisonReport {
            entity_type: request.entity_type,
            has_employees: request.has_employees,
            period: request.inputs.period,
            income: figures.income,
            deductions: figures.deduction_breakdown(),
            results,
            ranking,
            recommended,
            primary,
            payroll,
        }
    }
}

/// Available regimes ordered by burden, ties broken by enumeration order.
fn rank(results: &[RegimeResult]) -> Vec<RegimeKind> {
    let mut available: Vec<(Decimal, RegimeKind)> = results
        .iter()
        .filter(|r| r.available)
        .map(|r| (r.entity_tax_burden, r.kind))
        .collect();
    available.sort();
    available.into_iter().map(|(_, kind)| kind).collect()
}
