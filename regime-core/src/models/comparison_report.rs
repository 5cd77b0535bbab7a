use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EntityType, PayrollBreakdown, Period, RegimeKind, RegimeResult};

/// One row of the itemised deduction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub label: String,
    pub amount: Decimal,
}

/// Annualised costs deducted from income: each included expense category,
/// then payroll and amortization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub lines: Vec<DeductionLine>,
}

impl DeductionBreakdown {
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount).sum()
    }
}

/// An available regime that would beat the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative<'a> {
    pub result: &'a RegimeResult,
    /// Regime tax is lower than the primary regime's.
    pub lower_tax: bool,
    /// Net income is higher than under the primary regime.
    pub higher_net_income: bool,
}

/// Multi-regime comparison for a single request.
///
/// `results` holds every regime that was evaluated, available or not, in
/// enumeration order. `ranking` lists only the available ones, cheapest
/// first. When nothing is available `ranking` is empty and `recommended` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub entity_type: EntityType,
    pub has_employees: bool,
    pub period: Period,
    /// Annualised gross income every result was computed from.
    pub income: Decimal,
    pub results: Vec<RegimeResult>,
    pub ranking: Vec<RegimeKind>,
    pub recommended: Option<RegimeKind>,
    /// Regime the caller asked to see in detail, falling back to the recommendation.
    pub primary: Option<RegimeKind>,
    pub payroll: PayrollBreakdown,
    pub deductions: DeductionBreakdown,
}

impl ComparisonReport {
    pub fn result(
        &self,
        kind: RegimeKind,
    ) -> Option<&RegimeResult> {
        self.results.iter().find(|r| r.kind == kind)
    }

    pub fn primary_result(&self) -> Option<&RegimeResult> {
        self.primary.and_then(|kind| self.result(kind))
    }

    pub fn recommended_result(&self) -> Option<&RegimeResult> {
        self.recommended.and_then(|kind| self.result(kind))
    }

    /// Available regimes, other than the primary one, with a lower tax or a
    /// higher net income than the primary regime. Enumeration order.
    pub fn alternatives_to_primary(&self) -> Vec<Alternative<'_>> {
        let Some(primary) = self.primary_result() else {
            return Vec::new();
        };

        self.results
            .iter()
            .filter(|r| r.available && r.kind != primary.kind)
            .filter_map(|result| {
                let lower_tax = result.tax_amount < primary.tax_amount;
                let higher_net_income = result.net_income > primary.net_income;
                (lower_tax || higher_net_income).then_some(Alternative {
                    result,
                    lower_tax,
                    higher_net_income,
                })
            })
            .collect()
    }

    /// Whether any regime can be elected at all.
    pub fn has_available(&self) -> bool {
        !self.ranking.is_empty()
    }
}
