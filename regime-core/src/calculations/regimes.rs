//! Per-regime tax rules.
//!
//! | Regime | Taxable base | Rate | Warnings |
//! |--------|--------------|------|----------|
//! | Simplified, self-employed | gross income | 4% | employees present, monthly ceiling, annual ceiling |
//! | Simplified, retail | gross income | 4% | monthly ceiling, annual ceiling |
//! | General, sole proprietor | max(0, profit) | 10% | loss |
//! | General, company | max(0, profit) | 20% | loss |
//!
//! where profit is income less included expenses, payroll and amortization.
//! Rates come from [`RegimeConfig`]. Every rule is total over non-negative
//! inputs: conditions are reported as warnings, never as errors.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::{RegimeConfig, RegimeKind, RegimeWarning};
//! use regime_core::calculations::{RegimeEvaluator, RegimeInputs};
//!
//! let config = RegimeConfig::default();
//! let evaluator = RegimeEvaluator::new(&config);
//!
//! let inputs = RegimeInputs {
//!     income: dec!(5000000),
//!     payroll_gross: dec!(3000000),
//!     expenses_included: dec!(2500000),
//!     amortization: dec!(0),
//!     has_employees: true,
//! };
//!
//! let result = evaluator.evaluate(RegimeKind::GeneralCompany, &inputs);
//! assert_eq!(result.tax_amount, dec!(0));
//! assert_eq!(result.warnings, vec![RegimeWarning::Loss { profit: dec!(-500000) }]);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::AnnualFigures;
use crate::calculations::common::{format_percent, max};
use crate::models::{RegimeConfig, RegimeKind, RegimeWarning};

/// Annual figures a regime rule is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeInputs {
    pub income: Decimal,
    pub payroll_gross: Decimal,
    /// Total of included expense categories.
    pub expenses_included: Decimal,
    pub amortization: Decimal,
    pub has_employees: bool,
}

impl RegimeInputs {
    pub fn from_annual(
        figures: &AnnualFigures,
        has_employees: bool,
    ) -> Self {
        Self {
            income: figures.income,
            payroll_gross: figures.payroll_gross,
            expenses_included: figures.expenses_total(),
            amortization: figures.amortization,
            has_employees,
        }
    }

    /// Income less expenses, payroll and amortization.
    pub fn profit(&self) -> Decimal {
        self.income - self.expenses_included - self.payroll_gross - self.amortization
    }
}

/// Tax computed by a single regime rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub kind: RegimeKind,
    pub tax_line: String,
    pub tax_amount: Decimal,
    pub taxable_base: Decimal,
    pub warnings: Vec<RegimeWarning>,
}

type RegimeFormula = fn(&RegimeRule, &RegimeConfig, &RegimeInputs) -> RegimeAssessment;

struct RegimeRule {
    kind: RegimeKind,
    /// Name of the tax on the itemised tax line; the rate is appended.
    label: &'static str,
    formula: RegimeFormula,
}

/// One rule per regime, indexed by [`RegimeKind::index`].
const REGIME_RULES: [RegimeRule; 4] = [
    RegimeRule {
        kind: RegimeKind::SimplifiedIndividual,
        label: "Single tax",
        formula: simplified_individual,
    },
    RegimeRule {
        kind: RegimeKind::SimplifiedEntity,
        label: "Single tax",
        formula: simplified_entity,
    },
    RegimeRule {
        kind: RegimeKind::GeneralProprietor,
        label: "Personal income tax",
        formula: general_proprietor,
    },
    RegimeRule {
        kind: RegimeKind::GeneralCompany,
        label: "Corporate income tax",
        formula: general_company,
    },
];

/// Evaluator dispatching a [`RegimeKind`] to its tax rule.
#[derive(Debug, Clone)]
pub struct RegimeEvaluator<'a> {
    config: &'a RegimeConfig,
}

impl<'a> RegimeEvaluator<'a> {
    pub fn new(config: &'a RegimeConfig) -> Self {
        Self { config }
    }

    /// Computes tax, taxable base and warnings for `kind`.
    ///
    /// Eligibility is not checked: evaluating a regime the entity cannot
    /// elect still yields its figures, with any structural conflict reported
    /// as a warning.
    pub fn evaluate(
        &self,
        kind: RegimeKind,
        inputs: &RegimeInputs,
    ) -> RegimeAssessment {
        let rule = &REGIME_RULES[kind.index()];
        debug_assert_eq!(rule.kind, kind);
        let assessment = (rule.formula)(rule, self.config, inputs);

        for warning in &assessment.warnings {
            warn!(regime = kind.as_str(), %warning, "regime warning");
        }
        debug!(
            regime = kind.as_str(),
            taxable_base = %assessment.taxable_base,
            tax = %assessment.tax_amount,
            "regime evaluated"
        );

        assessment
    }
}

fn simplified_individual(
    rule: &RegimeRule,
    config: &RegimeConfig,
    inputs: &RegimeInputs,
) -> RegimeAssessment {
    let mut warnings = Vec::new();
    if inputs.has_employees || inputs.payroll_gross > Decimal::ZERO {
        warnings.push(RegimeWarning::EmployeesPresent);
    }
    warnings.extend(ceiling_warnings(config, inputs.income));

    flat_rate(rule, config, inputs, warnings)
}

fn simplified_entity(
    rule: &RegimeRule,
    config: &RegimeConfig,
    inputs: &RegimeInputs,
) -> RegimeAssessment {
    let warnings = ceiling_warnings(config, inputs.income);

    flat_rate(rule, config, inputs, warnings)
}

fn general_proprietor(
    rule: &RegimeRule,
    config: &RegimeConfig,
    inputs: &RegimeInputs,
) -> RegimeAssessment {
    profit_tax(rule, config.proprietor_profit_rate, inputs)
}

fn general_company(
    rule: &RegimeRule,
    config: &RegimeConfig,
    inputs: &RegimeInputs,
) -> RegimeAssessment {
    profit_tax(rule, config.company_profit_rate, inputs)
}

/// Monthly then annual ceiling checks shared by both simplified regimes.
fn ceiling_warnings(
    config: &RegimeConfig,
    income: Decimal,
) -> Vec<RegimeWarning> {
    let mut warnings = Vec::new();

    let monthly_income = income / Decimal::from(12);
    if monthly_income > config.simplified_monthly_ceiling {
        warnings.push(RegimeWarning::MonthlyCeilingExceeded {
            monthly_income,
            ceiling: config.simplified_monthly_ceiling,
        });
    }
    if income > config.simplified_annual_ceiling {
        warnings.push(RegimeWarning::AnnualCeilingExceeded {
            income,
            ceiling: config.simplified_annual_ceiling,
        });
    }

    warnings
}

fn tax_line(
    rule: &RegimeRule,
    rate: Decimal,
) -> String {
    format!("{} ({})", rule.label, format_percent(rate))
}

fn flat_rate(
    rule: &RegimeRule,
    config: &RegimeConfig,
    inputs: &RegimeInputs,
    warnings: Vec<RegimeWarning>,
) -> RegimeAssessment {
    RegimeAssessment {
        kind: rule.kind,
        tax_line: tax_line(rule, config.simplified_rate),
        tax_amount: inputs.income * config.simplified_rate,
        taxable_base: inputs.income,
        warnings,
    }
}

/// Profit-based tax, floored at zero with a loss warning.
fn profit_tax(
    rule: &RegimeRule,
    rate: Decimal,
    inputs: &RegimeInputs,
) -> RegimeAssessment {
    let profit = inputs.profit();

    let mut warnings = Vec::new();
    if profit <= Decimal::ZERO {
        warnings.push(RegimeWarning::Loss { profit });
    }

    let taxable_base = max(profit, Decimal::ZERO);

    RegimeAssessment {
        kind: rule.kind,
        tax_line: tax_line(rule, rate),
        tax_amount: taxable_base * rate,
        taxable_base,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn income_only(income: Decimal) -> RegimeInputs {
        RegimeInputs {
            income,
            payroll_gross: Decimal::ZERO,
            expenses_included: Decimal::ZERO,
            amortization: Decimal::ZERO,
            has_employees: false,
        }
    }

    fn evaluate(
        kind: RegimeKind,
        inputs: &RegimeInputs,
    ) -> RegimeAssessment {
        let config = RegimeConfig::default();
        RegimeEvaluator::new(&config).evaluate(kind, inputs)
    }

    // =========================================================================
    // dispatch table
    // =========================================================================

    #[test]
    fn rule_table_is_indexed_by_kind() {
        for kind in RegimeKind::ALL {
            assert_eq!(REGIME_RULES[kind.index()].kind, kind);
        }
    }

    #[test]
    fn evaluate_returns_requested_kind() {
        for kind in RegimeKind::ALL {
            assert_eq!(evaluate(kind, &income_only(dec!(1000))).kind, kind);
        }
    }

    // =========================================================================
    // simplified regimes
    // =========================================================================

    #[test]
    fn simplified_tax_is_four_percent_of_income() {
        for income in [dec!(0), dec!(1), dec!(12345.67), dec!(12000000), dec!(2500000000)] {
            for kind in [RegimeKind::SimplifiedIndividual, RegimeKind::SimplifiedEntity] {
                let result = evaluate(kind, &income_only(income));

                assert_eq!(result.tax_amount, income * dec!(0.04));
                assert_eq!(result.taxable_base, income);
            }
        }
    }

    #[test]
    fn simplified_tax_ignores_costs() {
        let inputs = RegimeInputs {
            payroll_gross: dec!(5000000),
            expenses_included: dec!(4000000),
            amortization: dec!(1000000),
            ..income_only(dec!(6000000))
        };

        let result = evaluate(RegimeKind::SimplifiedEntity, &inputs);

        assert_eq!(result.tax_amount, dec!(240000));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn simplified_line_label() {
        let result = evaluate(RegimeKind::SimplifiedEntity, &income_only(dec!(1)));

        assert_eq!(result.tax_line, "Single tax (4%)");
    }

    #[test]
    fn tax_line_is_rule_label_with_configured_rate() {
        let config = RegimeConfig {
            company_profit_rate: dec!(0.15),
            ..RegimeConfig::default()
        };
        let evaluator = RegimeEvaluator::new(&config);

        let lines: Vec<String> = RegimeKind::ALL
            .into_iter()
            .map(|kind| evaluator.evaluate(kind, &income_only(dec!(100))).tax_line)
            .collect();

        assert_eq!(
            lines,
            vec![
                "Single tax (4%)",
                "Single tax (4%)",
                "Personal income tax (10%)",
                "Corporate income tax (15%)",
            ]
        );
        for kind in RegimeKind::ALL {
            assert!(lines[kind.index()].starts_with(REGIME_RULES[kind.index()].label));
        }
    }

    #[test]
    fn self_employed_regime_warns_about_employees() {
        let _guard = init_test_tracing();
        let inputs = RegimeInputs {
            has_employees: true,
            ..income_only(dec!(1000000))
        };

        let result = evaluate(RegimeKind::SimplifiedIndividual, &inputs);

        assert_eq!(result.warnings, vec![RegimeWarning::EmployeesPresent]);
        assert_eq!(result.tax_amount, dec!(40000));
    }

    #[test]
    fn self_employed_regime_warns_when_payroll_reported() {
        let inputs = RegimeInputs {
            payroll_gross: dec!(100),
            ..income_only(dec!(1000000))
        };

        let result = evaluate(RegimeKind::SimplifiedIndividual, &inputs);

        assert_eq!(result.warnings, vec![RegimeWarning::EmployeesPresent]);
    }

    #[test]
    fn retail_regime_has_no_employee_restriction() {
        let inputs = RegimeInputs {
            has_employees: true,
            payroll_gross: dec!(600000),
            ..income_only(dec!(1000000))
        };

        let result = evaluate(RegimeKind::SimplifiedEntity, &inputs);

        assert!(result.warnings.is_empty());
    }

    #[test]
    fn monthly_ceiling_warns_without_changing_tax() {
        let _guard = init_test_tracing();

        let result = evaluate(RegimeKind::SimplifiedEntity, &income_only(dec!(24000000)));

        assert_eq!(
            result.warnings,
            vec![RegimeWarning::MonthlyCeilingExceeded {
                monthly_income: dec!(2000000),
                ceiling: dec!(1300000),
            }]
        );
        assert_eq!(result.tax_amount, dec!(960000));
    }

    #[test]
    fn income_exactly_at_monthly_ceiling_does_not_warn() {
        let result = evaluate(RegimeKind::SimplifiedIndividual, &income_only(dec!(15600000)));

        assert!(result.warnings.is_empty());
    }

    #[test]
    fn warnings_are_ordered_employees_monthly_annual() {
        let inputs = RegimeInputs {
            has_employees: true,
            ..income_only(dec!(3000000000))
        };

        let result = evaluate(RegimeKind::SimplifiedIndividual, &inputs);

        assert_eq!(
            result.warnings,
            vec![
                RegimeWarning::EmployeesPresent,
                RegimeWarning::MonthlyCeilingExceeded {
                    monthly_income: dec!(250000000),
                    ceiling: dec!(1300000),
                },
                RegimeWarning::AnnualCeilingExceeded {
                    income: dec!(3000000000),
                    ceiling: dec!(2500000000),
                },
            ]
        );
    }

    // =========================================================================
    // general regimes
    // =========================================================================

    #[test]
    fn proprietor_pays_ten_percent_of_profit() {
        let inputs = RegimeInputs {
            income: dec!(10000000),
            payroll_gross: dec!(2000000),
            expenses_included: dec!(3000000),
            amortization: dec!(500000),
            has_employees: true,
        };

        let result = evaluate(RegimeKind::GeneralProprietor, &inputs);

        assert_eq!(result.taxable_base, dec!(4500000));
        assert_eq!(result.tax_amount, dec!(450000));
        assert_eq!(result.tax_line, "Personal income tax (10%)");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn company_pays_twenty_percent_of_profit() {
        let inputs = RegimeInputs {
            income: dec!(10000000),
            payroll_gross: dec!(2000000),
            expenses_included: dec!(3000000),
            amortization: dec!(500000),
            has_employees: true,
        };

        let result = evaluate(RegimeKind::GeneralCompany, &inputs);

        assert_eq!(result.tax_amount, dec!(900000));
        assert_eq!(result.tax_line, "Corporate income tax (20%)");
    }

    #[test]
    fn loss_floors_tax_at_zero_and_warns() {
        let _guard = init_test_tracing();
        let inputs = RegimeInputs {
            expenses_included: dec!(1500000),
            ..income_only(dec!(1000000))
        };

        for kind in [RegimeKind::GeneralProprietor, RegimeKind::GeneralCompany] {
            let result = evaluate(kind, &inputs);

            assert_eq!(result.tax_amount, Decimal::ZERO);
            assert_eq!(result.taxable_base, Decimal::ZERO);
            assert_eq!(
                result.warnings,
                vec![RegimeWarning::Loss {
                    profit: dec!(-500000),
                }]
            );
        }
    }

    #[test]
    fn break_even_counts_as_loss() {
        let inputs = RegimeInputs {
            amortization: dec!(1000000),
            ..income_only(dec!(1000000))
        };

        let result = evaluate(RegimeKind::GeneralCompany, &inputs);

        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(
            result.warnings,
            vec![RegimeWarning::Loss {
                profit: Decimal::ZERO,
            }]
        );
    }

    #[test]
    fn general_tax_is_never_negative() {
        let cases = [
            (dec!(0), dec!(0), dec!(0), dec!(0)),
            (dec!(0), dec!(1), dec!(0), dec!(0)),
            (dec!(100), dec!(50), dec!(50), dec!(1)),
            (dec!(100), dec!(0), dec!(0), dec!(99.99)),
            (dec!(1000000000), dec!(0), dec!(0), dec!(0)),
        ];

        for (income, payroll_gross, expenses_included, amortization) in cases {
            let inputs = RegimeInputs {
                income,
                payroll_gross,
                expenses_included,
                amortization,
                has_employees: false,
            };
            for kind in [RegimeKind::GeneralProprietor, RegimeKind::GeneralCompany] {
                let result = evaluate(kind, &inputs);

                assert!(result.tax_amount >= Decimal::ZERO);
                if inputs.profit() <= Decimal::ZERO {
                    assert_eq!(result.tax_amount, Decimal::ZERO);
                }
            }
        }
    }

    #[test]
    fn substitute_rate_table() {
        let config = RegimeConfig {
            simplified_rate: dec!(0.03),
            company_profit_rate: dec!(0.15),
            ..RegimeConfig::default()
        };
        let evaluator = RegimeEvaluator::new(&config);

        let simplified = evaluator.evaluate(RegimeKind::SimplifiedEntity, &income_only(dec!(1000)));
        let company = evaluator.evaluate(RegimeKind::GeneralCompany, &income_only(dec!(1000)));

        assert_eq!(simplified.tax_amount, dec!(30));
        assert_eq!(simplified.tax_line, "Single tax (3%)");
        assert_eq!(company.tax_amount, dec!(150));
    }

    // =========================================================================
    // period scaling
    // =========================================================================

    #[test]
    fn monthly_one_million_yields_annual_simplified_tax() {
        use crate::calculations::annualize_inputs;
        use crate::models::{FinancialInputs, Period};

        let figures = annualize_inputs(&FinancialInputs::new(dec!(1000000), Period::Monthly));
        let result = evaluate(
            RegimeKind::SimplifiedEntity,
            &RegimeInputs::from_annual(&figures, false),
        );

        assert_eq!(figures.income, dec!(12000000));
        assert_eq!(result.tax_amount, dec!(480000));
        // Linear: annualising first equals twelve times the monthly tax.
        let monthly = evaluate(RegimeKind::SimplifiedEntity, &income_only(dec!(1000000)));
        assert_eq!(result.tax_amount, monthly.tax_amount * dec!(12));
    }

    #[test]
    fn fixed_annual_cost_breaks_monthly_scaling_for_profit_tax() {
        // Monthly income 1M with a one-off 6M annual amortization charge.
        let annual = RegimeInputs {
            amortization: dec!(6000000),
            ..income_only(dec!(12000000))
        };
        let monthly_with_full_charge = RegimeInputs {
            amortization: dec!(6000000),
            ..income_only(dec!(1000000))
        };

        let annual_tax = evaluate(RegimeKind::GeneralCompany, &annual).tax_amount;
        let scaled_monthly_tax =
            evaluate(RegimeKind::GeneralCompany, &monthly_with_full_charge).tax_amount * dec!(12);

        assert_eq!(annual_tax, dec!(1200000));
        assert_eq!(scaled_monthly_tax, Decimal::ZERO);
        assert!(annual_tax != scaled_monthly_tax);
    }
}
