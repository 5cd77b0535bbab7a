//! End-to-end checks of the public engine API against the documented
//! regime properties.

use pretty_assertions::assert_eq;
use regime_core::calculations::RegimeInputs;
use regime_core::{
    ComparisonRequest, EntityType, ExpenseCategory, FinancialInputs, Period, PayrollItem,
    RegimeConfig, RegimeKind, RegimeWarning, TaxEngine,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn engine() -> TaxEngine {
    TaxEngine::new(RegimeConfig::default()).expect("default config is valid")
}

#[test]
fn monthly_income_of_one_million_is_taxed_on_twelve_million() {
    let request = ComparisonRequest::new(
        EntityType::SoleProprietor,
        false,
        FinancialInputs::new(dec!(1000000), Period::Monthly),
    );

    let report = engine().compare(&request);
    let simplified = report.result(RegimeKind::SimplifiedEntity).expect("eligible");

    assert_eq!(report.income, dec!(12000000));
    assert_eq!(simplified.tax_amount, dec!(480000));
    assert_eq!(simplified.taxable_base, dec!(12000000));
}

#[test]
fn employee_withholdings_never_enter_the_burden() {
    let request = ComparisonRequest::new(
        EntityType::Company,
        true,
        FinancialInputs::new(dec!(20000000), Period::Annual).with_payroll(dec!(1000000)),
    );

    let report = engine().compare(&request);

    let withheld = report.payroll.employee_total();
    assert_eq!(withheld, dec!(208000));
    assert_eq!(
        report.payroll.line(PayrollItem::IncomeTax).map(|l| l.amount),
        Some(dec!(88000))
    );
    for result in &report.results {
        assert_eq!(
            result.entity_tax_burden,
            result.tax_amount + report.payroll.employer_total()
        );
    }
}

#[test]
fn individual_with_employees_has_no_regime_but_engine_still_warns() {
    let engine = engine();

    let eligible = engine.eligible_regimes(EntityType::Individual, true, dec!(5000000));
    let direct = engine.evaluate(
        RegimeKind::SimplifiedIndividual,
        &RegimeInputs {
            income: dec!(5000000),
            payroll_gross: dec!(1200000),
            expenses_included: Decimal::ZERO,
            amortization: Decimal::ZERO,
            has_employees: true,
        },
    );

    assert!(eligible.is_empty());
    assert!(direct.warnings.contains(&RegimeWarning::EmployeesPresent));
}

#[test]
fn recommendation_picks_lower_burden() {
    let inputs = FinancialInputs::new(dec!(10000000), Period::Annual)
        .with_expense(ExpenseCategory::included("goods", dec!(6000000)))
        .with_expense(ExpenseCategory::included("rent", dec!(500000)));
    let request = ComparisonRequest::new(EntityType::SoleProprietor, false, inputs);

    let report = engine().compare(&request);

    assert_eq!(
        report
            .result(RegimeKind::SimplifiedEntity)
            .map(|r| r.entity_tax_burden),
        Some(dec!(400000))
    );
    assert_eq!(
        report
            .result(RegimeKind::GeneralProprietor)
            .map(|r| r.entity_tax_burden),
        Some(dec!(350000))
    );
    assert_eq!(report.recommended, Some(RegimeKind::GeneralProprietor));
    assert_eq!(
        report.recommended_result().map(|r| r.kind),
        Some(RegimeKind::GeneralProprietor)
    );
}

#[test]
fn compare_is_idempotent() {
    let inputs = FinancialInputs::new(dec!(3333333.33), Period::Monthly)
        .with_payroll(dec!(812345.67))
        .with_amortization(dec!(12000))
        .with_expense(ExpenseCategory::included("rent", dec!(250000)))
        .with_expense(ExpenseCategory::excluded("travel", dec!(75000)));
    let request = ComparisonRequest::new(EntityType::Company, true, inputs)
        .with_selected(vec![RegimeKind::GeneralCompany, RegimeKind::SimplifiedIndividual]);
    let engine = engine();

    let first = serde_json::to_vec(&engine.compare(&request)).expect("serialisable");
    let second = serde_json::to_vec(&engine.compare(&request)).expect("serialisable");

    assert_eq!(first, second);
}

#[test]
fn monthly_ceiling_warns_but_annual_ceiling_excludes() {
    let engine = engine();

    // 2M per month: over the monthly ceiling, well under the annual one.
    let warned = engine.compare(&ComparisonRequest::new(
        EntityType::Farm,
        false,
        FinancialInputs::new(dec!(2000000), Period::Monthly),
    ));
    // 3B per year: over the annual ceiling.
    let excluded = engine.compare(&ComparisonRequest::new(
        EntityType::Farm,
        false,
        FinancialInputs::new(dec!(3000000000), Period::Annual),
    ));

    assert_eq!(warned.recommended, Some(RegimeKind::SimplifiedEntity));
    assert!(matches!(
        warned.results[0].warnings.as_slice(),
        [RegimeWarning::MonthlyCeilingExceeded { .. }]
    ));
    assert!(!excluded.has_available());
    assert!(excluded.results.is_empty());
}

#[test]
fn primary_result_exposes_payroll_and_deduction_tables() {
    let inputs = FinancialInputs::new(dec!(900000), Period::Monthly)
        .with_payroll(dec!(200000))
        .with_amortization(dec!(5000))
        .with_expense(ExpenseCategory::included("rent", dec!(100000)))
        .with_expense(ExpenseCategory::included("utilities", dec!(20000)));
    let request = ComparisonRequest::new(EntityType::SoleProprietor, true, inputs)
        .with_selected(vec![RegimeKind::GeneralProprietor]);

    let report = engine().compare(&request);

    assert_eq!(
        report.primary_result().map(|r| r.kind),
        Some(RegimeKind::GeneralProprietor)
    );
    assert_eq!(report.payroll.payroll_gross, dec!(2400000));
    assert_eq!(report.payroll.employee_withholdings.len(), 3);
    assert_eq!(report.payroll.employer_contributions.len(), 4);

    let labels: Vec<&str> = report
        .deductions
        .lines
        .iter()
        .map(|l| l.label.as_str())
        .collect();
    assert_eq!(labels, vec!["rent", "utilities", "Payroll", "Amortization"]);
    assert_eq!(report.deductions.total(), dec!(3900000));
}
