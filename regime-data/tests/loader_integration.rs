//! Integration tests that load on-disk fixtures and feed them to the engine.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use regime_core::{EntityType, RegimeKind, TaxEngine};
use regime_data::{load_config_from_file, scenario_loader};
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn load_scenario_fixture_succeeds() {
    let scenarios = scenario_loader::load_from_file(&fixture("scenarios.csv"))
        .expect("fixture file should load without error");

    let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["freelancer", "employer", "shop", "workshop", "farm"]);
    assert_eq!(scenarios[3].request.entity_type, EntityType::Company);
}

#[test]
fn fixture_scenarios_produce_expected_recommendations() {
    let scenarios = scenario_loader::load_from_file(&fixture("scenarios.csv")).unwrap();
    let engine = TaxEngine::default();

    let recommended: Vec<Option<RegimeKind>> = scenarios
        .iter()
        .map(|s| engine.compare(&s.request).recommended)
        .collect();

    assert_eq!(
        recommended,
        vec![
            Some(RegimeKind::SimplifiedIndividual),
            None,
            Some(RegimeKind::GeneralProprietor),
            Some(RegimeKind::SimplifiedEntity),
            Some(RegimeKind::SimplifiedEntity),
        ]
    );
}

#[test]
fn employer_individual_is_reported_unavailable() {
    let scenarios = scenario_loader::load_from_file(&fixture("scenarios.csv")).unwrap();

    let report = TaxEngine::default().compare(&scenarios[1].request);

    assert!(!report.has_available());
    assert_eq!(report.results.len(), 1);
    assert!(!report.results[0].available);
    assert_eq!(report.results[0].tax_amount, dec!(320000));
}

#[test]
fn loaded_rate_table_reaches_the_engine() {
    let config = load_config_from_file(&fixture("rates.toml")).expect("fixture is valid");
    let engine = TaxEngine::new(config).expect("validated on load");
    let scenarios = scenario_loader::load_from_file(&fixture("scenarios.csv")).unwrap();

    // workshop: 60M a year is over the reduced 50M ceiling, so only CIT remains.
    let report = engine.compare(&scenarios[3].request);

    assert_eq!(report.ranking, vec![RegimeKind::GeneralCompany]);
    let company = report.result(RegimeKind::GeneralCompany).unwrap();
    // profit = 60M − 14.4M materials − 12M payroll − 0.6M amortization = 33M
    assert_eq!(company.taxable_base, dec!(33000000));
    assert_eq!(company.tax_amount, dec!(4950000));
    // employer: 3.5% + 3% + 11% + 0.5% = 18% of 12M
    assert_eq!(report.payroll.employer_total(), dec!(2160000));
}
