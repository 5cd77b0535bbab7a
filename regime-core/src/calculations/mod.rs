//! Tax-rule evaluation for the simplified and general regimes.
//!
//! Each submodule implements one stage of a calculation request:
//! annualising the caller's figures, payroll withholdings and contributions,
//! regime eligibility, per-regime tax rules and the cross-regime comparison.

pub mod common;
pub mod comparison;
pub mod eligibility;
pub mod payroll;
pub mod period;
pub mod regimes;

pub use comparison::ComparisonEngine;
pub use eligibility::EligibilityEvaluator;
pub use payroll::PayrollCalculator;
pub use period::{AnnualFigures, annualize, annualize_inputs};
pub use regimes::{RegimeAssessment, RegimeEvaluator, RegimeInputs};
