mod comparison_report;
mod entity_type;
mod financial_inputs;
mod payroll_breakdown;
mod regime_config;
mod regime_kind;
mod regime_result;

pub use comparison_report::{Alternative, ComparisonReport, DeductionBreakdown, DeductionLine};
pub use entity_type::EntityType;
pub use financial_inputs::{
    ExpenseCategory, FinancialInputs, InputError, MAX_AMOUNT, Period, check_amount,
};
pub use payroll_breakdown::{PayrollBreakdown, PayrollItem, PayrollLine};
pub use regime_config::{ConfigError, PayrollRates, RegimeConfig};
pub use regime_kind::RegimeKind;
pub use regime_result::{RegimeResult, RegimeWarning, UnavailableReason};
