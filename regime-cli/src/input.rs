//! Command-line arguments describing a single calculation request.

use anyhow::{Result, bail};
use clap::Args;
use regime_core::{
    ComparisonRequest, EntityType, ExpenseCategory, FinancialInputs, Period, RegimeKind,
    check_amount,
};
use rust_decimal::Decimal;
use tracing::debug;

/// Parses an entity code (`individual`, `ip`, `too`, `kh`).
pub fn parse_entity(s: &str) -> Result<EntityType, String> {
    EntityType::parse(s)
        .ok_or_else(|| format!("unknown entity type '{s}'; expected individual, ip, too or kh"))
}

/// Parses `month`/`monthly` or `year`/`annual`.
pub fn parse_period(s: &str) -> Result<Period, String> {
    Period::parse(s).ok_or_else(|| format!("unknown period '{s}'; expected month or year"))
}

pub fn parse_regime(s: &str) -> Result<RegimeKind, String> {
    RegimeKind::parse(s).ok_or_else(|| {
        let codes: Vec<&str> = RegimeKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown regime '{s}'; expected one of {}", codes.join(", "))
    })
}

/// Parses a `category=amount` pair.
pub fn parse_expense(s: &str) -> Result<(String, Decimal), String> {
    let (name, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected category=amount, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{s}'"));
    }
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount in '{s}': {e}"))?;
    Ok((name.to_string(), amount))
}

/// Request flags for single-request mode.
#[derive(Debug, Clone, Default, Args)]
pub struct RequestArgs {
    /// Entity type: individual, ip (sole proprietor), too (company) or kh (farm).
    #[arg(long, value_parser = parse_entity)]
    pub entity: Option<EntityType>,

    /// The entity has employees.
    #[arg(long)]
    pub employees: bool,

    /// Period the amounts are given for: month or year.
    #[arg(long, value_parser = parse_period, default_value = "year")]
    pub period: Period,

    /// Gross income for the period.
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Gross payroll for the period.
    #[arg(long, default_value = "0")]
    pub payroll: Decimal,

    /// Amortization for the period.
    #[arg(long, default_value = "0")]
    pub amortization: Decimal,

    /// Deductible expense as `category=amount`. Repeatable.
    #[arg(long = "expense", value_parser = parse_expense)]
    pub expenses: Vec<(String, Decimal)>,

    /// Expense entered but excluded from deductions, as `category=amount`. Repeatable.
    #[arg(long = "exclude-expense", value_parser = parse_expense)]
    pub excluded_expenses: Vec<(String, Decimal)>,

    /// Regime to show even if not eligible; the first one is shown in detail. Repeatable.
    #[arg(long = "regime", value_parser = parse_regime)]
    pub regimes: Vec<RegimeKind>,
}

impl RequestArgs {
    /// Builds the engine request, rejecting missing, negative or oversized amounts.
    ///
    /// Payroll, expenses and amortization are dropped for an individual
    /// without employees.
    pub fn into_request(self) -> Result<ComparisonRequest> {
        let Some(entity) = self.entity else {
            bail!("--entity is required unless --scenarios is given");
        };
        let Some(income) = self.income else {
            bail!("--income is required unless --scenarios is given");
        };

        check_amount("income", income)?;
        let mut inputs = FinancialInputs::new(income, self.period);

        if entity.reports_costs(self.employees) {
            check_amount("payroll", self.payroll)?;
            check_amount("amortization", self.amortization)?;
            inputs = inputs
                .with_payroll(self.payroll)
                .with_amortization(self.amortization);

            let included = self
                .expenses
                .into_iter()
                .map(|(name, amount)| ExpenseCategory::included(name, amount));
            let excluded = self
                .excluded_expenses
                .into_iter()
                .map(|(name, amount)| ExpenseCategory::excluded(name, amount));
            for expense in included.chain(excluded) {
                check_amount(&expense.name, expense.amount)?;
                inputs = inputs.with_expense(expense);
            }
        } else {
            debug!("individual without employees; ignoring cost flags");
        }

        Ok(ComparisonRequest::new(entity, self.employees, inputs).with_selected(self.regimes))
    }
}
