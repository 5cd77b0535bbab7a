//! CSV loader for batch calculation requests.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column | Required | Type | Notes |
//! |-----------------|----------|---------|--------------------------------------------------|
//! | `name` | yes | string | Free-form label echoed in the output |
//! | `entity_type` | yes | string | One of: `individual`, `ip`, `too`, `kh` |
//! | `has_employees` | yes | bool | `true`/`false`, `yes`/`no` or `1`/`0` |
//! | `period` | yes | string | `month` or `year` |
//! | `income` | yes | decimal | Parsed from text, every digit kept |
//! | `payroll` | no | decimal | Empty cell means zero |
//! | `amortization` | no | decimal | Empty cell means zero |
//! | `expenses` | no | list | `category=amount` entries separated by `;` |
//! | `regimes` | no | list | Regime codes separated by `;`, first is primary |
//!
//! An expense entry prefixed with `!` (e.g. `!fuel=40000`) is kept but
//! excluded from deductible expenses. Regime codes are `snr_individual`,
//! `snr_entity`, `general_ip` and `general_too`.
//!
//! Payroll, expenses and amortization are ignored for an individual without
//! employees.
//!
//! ### Example
//!
//! ```csv
//! name,entity_type,has_employees,period,income,payroll,amortization,expenses,regimes
//! freelancer,individual,no,month,900000,,,,
//! shop,ip,yes,year,60000000,12000000,500000,rent=3600000;!fuel=400000,general_ip
//! ```

use std::path::Path;

use regime_core::{
    ComparisonRequest, EntityType, ExpenseCategory, FinancialInputs, InputError, Period,
    RegimeKind, check_amount,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    entity_type: String,
    has_employees: String,
    period: String,
    #[serde(with = "rust_decimal::serde::str")]
    income: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    payroll: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    amortization: Option<Decimal>,
    #[serde(default)]
    expenses: Option<String>,
    #[serde(default)]
    regimes: Option<String>,
}

/// A named calculation request read from CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub request: ComparisonRequest,
}

/// Errors that can occur while loading scenarios. Row numbers are 1-based
/// and exclude the header.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read scenario file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised entity type '{value}' on row {row}")]
    InvalidEntityType { value: String, row: usize },

    #[error("unrecognised period '{value}' on row {row}")]
    InvalidPeriod { value: String, row: usize },

    #[error("unrecognised has_employees value '{value}' on row {row}")]
    InvalidFlag { value: String, row: usize },

    #[error("unrecognised regime '{value}' on row {row}")]
    InvalidRegime { value: String, row: usize },

    #[error("malformed expense entry '{entry}' on row {row}")]
    InvalidExpense { entry: String, row: usize },

    #[error("invalid amount on row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: InputError,
    },
}

fn parse_flag(
    value: &str,
    row: usize,
) -> Result<bool, ScenarioLoadError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ScenarioLoadError::InvalidFlag {
            value: value.to_string(),
            row,
        }),
    }
}

fn checked_amount(
    field: &str,
    value: Decimal,
    row: usize,
) -> Result<Decimal, ScenarioLoadError> {
    check_amount(field, value).map_err(|source| ScenarioLoadError::InvalidAmount { row, source })
}

fn parse_expenses(
    cell: &str,
    row: usize,
) -> Result<Vec<ExpenseCategory>, ScenarioLoadError> {
    cell.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let malformed = || ScenarioLoadError::InvalidExpense {
                entry: entry.to_string(),
                row,
            };
            let (included, body) = match entry.strip_prefix('!') {
                Some(rest) => (false, rest),
                None => (true, entry),
            };
            let (name, amount) = body.split_once('=').ok_or_else(malformed)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(malformed());
            }
            let amount: Decimal = amount.trim().parse().map_err(|_| malformed())?;
            let amount = checked_amount(name, amount, row)?;

            Ok(if included {
                ExpenseCategory::included(name, amount)
            } else {
                ExpenseCategory::excluded(name, amount)
            })
        })
        .collect()
}

fn parse_regimes(
    cell: &str,
    row: usize,
) -> Result<Vec<RegimeKind>, ScenarioLoadError> {
    cell.split(';')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            RegimeKind::parse(code).ok_or_else(|| ScenarioLoadError::InvalidRegime {
                value: code.to_string(),
                row,
            })
        })
        .collect()
}

/// Convert a single CSV row into a Scenario.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let entity_type =
        EntityType::parse(&row.entity_type).ok_or_else(|| ScenarioLoadError::InvalidEntityType {
            value: row.entity_type.clone(),
            row: row_number,
        })?;
    let period = Period::parse(&row.period).ok_or_else(|| ScenarioLoadError::InvalidPeriod {
        value: row.period.clone(),
        row: row_number,
    })?;
    let has_employees = parse_flag(&row.has_employees, row_number)?;

    let income = checked_amount("income", row.income, row_number)?;
    let mut inputs = FinancialInputs::new(income, period);

    if entity_type.reports_costs(has_employees) {
        let payroll = checked_amount("payroll", row.payroll.unwrap_or_default(), row_number)?;
        let amortization = checked_amount(
            "amortization",
            row.amortization.unwrap_or_default(),
            row_number,
        )?;
        inputs = inputs.with_payroll(payroll).with_amortization(amortization);
        for expense in parse_expenses(row.expenses.as_deref().unwrap_or(""), row_number)? {
            inputs = inputs.with_expense(expense);
        }
    } else {
        debug!(
            row = row_number,
            "individual without employees; ignoring cost columns"
        );
    }

    let selected = parse_regimes(row.regimes.as_deref().unwrap_or(""), row_number)?;

    Ok(Scenario {
        name: row.name,
        request: ComparisonRequest::new(entity_type, has_employees, inputs).with_selected(selected),
    })
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid or a
///   required column is missing.
/// * Any of the row-level variants if a cell holds an unrecognised code,
///   a malformed list entry or a negative amount.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let scenarios = load_from_str(&contents)?;
    debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}
