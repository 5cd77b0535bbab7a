//! Text and JSON rendering of comparison reports.

use regime_core::calculations::common::to_money;
use regime_core::{ComparisonReport, DeductionBreakdown, PayrollLine, RegimeResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Serialize)]
struct NamedReport<'a> {
    name: &'a str,
    report: &'a ComparisonReport,
}

fn money(value: Decimal) -> String {
    to_money(value).to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

fn status(
    report: &ComparisonReport,
    result: &RegimeResult,
) -> String {
    if report.recommended == Some(result.kind) {
        "recommended".to_string()
    } else if result.available {
        "available".to_string()
    } else {
        match &result.unavailable_reason {
            Some(reason) => format!("unavailable: {reason}"),
            None => "unavailable".to_string(),
        }
    }
}

fn comparison_table(report: &ComparisonReport) -> String {
    let employer_total = report.payroll.employer_total();

    let mut builder = Builder::default();
    builder.push_record([
        "Rank",
        "Regime",
        "Tax line",
        "Tax",
        "Employer contributions",
        "Total burden",
        "Net income",
        "Status",
    ]);
    for result in &report.results {
        let rank = report
            .ranking
            .iter()
            .position(|&kind| kind == result.kind)
            .map(|i| (i + 1).to_string())
            .unwrap_or_else(|| "-".to_string());
        builder.push_record([
            rank,
            result.kind.label().to_string(),
            result.tax_line.clone(),
            money(result.tax_amount),
            money(employer_total),
            money(result.entity_tax_burden),
            money(result.net_income),
            status(report, result),
        ]);
    }
    table(builder)
}

fn payroll_table(
    lines: &[PayrollLine],
    total: Decimal,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Item", "Amount"]);
    for line in lines {
        builder.push_record([line.label.clone(), money(line.amount)]);
    }
    builder.push_record(["Total".to_string(), money(total)]);
    table(builder)
}

fn deduction_table(deductions: &DeductionBreakdown) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Deduction", "Amount"]);
    for line in &deductions.lines {
        builder.push_record([line.label.clone(), money(line.amount)]);
    }
    builder.push_record(["Total".to_string(), money(deductions.total())]);
    table(builder)
}

fn alternatives(report: &ComparisonReport) -> Vec<String> {
    let mut lines = Vec::new();
    for alternative in report.alternatives_to_primary() {
        let result = alternative.result;
        if alternative.lower_tax {
            lines.push(format!(
                "  Tax would be lower under {}: {}",
                result.kind.label(),
                money(result.tax_amount)
            ));
        }
        if alternative.higher_net_income {
            lines.push(format!(
                "  Net income would be higher under {}: {}",
                result.kind.label(),
                money(result.net_income)
            ));
        }
    }
    lines
}

fn warnings(report: &ComparisonReport) -> Vec<String> {
    report
        .results
        .iter()
        .flat_map(|result| {
            result
                .warning_messages()
                .into_iter()
                .map(move |message| format!("  - {}: {message}", result.kind.as_str()))
        })
        .collect()
}

/// Renders one report as plain text: comparison table, recommendation,
/// warnings, primary regime detail with any better alternatives, payroll
/// tables and deductions.
pub fn render_report(
    name: &str,
    report: &ComparisonReport,
) -> String {
    let mut sections = vec![format!(
        "== {name} ==\nEntity: {}, employees: {}, input period: {}, annual income: {}",
        report.entity_type,
        yes_no(report.has_employees),
        report.period.as_str(),
        money(report.income)
    )];

    if !report.results.is_empty() {
        sections.push(comparison_table(report));
    }

    match report.recommended_result() {
        Some(result) => sections.push(format!(
            "Recommended: {} (total burden {})",
            result.kind.label(),
            money(result.entity_tax_burden)
        )),
        None => sections.push(format!(
            "No tax regime is available for entity type '{}' with these conditions.",
            report.entity_type.as_str()
        )),
    }

    let warning_lines = warnings(report);
    if !warning_lines.is_empty() {
        sections.push(format!("Warnings:\n{}", warning_lines.join("\n")));
    }

    if let Some(primary) = report.primary_result() {
        sections.push(format!(
            "{}\n  {}: {}\n  Taxable base: {}\n  Net income: {}",
            primary.kind.label(),
            primary.tax_line,
            money(primary.tax_amount),
            money(primary.taxable_base),
            money(primary.net_income)
        ));

        let alternative_lines = alternatives(report);
        if !alternative_lines.is_empty() {
            sections.push(format!(
                "Compared with {}:\n{}",
                primary.kind.label(),
                alternative_lines.join("\n")
            ));
        }
    }

    sections.push(format!(
        "Employee withholdings (paid from gross payroll, not part of the burden)\n{}",
        payroll_table(
            &report.payroll.employee_withholdings,
            report.payroll.employee_total()
        )
    ));
    sections.push(format!(
        "Employer contributions\n{}",
        payroll_table(
            &report.payroll.employer_contributions,
            report.payroll.employer_total()
        )
    ));
    sections.push(format!("Deductions\n{}", deduction_table(&report.deductions)));

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

/// Renders named reports as a pretty-printed JSON array.
pub fn render_json(reports: &[(String, ComparisonReport)]) -> serde_json::Result<String> {
    let named: Vec<NamedReport<'_>> = reports
        .iter()
        .map(|(name, report)| NamedReport { name, report })
        .collect();
    serde_json::to_string_pretty(&named)
}
