//! Data quality checks run on the loaded records before aggregation.
//!
//! Each check counts failing rows; zero means PASS.
//! Fail-severity checks guard the engine's preconditions (present keys,
//! unique identifiers). Orphan checks are Warn-only: orphan transactions
//! and loans are legal input and simply drop out of customer activity.

use crate::model::{Customer, Loan, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Fail,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub name: String,
    pub severity: Severity,
    pub failing_rows: usize,
}

impl QualityCheck {
    pub fn passed(&self) -> bool {
        self.failing_rows == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub checks: Vec<QualityCheck>,
}

impl QualityReport {
    /// True when no Fail-severity check found failing rows.
    pub fn passed(&self) -> bool {
        self.failed_checks().next().is_none()
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &QualityCheck> {
        self.checks
            .iter()
            .filter(|c| c.severity == Severity::Fail && !c.passed())
    }

    pub fn check(&self, name: &str) -> Option<&QualityCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    fn push(&mut self, name: &str, severity: Severity, failing_rows: usize) {
        self.checks.push(QualityCheck {
            name: name.to_string(),
            severity,
            failing_rows,
        });
    }
}

fn count_blank<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.filter(|v| v.trim().is_empty()).count()
}

/// Rows whose id was already seen earlier in the collection.
fn count_duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> usize {
    let mut seen = HashSet::new();
    ids.filter(|id| !seen.insert(*id)).count()
}

pub fn run_quality_checks(
    customers: &[Customer],
    transactions: &[Transaction],
    loans: &[Loan],
) -> QualityReport {
    let mut report = QualityReport::default();

    // ── Keys present ───────────────────────────────────────
    report.push(
        "customer_id_not_blank",
        Severity::Fail,
        count_blank(customers.iter().map(|c| c.customer_id.as_str())),
    );
    report.push(
        "transaction_id_not_blank",
        Severity::Fail,
        count_blank(transactions.iter().map(|t| t.transaction_id.as_str())),
    );
    report.push(
        "loan_id_not_blank",
        Severity::Fail,
        count_blank(loans.iter().map(|l| l.loan_id.as_str())),
    );

    // ── Keys unique ────────────────────────────────────────
    report.push(
        "customer_id_unique",
        Severity::Fail,
        count_duplicates(customers.iter().map(|c| c.customer_id.as_str())),
    );
    report.push(
        "transaction_id_unique",
        Severity::Fail,
        count_duplicates(transactions.iter().map(|t| t.transaction_id.as_str())),
    );
    report.push(
        "loan_id_unique",
        Severity::Fail,
        count_duplicates(loans.iter().map(|l| l.loan_id.as_str())),
    );

    // ── Grouping keys present ──────────────────────────────
    report.push(
        "customer_region_not_blank",
        Severity::Fail,
        count_blank(customers.iter().map(|c| c.region.as_str())),
    );
    report.push(
        "transaction_region_not_blank",
        Severity::Fail,
        count_blank(transactions.iter().map(|t| t.region.as_str())),
    );
    report.push(
        "transaction_customer_id_not_blank",
        Severity::Fail,
        count_blank(transactions.iter().map(|t| t.customer_id.as_str())),
    );
    report.push(
        "loan_region_not_blank",
        Severity::Fail,
        count_blank(loans.iter().map(|l| l.region.as_str())),
    );
    report.push(
        "loan_status_not_blank",
        Severity::Fail,
        count_blank(loans.iter().map(|l| l.status.as_str())),
    );
    report.push(
        "loan_customer_id_not_blank",
        Severity::Fail,
        count_blank(loans.iter().map(|l| l.customer_id.as_str())),
    );

    // ── Foreign keys resolve ───────────────────────────────
    let known: HashSet<&str> = customers.iter().map(|c| c.customer_id.as_str()).collect();
    report.push(
        "transaction_customer_exists",
        Severity::Warn,
        transactions
            .iter()
            .filter(|t| !known.contains(t.customer_id.as_str()))
            .count(),
    );
    report.push(
        "loan_customer_exists",
        Severity::Warn,
        loans
            .iter()
            .filter(|l| !known.contains(l.customer_id.as_str()))
            .count(),
    );

    for check in &report.checks {
        match (check.passed(), check.severity) {
            (true, _) => log::info!("PASS: {}", check.name),
            (false, Severity::Warn) => log::warn!(
                "WARN: {} - {} row(s) flagged",
                check.name,
                check.failing_rows
            ),
            (false, Severity::Fail) => log::error!(
                "FAIL: {} - {} failing row(s) found",
                check.name,
                check.failing_rows
            ),
        }
    }

    report
}
