//! End-to-end pipeline runs against files on disk.

use finflow_core::{
    config::PipelineConfig,
    error::FinflowError,
    pipeline::DataPipeline,
};
use rust_decimal_macros::dec;
use std::{fs, path::PathBuf, time::Duration};

const CUSTOMERS: &str = "\
CustomerId,Name,Email,Region,JoinDate,AccountType
C001,Alice Smith,alice@example.com,US,2021-04-01,Premium
C002,Bob Jones,bob@example.com,EU,2022-09-15,Basic
C003,Cara Diaz,cara@example.com,US,2023-01-20,Basic
";

const TRANSACTIONS: &str = "\
TransactionId,CustomerId,TransactionDate,Amount,TransactionType,Region,Description
T001,C001,2024-01-15,100.00,Deposit,US,Salary
T002,C001,2024-01-20,50.00,Withdrawal,US,ATM
T003,C002,2024-01-10,200.00,Transfer,EU,Rent
T004,C999,2024-02-03,1234.56,Deposit,US,Unknown customer
T005,C002,bad-date,10.00,Deposit,EU,Broken row
";

const LOANS: &str = "\
LoanId,CustomerId,LoanAmount,LoanDate,Region,Status,TermMonths,InterestRate
L001,C001,1000.00,2023-03-01,US,Defaulted,36,7.5
L002,C003,2000.00,2023-04-01,US,Active,48,6.0
L003,C002,3000.00,2023-05-01,EU,Paid,24,5.5
";

// ── Helpers ──────────────────────────────────────────────────────────────────

struct Workspace {
    root: PathBuf,
}

impl Workspace {
    fn new(name: &str, customers: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = std::env::temp_dir().join(format!("finflow-{name}-{}", std::process::id()));
        let raw = root.join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("customers.csv"), customers).unwrap();
        fs::write(raw.join("transactions.csv"), TRANSACTIONS).unwrap();
        fs::write(raw.join("loans.csv"), LOANS).unwrap();
        Self { root }
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig::with_dirs(self.root.join("raw"), self.root.join("analytics"))
    }

    fn output(&self, file: &str) -> String {
        fs::read_to_string(self.root.join("analytics").join(file)).unwrap()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn full_run_writes_three_tables() {
    let ws = Workspace::new("full-run", CUSTOMERS);
    let pipeline = DataPipeline::new(ws.config());

    let outcome = pipeline.run().unwrap();

    assert_eq!(outcome.customers_loaded, 3);
    assert_eq!(outcome.transactions_loaded, 4);
    assert_eq!(outcome.loans_loaded, 3);
    assert!(outcome.quality.passed());

    assert_eq!(
        ws.output("transaction_volume_analytics.csv"),
        "\
Period,Region,TransactionCount,TotalAmount,AverageAmount
2024-01-01,EU,1,200.00,200.00
2024-01-01,US,2,150.00,75.00
2024-02-01,US,1,1234.56,1234.56
"
    );

    assert_eq!(
        ws.output("loan_default_analytics.csv"),
        "\
Region,TotalLoans,DefaultedLoans,DefaultRate,TotalDefaultedAmount
US,2,1,50.00,1000.00
EU,1,0,0.00,0.00
"
    );

    assert_eq!(
        ws.output("customer_activity_analytics.csv"),
        "\
CustomerId,CustomerName,Region,TransactionCount,TotalTransactionAmount,ActiveLoans,LastActivityDate
C001,Alice Smith,US,2,150.00,0,2024-01-20
C002,Bob Jones,EU,1,200.00,0,2024-01-10
C003,Cara Diaz,US,0,0.00,1,2023-01-20
"
    );
}

#[test]
fn summary_reports_totals() {
    let ws = Workspace::new("summary", CUSTOMERS);
    let pipeline = DataPipeline::new(ws.config());
    let outcome = pipeline.run().unwrap();

    let text = pipeline.summary(&outcome);

    assert!(text.contains("Total Transactions: 4"));
    assert!(text.contains("Total Amount: $1,584.56"));
    assert!(text.contains("Jan 2024 - US: 2 transactions ($150.00)"));
    assert!(text.contains("Overall Default Rate: 33.33%"));
    assert!(text.contains("US: 50.00% (1/2 loans, $1,000.00)"));
    assert!(text.contains("Total Customers: 3"));
    assert!(text.contains("Active Customers: 2"));
    assert!(text.contains("Alice Smith (C001): 2 transactions, $150.00"));
    assert_eq!(
        outcome.analytics.loan_defaults[0].total_defaulted_amount,
        dec!(1000.00)
    );
}

#[test]
fn duplicate_customer_ids_halt_the_run() {
    let dup = format!("{CUSTOMERS}C001,Alice Again,alice2@example.com,US,2021-04-01,Basic\n");
    let ws = Workspace::new("halt", &dup);

    let err = DataPipeline::new(ws.config()).run().unwrap_err();

    assert!(matches!(err, FinflowError::QualityChecksFailed { failed: 1 }));
}

#[test]
fn step_timings_fit_inside_the_total() {
    let ws = Workspace::new("timings", CUSTOMERS);
    let outcome = DataPipeline::new(ws.config()).run().unwrap();

    let t = outcome.timings;
    assert!(t.load + t.quality + t.analyze + t.write <= t.total);
    assert!(t.total > Duration::ZERO);
}

#[test]
fn halting_can_be_disabled() {
    let dup = format!("{CUSTOMERS}C001,Alice Again,alice2@example.com,US,2021-04-01,Basic\n");
    let ws = Workspace::new("no-halt", &dup);
    let mut config = ws.config();
    config.halt_on_quality_failure = false;

    let outcome = DataPipeline::new(config).run().unwrap();

    assert!(!outcome.quality.passed());
    assert_eq!(outcome.analytics.customer_activity.len(), 4);
}

#[test]
fn missing_raw_dir_is_an_error() {
    let config = PipelineConfig::with_dirs(
        std::env::temp_dir().join("finflow-no-such-raw-dir"),
        std::env::temp_dir().join(format!("finflow-missing-{}", std::process::id())),
    );

    let err = DataPipeline::new(config.clone()).run().unwrap_err();

    assert!(matches!(err, FinflowError::MissingInput { .. }));
    let _ = fs::remove_dir_all(&config.analytics_dir);
}
