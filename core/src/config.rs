use crate::error::FinflowResult;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input file names inside `raw_data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub customers: String,
    pub transactions: String,
    pub loans: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            customers: "customers.csv".into(),
            transactions: "transactions.csv".into(),
            loans: "loans.csv".into(),
        }
    }
}

/// Output file names inside `analytics_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub transaction_volume: String,
    pub loan_defaults: String,
    pub customer_activity: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            transaction_volume: "transaction_volume_analytics.csv".into(),
            loan_defaults: "loan_default_analytics.csv".into(),
            customer_activity: "customer_activity_analytics.csv".into(),
        }
    }
}

/// Sizes of the console report's top-N lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_periods: usize,
    pub top_customers: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_periods: 5,
            top_customers: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub raw_data_dir: PathBuf,
    pub analytics_dir: PathBuf,
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub report: ReportConfig,
    /// Stop before aggregation when a Fail-severity quality check trips.
    pub halt_on_quality_failure: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_data_dir: PathBuf::from("data/raw"),
            analytics_dir: PathBuf::from("data/analytics"),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            report: ReportConfig::default(),
            halt_on_quality_failure: true,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file. Absent fields take their defaults.
    pub fn load(path: &str) -> FinflowResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {path}"))?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_dirs(raw_data_dir: impl Into<PathBuf>, analytics_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_data_dir: raw_data_dir.into(),
            analytics_dir: analytics_dir.into(),
            ..Self::default()
        }
    }

    /// Config with hardcoded defaults for use in tests.
    pub fn default_test() -> Self {
        Self::with_dirs("tests/data/raw", "target/test-analytics")
    }

    pub fn customers_path(&self) -> PathBuf {
        self.raw_data_dir.join(&self.inputs.customers)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.raw_data_dir.join(&self.inputs.transactions)
    }

    pub fn loans_path(&self) -> PathBuf {
        self.raw_data_dir.join(&self.inputs.loans)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.analytics_dir.join(file_name)
    }
}
