//! The pipeline: load, check, aggregate, write.
//!
//! EXECUTION ORDER (fixed):
//!   1. Load customers, transactions, loans
//!   2. Run data quality checks (may halt)
//!   3. Run the three aggregations
//!   4. Write the three analytics tables (output directory created up front)
//!
//! RULES:
//!   - The aggregations only see fully loaded, immutable record slices.
//!   - No aggregation consumes another aggregation's output.
//!   - Rendering the console report is left to the caller.

use crate::{
    analytics_engine::{
        analyze_customer_activity, analyze_loan_defaults, analyze_transaction_volume,
    },
    config::PipelineConfig,
    error::{FinflowError, FinflowResult},
    loader,
    model::{
        Customer, CustomerActivityAnalytics, Loan, LoanDefaultAnalytics, Transaction,
        TransactionVolumeAnalytics,
    },
    quality::{run_quality_checks, QualityReport},
    report::render_summary,
    writer,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The three derived collections of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSet {
    pub transaction_volume: Vec<TransactionVolumeAnalytics>,
    pub loan_defaults: Vec<LoanDefaultAnalytics>,
    pub customer_activity: Vec<CustomerActivityAnalytics>,
}

/// Wall-clock time spent in each step of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTimings {
    pub load: Duration,
    pub quality: Duration,
    pub analyze: Duration,
    pub write: Duration,
    pub total: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub customers_loaded: usize,
    pub transactions_loaded: usize,
    pub loans_loaded: usize,
    pub quality: QualityReport,
    pub analytics: AnalyticsSet,
    pub timings: StepTimings,
}

pub struct DataPipeline {
    pub config: PipelineConfig,
}

impl DataPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the three aggregations over already loaded records.
    pub fn analyze(
        customers: &[Customer],
        transactions: &[Transaction],
        loans: &[Loan],
    ) -> AnalyticsSet {
        AnalyticsSet {
            transaction_volume: analyze_transaction_volume(transactions),
            loan_defaults: analyze_loan_defaults(loans),
            customer_activity: analyze_customer_activity(customers, transactions, loans),
        }
    }

    pub fn run(&self) -> FinflowResult<PipelineOutcome> {
        let cfg = &self.config;
        let started = Instant::now();
        let mut timings = StepTimings::default();
        log::info!("FinFlow pipeline starting");
        std::fs::create_dir_all(&cfg.analytics_dir)?;

        // 1. Load
        let step = Instant::now();
        log::info!("Step 1: loading raw data from {}", cfg.raw_data_dir.display());
        let transactions = loader::load_transactions(&cfg.transactions_path())?;
        let loans = loader::load_loans(&cfg.loans_path())?;
        let customers = loader::load_customers(&cfg.customers_path())?;
        log::info!(
            "loaded {} transactions, {} loans, {} customers",
            transactions.len(),
            loans.len(),
            customers.len()
        );
        timings.load = step.elapsed();
        log::debug!("Step 1 took {:.3} sec", timings.load.as_secs_f64());

        // 2. Quality gate
        log::info!("Step 2: running data quality checks");
        let step = Instant::now();
        let quality = run_quality_checks(&customers, &transactions, &loans);
        timings.quality = step.elapsed();
        log::debug!("Step 2 took {:.3} sec", timings.quality.as_secs_f64());
        if !quality.passed() {
            let failed = quality.failed_checks().count();
            if cfg.halt_on_quality_failure {
                log::error!("{failed} quality check(s) failed, pipeline stopping");
                return Err(FinflowError::QualityChecksFailed { failed });
            }
            log::warn!("{failed} quality check(s) failed, continuing");
        }

        // 3. Aggregate
        log::info!("Step 3: running analytics transformations");
        let step = Instant::now();
        let analytics = Self::analyze(&customers, &transactions, &loans);
        timings.analyze = step.elapsed();
        log::info!(
            "generated {} transaction volume, {} loan default, {} customer activity rows",
            analytics.transaction_volume.len(),
            analytics.loan_defaults.len(),
            analytics.customer_activity.len()
        );
        log::debug!("Step 3 took {:.3} sec", timings.analyze.as_secs_f64());

        // 4. Emit
        log::info!("Step 4: writing analytics tables");
        let step = Instant::now();
        writer::write_transaction_volume(
            &analytics.transaction_volume,
            &cfg.output_path(&cfg.outputs.transaction_volume),
        )?;
        writer::write_loan_defaults(
            &analytics.loan_defaults,
            &cfg.output_path(&cfg.outputs.loan_defaults),
        )?;
        writer::write_customer_activity(
            &analytics.customer_activity,
            &cfg.output_path(&cfg.outputs.customer_activity),
        )?;
        timings.write = step.elapsed();
        log::info!("analytics tables written to {}", cfg.analytics_dir.display());

        timings.total = started.elapsed();
        log::info!("FinFlow pipeline complete ({:.1} sec)", timings.total.as_secs_f64());

        Ok(PipelineOutcome {
            customers_loaded: customers.len(),
            transactions_loaded: transactions.len(),
            loans_loaded: loans.len(),
            quality,
            analytics,
            timings,
        })
    }

    /// Console report for an outcome, sized by the report config.
    pub fn summary(&self, outcome: &PipelineOutcome) -> String {
        render_summary(
            &outcome.analytics.transaction_volume,
            &outcome.analytics.loan_defaults,
            &outcome.analytics.customer_activity,
            self.config.report.top_periods,
            self.config.report.top_customers,
        )
    }
}
