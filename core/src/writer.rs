//! CSV emission of the analytics tables.
//!
//! Money and rates are written with two decimals, dates as YYYY-MM-DD.

use crate::{
    error::FinflowResult,
    model::{CustomerActivityAnalytics, LoanDefaultAnalytics, TransactionVolumeAnalytics},
};
use chrono::NaiveDate;
use csv::Writer;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{fs::File, io::Write, path::Path};

pub const TRANSACTION_VOLUME_HEADER: [&str; 5] = [
    "Period",
    "Region",
    "TransactionCount",
    "TotalAmount",
    "AverageAmount",
];

pub const LOAN_DEFAULT_HEADER: [&str; 5] = [
    "Region",
    "TotalLoans",
    "DefaultedLoans",
    "DefaultRate",
    "TotalDefaultedAmount",
];

pub const CUSTOMER_ACTIVITY_HEADER: [&str; 7] = [
    "CustomerId",
    "CustomerName",
    "Region",
    "TransactionCount",
    "TotalTransactionAmount",
    "ActiveLoans",
    "LastActivityDate",
];

/// Two decimals, midpoint away from zero.
pub fn format_fixed2(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ── Writer-generic forms (used by tests with in-memory buffers) ──────────────

pub fn write_transaction_volume_to<W: Write>(
    rows: &[TransactionVolumeAnalytics],
    out: W,
) -> FinflowResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(TRANSACTION_VOLUME_HEADER)?;
    for row in rows {
        wtr.write_record([
            format_date(row.period),
            row.region.clone(),
            row.transaction_count.to_string(),
            format_fixed2(row.total_amount),
            format_fixed2(row.average_amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_loan_defaults_to<W: Write>(
    rows: &[LoanDefaultAnalytics],
    out: W,
) -> FinflowResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(LOAN_DEFAULT_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.region.clone(),
            row.total_loans.to_string(),
            row.defaulted_loans.to_string(),
            format_fixed2(row.default_rate),
            format_fixed2(row.total_defaulted_amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_customer_activity_to<W: Write>(
    rows: &[CustomerActivityAnalytics],
    out: W,
) -> FinflowResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(CUSTOMER_ACTIVITY_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.customer_id.clone(),
            row.customer_name.clone(),
            row.region.clone(),
            row.transaction_count.to_string(),
            format_fixed2(row.total_transaction_amount),
            row.active_loans.to_string(),
            format_date(row.last_activity_date),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

// ── File forms ───────────────────────────────────────────────────────────────

pub fn write_transaction_volume(
    rows: &[TransactionVolumeAnalytics],
    path: &Path,
) -> FinflowResult<()> {
    write_transaction_volume_to(rows, File::create(path)?)?;
    log::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_loan_defaults(rows: &[LoanDefaultAnalytics], path: &Path) -> FinflowResult<()> {
    write_loan_defaults_to(rows, File::create(path)?)?;
    log::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_customer_activity(
    rows: &[CustomerActivityAnalytics],
    path: &Path,
) -> FinflowResult<()> {
    write_customer_activity_to(rows, File::create(path)?)?;
    log::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
