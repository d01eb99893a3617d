//! Analytics engine: the three grouping aggregations.
//!
//! Every function here is pure: it borrows fully loaded record slices and
//! returns a freshly ordered result vector. Nothing is logged, nothing fails.
//!
//! Each aggregation makes one linear pass into a map of group key to
//! accumulator, then a second pass over the map to finalize averages and rates.
//!
//! PRECONDITION: grouping-key fields (region, date, status, customer id) are
//! populated. The quality checks in `quality` enforce this before a pipeline run.
//!
//! ORDERING (all three are independent of input permutation):
//!   - transaction volume: period ascending, then region ascending
//!   - loan defaults:      default rate descending, then region ascending
//!   - customer activity:  transaction count descending, then customer id
//!     ascending, then input position

use crate::{
    model::{
        Customer, CustomerActivityAnalytics, Loan, LoanDefaultAnalytics, Transaction,
        TransactionVolumeAnalytics,
    },
    types::Money,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

// ── Accumulators ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct VolumeAccumulator {
    count: u64,
    total: Money,
}

#[derive(Debug, Default)]
struct DefaultAccumulator {
    total: u64,
    defaulted: u64,
    defaulted_amount: Money,
}

#[derive(Debug, Clone, Copy, Default)]
struct ActivityAccumulator {
    count: u64,
    total: Money,
    last_date: Option<NaiveDate>,
}

// ── Arithmetic helpers ───────────────────────────────────────────────────────

/// `total / count`, or zero when `count` is zero.
pub fn mean(total: Money, count: u64) -> Money {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count)
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)
}

/// Truncate a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

// ── Aggregations ─────────────────────────────────────────────────────────────

/// Group transactions by (first-of-month, region) and total them.
pub fn analyze_transaction_volume(
    transactions: &[Transaction],
) -> Vec<TransactionVolumeAnalytics> {
    // BTreeMap key order is the output order: period, then region.
    let mut groups: BTreeMap<(NaiveDate, &str), VolumeAccumulator> = BTreeMap::new();

    for txn in transactions {
        let key = (month_start(txn.transaction_date), txn.region.as_str());
        let acc = groups.entry(key).or_default();
        acc.count += 1;
        acc.total += txn.amount;
    }

    groups
        .into_iter()
        .map(|((period, region), acc)| TransactionVolumeAnalytics {
            period,
            region: region.to_string(),
            transaction_count: acc.count,
            total_amount: acc.total,
            average_amount: mean(acc.total, acc.count),
        })
        .collect()
}

/// Group loans by region and compute the share that defaulted.
pub fn analyze_loan_defaults(loans: &[Loan]) -> Vec<LoanDefaultAnalytics> {
    let mut groups: BTreeMap<&str, DefaultAccumulator> = BTreeMap::new();

    for loan in loans {
        let acc = groups.entry(loan.region.as_str()).or_default();
        acc.total += 1;
        if loan.is_defaulted() {
            acc.defaulted += 1;
            acc.defaulted_amount += loan.loan_amount;
        }
    }

    let mut rows: Vec<LoanDefaultAnalytics> = groups
        .into_iter()
        .map(|(region, acc)| LoanDefaultAnalytics {
            region: region.to_string(),
            total_loans: acc.total,
            defaulted_loans: acc.defaulted,
            default_rate: percentage(acc.defaulted, acc.total),
            total_defaulted_amount: acc.defaulted_amount,
        })
        .collect();

    // Stable sort: equal rates keep the region-ascending order of the map.
    rows.sort_by(|a, b| b.default_rate.cmp(&a.default_rate));
    rows
}

/// One row per customer with their transaction totals and active loan count.
///
/// Transactions and loans whose customer id matches no customer are ignored.
pub fn analyze_customer_activity(
    customers: &[Customer],
    transactions: &[Transaction],
    loans: &[Loan],
) -> Vec<CustomerActivityAnalytics> {
    let mut activity: HashMap<&str, ActivityAccumulator> = HashMap::new();
    for txn in transactions {
        let acc = activity.entry(txn.customer_id.as_str()).or_default();
        acc.count += 1;
        acc.total += txn.amount;
        acc.last_date = acc.last_date.max(Some(txn.transaction_date));
    }

    let mut active_loans: HashMap<&str, u64> = HashMap::new();
    for loan in loans.iter().filter(|l| l.is_active()) {
        *active_loans.entry(loan.customer_id.as_str()).or_insert(0) += 1;
    }

    let mut rows: Vec<CustomerActivityAnalytics> = customers
        .iter()
        .map(|c| {
            let acc = activity
                .get(c.customer_id.as_str())
                .copied()
                .unwrap_or_default();
            CustomerActivityAnalytics {
                customer_id: c.customer_id.clone(),
                customer_name: c.name.clone(),
                region: c.region.clone(),
                transaction_count: acc.count,
                total_transaction_amount: acc.total,
                active_loans: active_loans
                    .get(c.customer_id.as_str())
                    .copied()
                    .unwrap_or(0),
                last_activity_date: acc.last_date.unwrap_or(c.join_date),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.transaction_count
            .cmp(&a.transaction_count)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    rows
}
