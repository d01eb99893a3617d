//! Record types: raw inputs and the derived analytics rows.
//!
//! RULE: Records are built once by the loader and never mutated.
//! The analytics engine borrows them and produces fresh rows.

use crate::types::{EntityId, Money, RegionCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loan status tags recognized by the aggregations.
/// Matching is exact and case-sensitive; any other tag is neither.
pub mod loan_status {
    pub const ACTIVE: &str = "Active";
    pub const PAID: &str = "Paid";
    pub const DEFAULTED: &str = "Defaulted";
}

// ── Raw records ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: EntityId,
    pub name: String,
    pub email: String,
    pub region: RegionCode,
    pub join_date: NaiveDate,
    pub account_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: EntityId,
    /// Not required to resolve to a loaded customer.
    pub customer_id: EntityId,
    pub transaction_date: NaiveDate,
    pub amount: Money,
    pub transaction_type: String,
    pub region: RegionCode,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: EntityId,
    pub customer_id: EntityId,
    pub loan_amount: Money,
    pub loan_date: NaiveDate,
    pub region: RegionCode,
    pub status: String, // Active | Paid | Defaulted
    pub term_months: u32,
    pub interest_rate: Decimal,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.status == loan_status::ACTIVE
    }

    pub fn is_defaulted(&self) -> bool {
        self.status == loan_status::DEFAULTED
    }
}

// ── Derived rows ─────────────────────────────────────────────────────────────

/// One (region, month) bucket of transaction volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionVolumeAnalytics {
    /// First day of the calendar month.
    pub period: NaiveDate,
    pub region: RegionCode,
    pub transaction_count: u64,
    pub total_amount: Money,
    pub average_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDefaultAnalytics {
    pub region: RegionCode,
    pub total_loans: u64,
    pub defaulted_loans: u64,
    /// Percentage in [0, 100].
    pub default_rate: Decimal,
    pub total_defaulted_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerActivityAnalytics {
    pub customer_id: EntityId,
    pub customer_name: String,
    pub region: RegionCode,
    pub transaction_count: u64,
    pub total_transaction_amount: Money,
    pub active_loans: u64,
    /// Latest transaction date, or the join date when there are none.
    pub last_activity_date: NaiveDate,
}
