//! Shared primitive types used across the entire pipeline.

use rust_decimal::Decimal;

/// A stable, unique identifier for a customer, transaction or loan.
pub type EntityId = String;

/// Region code as it appears in the raw files ("US", "EU", ...).
pub type RegionCode = String;

/// Exact base-10 money amount.
pub type Money = Decimal;
