//! Delimited-text ingestion for the three raw files.
//!
//! The first line is a header. Fields are comma separated, optionally quoted,
//! and trimmed. A row that is short or has an unparseable typed column is
//! skipped with a warning; it never aborts the load.

use crate::{
    error::{FinflowError, FinflowResult},
    model::{Customer, Loan, Transaction},
};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::{fs::File, io::Read, path::Path, str::FromStr};

pub const CUSTOMER_COLUMNS: usize = 6;
pub const TRANSACTION_COLUMNS: usize = 7;
pub const LOAN_COLUMNS: usize = 8;

/// Integer digits allowed in an amount. Keeps every sum well inside `Decimal`'s range.
pub const MAX_AMOUNT_INTEGER_DIGITS: usize = 18;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ── Field parsers ────────────────────────────────────────────────────────────

/// Parse a calendar date, truncating any time-of-day component.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse an unsigned decimal amount: digits with at most one decimal point,
/// and at most `MAX_AMOUNT_INTEGER_DIGITS` significant digits before it.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    let mut points = 0;
    let mut digits = 0;
    for ch in raw.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }
    let integer_part = raw.split('.').next().unwrap_or("").trim_start_matches('0');
    if integer_part.len() > MAX_AMOUNT_INTEGER_DIGITS {
        return None;
    }
    Decimal::from_str(raw).ok()
}

fn parse_term(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

// ── Row mappers ──────────────────────────────────────────────────────────────

fn customer_from_row(row: &StringRecord) -> Option<Customer> {
    if row.len() < CUSTOMER_COLUMNS {
        return None;
    }
    Some(Customer {
        customer_id: row[0].to_string(),
        name: row[1].to_string(),
        email: row[2].to_string(),
        region: row[3].to_string(),
        join_date: parse_date(&row[4])?,
        account_type: row[5].to_string(),
    })
}

fn transaction_from_row(row: &StringRecord) -> Option<Transaction> {
    if row.len() < TRANSACTION_COLUMNS {
        return None;
    }
    Some(Transaction {
        transaction_id: row[0].to_string(),
        customer_id: row[1].to_string(),
        transaction_date: parse_date(&row[2])?,
        amount: parse_amount(&row[3])?,
        transaction_type: row[4].to_string(),
        region: row[5].to_string(),
        description: row[6].to_string(),
    })
}

fn loan_from_row(row: &StringRecord) -> Option<Loan> {
    if row.len() < LOAN_COLUMNS {
        return None;
    }
    Some(Loan {
        loan_id: row[0].to_string(),
        customer_id: row[1].to_string(),
        loan_amount: parse_amount(&row[2])?,
        loan_date: parse_date(&row[3])?,
        region: row[4].to_string(),
        status: row[5].to_string(),
        term_months: parse_term(&row[6])?,
        interest_rate: parse_amount(&row[7])?,
    })
}

// ── Readers ──────────────────────────────────────────────────────────────────

/// Read every data row of `reader` through `map`, skipping rejects.
fn read_rows<R, T>(reader: R, label: &str, map: fn(&StringRecord) -> Option<T>) -> Vec<T>
where
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in csv_reader.records() {
        match result {
            Ok(row) => {
                if row.iter().all(str::is_empty) {
                    continue;
                }
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                match map(&row) {
                    Some(record) => records.push(record),
                    None => {
                        skipped += 1;
                        log::warn!("{label}: skipping malformed row on line {line}");
                    }
                }
            }
            Err(e) => {
                skipped += 1;
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                log::warn!("{label}: failed to read row on line {line}: {e}");
            }
        }
    }

    log::debug!("{label}: loaded {} rows, skipped {skipped}", records.len());
    records
}

fn open_input(path: &Path) -> FinflowResult<File> {
    if !path.exists() {
        return Err(FinflowError::MissingInput {
            path: path.display().to_string(),
        });
    }
    Ok(File::open(path)?)
}

pub fn load_customers_from_reader<R: Read>(reader: R) -> Vec<Customer> {
    read_rows(reader, "customers", customer_from_row)
}

pub fn load_transactions_from_reader<R: Read>(reader: R) -> Vec<Transaction> {
    read_rows(reader, "transactions", transaction_from_row)
}

pub fn load_loans_from_reader<R: Read>(reader: R) -> Vec<Loan> {
    read_rows(reader, "loans", loan_from_row)
}

pub fn load_customers(path: &Path) -> FinflowResult<Vec<Customer>> {
    Ok(load_customers_from_reader(open_input(path)?))
}

pub fn load_transactions(path: &Path) -> FinflowResult<Vec<Transaction>> {
    Ok(load_transactions_from_reader(open_input(path)?))
}

pub fn load_loans(path: &Path) -> FinflowResult<Vec<Loan>> {
    Ok(load_loans_from_reader(open_input(path)?))
}
