//! Console summary report.
//!
//! Rendering returns a String; the runner decides where it goes.

use crate::{
    analytics_engine::percentage,
    model::{CustomerActivityAnalytics, LoanDefaultAnalytics, TransactionVolumeAnalytics},
    types::Money,
    writer::format_fixed2,
};
use rust_decimal::Decimal;
use std::fmt::Write;

const RULE: &str = "===========================================================";

/// `$1,234.56` style money: two decimals with thousands separators.
pub fn format_money(value: Money) -> String {
    let fixed = format_fixed2(value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac_part}")
}

/// Build the human-readable summary of one pipeline run.
pub fn render_summary(
    volume: &[TransactionVolumeAnalytics],
    defaults: &[LoanDefaultAnalytics],
    activity: &[CustomerActivityAnalytics],
    top_periods: usize,
    top_customers: usize,
) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, volume, defaults, activity, top_periods, top_customers);
    out
}

fn write_report(
    out: &mut String,
    volume: &[TransactionVolumeAnalytics],
    defaults: &[LoanDefaultAnalytics],
    activity: &[CustomerActivityAnalytics],
    top_periods: usize,
    top_customers: usize,
) -> std::fmt::Result {
    writeln!(out, "=== FINFLOW BANKING ANALYTICS REPORT ===")?;
    writeln!(out)?;

    // ── Transaction volume ─────────────────────────────────
    writeln!(out, "TRANSACTION VOLUME ANALYSIS")?;
    writeln!(out, "{RULE}")?;
    let total_txns: u64 = volume.iter().map(|v| v.transaction_count).sum();
    let total_amount: Money = volume.iter().map(|v| v.total_amount).sum();
    writeln!(out, "Total Transactions: {total_txns}")?;
    writeln!(out, "Total Amount: {}", format_money(total_amount))?;
    writeln!(out)?;
    writeln!(out, "Top Periods by Transaction Count:")?;
    let mut busiest: Vec<&TransactionVolumeAnalytics> = volume.iter().collect();
    busiest.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));
    for v in busiest.into_iter().take(top_periods) {
        writeln!(
            out,
            "  {} - {}: {} transactions ({})",
            v.period.format("%b %Y"),
            v.region,
            v.transaction_count,
            format_money(v.total_amount)
        )?;
    }

    // ── Loan defaults ──────────────────────────────────────
    writeln!(out)?;
    writeln!(out, "LOAN DEFAULT ANALYSIS")?;
    writeln!(out, "{RULE}")?;
    let total_loans: u64 = defaults.iter().map(|d| d.total_loans).sum();
    let total_defaults: u64 = defaults.iter().map(|d| d.defaulted_loans).sum();
    writeln!(out, "Total Loans: {total_loans}")?;
    writeln!(out, "Total Defaults: {total_defaults}")?;
    writeln!(
        out,
        "Overall Default Rate: {}%",
        format_fixed2(overall_default_rate(defaults))
    )?;
    writeln!(out)?;
    writeln!(out, "Regional Default Rates:")?;
    for d in defaults {
        writeln!(
            out,
            "  {}: {}% ({}/{} loans, {})",
            d.region,
            format_fixed2(d.default_rate),
            d.defaulted_loans,
            d.total_loans,
            format_money(d.total_defaulted_amount)
        )?;
    }

    // ── Customer activity ──────────────────────────────────
    writeln!(out)?;
    writeln!(out, "CUSTOMER ACTIVITY ANALYSIS")?;
    writeln!(out, "{RULE}")?;
    let active = activity.iter().filter(|c| c.transaction_count > 0).count();
    writeln!(out, "Total Customers: {}", activity.len())?;
    writeln!(out, "Active Customers: {active}")?;
    writeln!(out)?;
    writeln!(out, "Most Active Customers:")?;
    for c in activity.iter().take(top_customers) {
        writeln!(
            out,
            "  {} ({}): {} transactions, {}",
            c.customer_name,
            c.customer_id,
            c.transaction_count,
            format_money(c.total_transaction_amount)
        )?;
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Overall default rate across every region, for callers that only hold rows.
pub fn overall_default_rate(defaults: &[LoanDefaultAnalytics]) -> Decimal {
    let total: u64 = defaults.iter().map(|d| d.total_loans).sum();
    let defaulted: u64 = defaults.iter().map(|d| d.defaulted_loans).sum();
    percentage(defaulted, total)
}
