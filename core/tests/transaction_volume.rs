//! Transaction volume: (region, month) buckets.

use chrono::NaiveDate;
use finflow_core::{analytics_engine::analyze_transaction_volume, model::Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(id: &str, region: &str, on: NaiveDate, amount: Decimal) -> Transaction {
    Transaction {
        transaction_id: id.into(),
        customer_id: "C001".into(),
        transaction_date: on,
        amount,
        transaction_type: "purchase".into(),
        region: region.into(),
        description: String::new(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn same_month_same_region_share_a_bucket() {
    let txns = vec![
        txn("T1", "US", date(2024, 1, 15), dec!(100)),
        txn("T2", "US", date(2024, 1, 20), dec!(50)),
        txn("T3", "EU", date(2024, 1, 10), dec!(200)),
    ];

    let rows = analyze_transaction_volume(&txns);

    assert_eq!(rows.len(), 2);
    // EU sorts before US within the same period.
    assert_eq!(rows[0].period, date(2024, 1, 1));
    assert_eq!(rows[0].region, "EU");
    assert_eq!(rows[0].transaction_count, 1);
    assert_eq!(rows[0].total_amount, dec!(200));
    assert_eq!(rows[0].average_amount, dec!(200));

    assert_eq!(rows[1].period, date(2024, 1, 1));
    assert_eq!(rows[1].region, "US");
    assert_eq!(rows[1].transaction_count, 2);
    assert_eq!(rows[1].total_amount, dec!(150));
    assert_eq!(rows[1].average_amount, dec!(75));
}

#[test]
fn periods_sort_before_regions() {
    let txns = vec![
        txn("T1", "AA", date(2024, 3, 2), dec!(1)),
        txn("T2", "ZZ", date(2024, 1, 31), dec!(1)),
        txn("T3", "AA", date(2023, 12, 1), dec!(1)),
    ];

    let rows = analyze_transaction_volume(&txns);
    let keys: Vec<(NaiveDate, &str)> = rows.iter().map(|r| (r.period, r.region.as_str())).collect();

    assert_eq!(
        keys,
        vec![
            (date(2023, 12, 1), "AA"),
            (date(2024, 1, 1), "ZZ"),
            (date(2024, 3, 1), "AA"),
        ]
    );
}

#[test]
fn same_month_in_different_years_are_separate() {
    let txns = vec![
        txn("T1", "US", date(2023, 5, 5), dec!(10)),
        txn("T2", "US", date(2024, 5, 5), dec!(10)),
    ];
    assert_eq!(analyze_transaction_volume(&txns).len(), 2);
}

#[test]
fn decimal_sums_do_not_drift() {
    let txns: Vec<Transaction> = (0..10)
        .map(|i| txn(&format!("T{i}"), "US", date(2024, 6, 1 + i), dec!(0.10)))
        .collect();

    let rows = analyze_transaction_volume(&txns);

    assert_eq!(rows[0].total_amount, dec!(1.00));
    assert_eq!(rows[0].average_amount, dec!(0.10));
}

#[test]
fn group_counts_cover_every_input() {
    let txns: Vec<Transaction> = (0..40u32)
        .map(|i| {
            let region = ["US", "EU", "APAC"][(i % 3) as usize];
            txn(&format!("T{i}"), region, date(2024, 1 + i % 12, 1 + i % 28), dec!(5))
        })
        .collect();

    let rows = analyze_transaction_volume(&txns);
    let covered: u64 = rows.iter().map(|r| r.transaction_count).sum();

    assert_eq!(covered, txns.len() as u64);
    for r in &rows {
        assert_eq!(r.total_amount, Decimal::from(r.transaction_count) * dec!(5));
    }
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(analyze_transaction_volume(&[]).is_empty());
}
