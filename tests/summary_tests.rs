// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tutorledger::engine::summary::summarize;
use tutorledger::models::{Transaction, TransactionStatus, TransactionType};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(
    id: i64,
    amount: &str,
    tax_rate: &str,
    r#type: TransactionType,
    tags: &[&str],
) -> Transaction {
    let amount = dec(amount);
    let tax_rate = dec(tax_rate);
    let (tax_amount, net_amount) = Transaction::tax_parts(amount, tax_rate);
    Transaction {
        id,
        name: format!("tx-{}", id),
        amount,
        r#type,
        tags: tags.iter().map(|s| s.to_string()).collect(),
        notes: None,
        status: TransactionStatus::Active,
        transaction_date: dt(2024, 1, id as u32),
        tax_rate,
        tax_amount,
        net_amount,
        created_at: dt(2024, 1, id as u32),
    }
}

#[test]
fn tax_parts_derive_exactly() {
    let (tax, net) = Transaction::tax_parts(dec("200"), dec("0.1"));
    assert_eq!(tax, dec("20"));
    assert_eq!(net, dec("180"));

    let (tax, net) = Transaction::tax_parts(dec("99.99"), dec("0"));
    assert_eq!(tax, Decimal::ZERO);
    assert_eq!(net, dec("99.99"));

    // Full tax never drives the net negative.
    let (tax, net) = Transaction::tax_parts(dec("50"), dec("1"));
    assert_eq!(tax, dec("50"));
    assert_eq!(net, Decimal::ZERO);
}

#[test]
fn income_counts_net_and_expenses_count_gross() {
    let txs = vec![
        tx(1, "1000", "0.1", TransactionType::Income, &["lesson"]),
        tx(2, "200", "0.5", TransactionType::Expense, &["rent"]),
    ];
    let s = summarize(&txs);
    assert_eq!(s.total_income, dec("900"));
    assert_eq!(s.total_tax, dec("100"));
    // Expense tax never reduces the expense figure.
    assert_eq!(s.total_expenses, dec("200"));
    assert_eq!(s.gross_profit, dec("700"));
}

#[test]
fn every_tag_receives_the_full_amount() {
    let txs = vec![tx(1, "100", "0", TransactionType::Income, &["a", "b"])];
    let s = summarize(&txs);
    assert_eq!(s.income_by_category["a"], dec("100"));
    assert_eq!(s.income_by_category["b"], dec("100"));
    // The per-tag view double-counts by design; the total does not.
    assert_eq!(s.total_income, dec("100"));
}

#[test]
fn empty_input_yields_zeroed_summary() {
    let s = summarize(&[]);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.total_tax, Decimal::ZERO);
    assert_eq!(s.gross_profit, Decimal::ZERO);
    assert!(s.income_by_category.is_empty());
    assert!(s.expenses_by_category.is_empty());
}

#[test]
fn gross_profit_may_be_negative() {
    let txs = vec![
        tx(1, "100", "0", TransactionType::Income, &[]),
        tx(2, "300", "0", TransactionType::Expense, &[]),
    ];
    assert_eq!(summarize(&txs).gross_profit, dec("-200"));
}

#[test]
fn summarizing_disjoint_halves_reproduces_the_whole() {
    let txs = vec![
        tx(1, "100", "0.1", TransactionType::Income, &["lesson"]),
        tx(2, "40", "0", TransactionType::Expense, &["rent"]),
        tx(3, "250", "0.2", TransactionType::Income, &["lesson", "premium"]),
        tx(4, "15", "0", TransactionType::Expense, &["supplies", "rent"]),
    ];
    let whole = summarize(&txs);
    let left = summarize(&txs[..2]);
    let right = summarize(&txs[2..]);

    assert_eq!(whole.total_income, left.total_income + right.total_income);
    assert_eq!(
        whole.total_expenses,
        left.total_expenses + right.total_expenses
    );
    assert_eq!(whole.total_tax, left.total_tax + right.total_tax);
    assert_eq!(whole.gross_profit, left.gross_profit + right.gross_profit);

    for (tag, amount) in &whole.income_by_category {
        let partial = left.income_by_category.get(tag).copied().unwrap_or_default()
            + right.income_by_category.get(tag).copied().unwrap_or_default();
        assert_eq!(*amount, partial, "income tag {}", tag);
    }
    for (tag, amount) in &whole.expenses_by_category {
        let partial = left
            .expenses_by_category
            .get(tag)
            .copied()
            .unwrap_or_default()
            + right
                .expenses_by_category
                .get(tag)
                .copied()
                .unwrap_or_default();
        assert_eq!(*amount, partial, "expense tag {}", tag);
    }
}
