// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tutorledger::engine::dashboard::{build, salary_breakdown, DashboardFilter};
use tutorledger::models::{
    Session, Teacher, Transaction, TransactionStatus, TransactionType,
};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(
    id: i64,
    amount: &str,
    r#type: TransactionType,
    tags: &[&str],
    date: NaiveDateTime,
) -> Transaction {
    let amount = dec(amount);
    Transaction {
        id,
        name: format!("tx-{}", id),
        amount,
        r#type,
        tags: tags.iter().map(|s| s.to_string()).collect(),
        notes: None,
        status: TransactionStatus::Active,
        transaction_date: date,
        tax_rate: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        net_amount: amount,
        created_at: date,
    }
}

fn session(
    id: i64,
    teacher_id: i64,
    package_id: i64,
    date: NaiveDateTime,
    hours: &str,
    confirmed: bool,
) -> Session {
    Session {
        id,
        teacher_id,
        package_id,
        session_date: date,
        duration: dec(hours),
        is_confirmed: confirmed,
    }
}

fn one_teacher(rate: &str) -> HashMap<i64, Teacher> {
    let mut map = HashMap::new();
    map.insert(
        1,
        Teacher {
            id: 1,
            name: "Anna".into(),
            hourly_rate: dec(rate),
            is_active: true,
        },
    );
    map
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

#[test]
fn defaults_to_current_month_and_reports_the_window() {
    let txs = vec![
        tx(1, "500", TransactionType::Income, &[], dt(2024, 5, 3)),
        tx(2, "100", TransactionType::Income, &[], dt(2024, 4, 28)), // outside
    ];
    let map = one_teacher("50");
    let report = build(&txs, &[], |id| map.get(&id), &DashboardFilter::default(), today()).unwrap();

    assert_eq!(report.period_start.to_string(), "2024-05-01 00:00:00");
    assert_eq!(report.period_end.to_string(), "2024-05-31 23:59:59.999");
    assert_eq!(report.total_income, dec("500"));
}

#[test]
fn net_profit_subtracts_teacher_salaries() {
    let txs = vec![
        tx(1, "1000", TransactionType::Income, &[], dt(2024, 5, 3)),
        tx(2, "200", TransactionType::Expense, &[], dt(2024, 5, 4)),
    ];
    let sessions = [session(1, 1, 1, dt(2024, 5, 10), "4", true)];
    let map = one_teacher("50");
    let report = build(&txs, &sessions, |id| map.get(&id), &DashboardFilter::default(), today())
        .unwrap();

    assert_eq!(report.gross_profit, dec("800"));
    assert_eq!(report.total_teacher_salaries, dec("200"));
    assert_eq!(report.net_profit, dec("600"));
}

#[test]
fn session_packages_are_counted_distinct_and_confirmed_only() {
    let sessions = [
        session(1, 1, 10, dt(2024, 5, 1), "1", true),
        session(2, 1, 10, dt(2024, 5, 8), "1", true), // same package
        session(3, 1, 20, dt(2024, 5, 9), "1", true),
        session(4, 1, 30, dt(2024, 5, 9), "1", false), // unconfirmed
        session(5, 1, 40, dt(2024, 4, 9), "1", true),  // outside period
    ];
    let map = one_teacher("50");
    let report = build(&[], &sessions, |id| map.get(&id), &DashboardFilter::default(), today())
        .unwrap();
    assert_eq!(report.active_session_packages, 2);
}

#[test]
fn subscription_sales_are_counted_by_tag() {
    let txs = vec![
        tx(1, "100", TransactionType::Income, &["subscription"], dt(2024, 5, 1)),
        tx(2, "100", TransactionType::Income, &["subscription-package"], dt(2024, 5, 2)),
        tx(3, "100", TransactionType::Income, &["lesson"], dt(2024, 5, 3)),
        tx(4, "100", TransactionType::Expense, &["subscription"], dt(2024, 5, 4)),
        tx(5, "100", TransactionType::Income, &["subscription"], dt(2024, 4, 1)), // outside
    ];
    let map = one_teacher("50");
    let report = build(&txs, &[], |id| map.get(&id), &DashboardFilter::default(), today()).unwrap();
    assert_eq!(report.active_subscription_packages, 2);
}

#[test]
fn type_and_tag_filters_shape_the_summary_but_not_the_counts() {
    let txs = vec![
        tx(1, "100", TransactionType::Income, &["subscription"], dt(2024, 5, 1)),
        tx(2, "40", TransactionType::Expense, &["rent"], dt(2024, 5, 2)),
    ];
    let sessions = [session(1, 1, 7, dt(2024, 5, 5), "1", true)];
    let map = one_teacher("50");
    let filters = DashboardFilter {
        r#type: Some(TransactionType::Expense),
        ..Default::default()
    };
    let report = build(&txs, &sessions, |id| map.get(&id), &filters, today()).unwrap();

    assert_eq!(report.total_income, Decimal::ZERO);
    assert_eq!(report.total_expenses, dec("40"));
    // Counters ignore the type/tag filters.
    assert_eq!(report.active_subscription_packages, 1);
    assert_eq!(report.active_session_packages, 1);
    // Salaries are also unaffected by the transaction filters.
    assert_eq!(report.total_teacher_salaries, dec("50"));
}

#[test]
fn excluded_transactions_never_reach_the_report() {
    let mut skipped = tx(2, "999", TransactionType::Income, &[], dt(2024, 5, 2));
    skipped.status = TransactionStatus::Excluded;
    let txs = vec![
        tx(1, "100", TransactionType::Income, &[], dt(2024, 5, 1)),
        skipped,
    ];
    let map = one_teacher("50");
    let report = build(&txs, &[], |id| map.get(&id), &DashboardFilter::default(), today()).unwrap();
    assert_eq!(report.total_income, dec("100"));
}

#[test]
fn salary_breakdown_without_dates_covers_all_time() {
    let sessions = [
        session(1, 1, 1, dt(2020, 1, 1), "2", true),
        session(2, 1, 1, dt(2024, 5, 1), "3", true),
    ];
    let map = one_teacher("50");

    // The dashboard with no dates only sees the current month...
    let report = build(&[], &sessions, |id| map.get(&id), &DashboardFilter::default(), today())
        .unwrap();
    assert_eq!(report.total_teacher_salaries, dec("150"));

    // ...while the salary breakdown with no dates sees everything.
    let payroll = salary_breakdown(&sessions, |id| map.get(&id), None, None);
    assert_eq!(payroll.total_payroll, dec("250"));
    assert_eq!(payroll.breakdown[0].total_hours, dec("5"));
}
