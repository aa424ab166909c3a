// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tutorledger::engine::payroll::{aggregate, sessions_in_period};
use tutorledger::models::{Session, Teacher};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn teacher(id: i64, name: &str, rate: &str) -> Teacher {
    Teacher {
        id,
        name: name.into(),
        hourly_rate: dec(rate),
        is_active: true,
    }
}

fn session(id: i64, teacher_id: i64, date: NaiveDateTime, hours: &str, confirmed: bool) -> Session {
    Session {
        id,
        teacher_id,
        package_id: 1,
        session_date: date,
        duration: dec(hours),
        is_confirmed: confirmed,
    }
}

fn teacher_map(teachers: &[Teacher]) -> HashMap<i64, Teacher> {
    teachers.iter().map(|t| (t.id, t.clone())).collect()
}

#[test]
fn pay_is_hours_times_rate_grouped_per_teacher() {
    let teachers = [teacher(1, "Anna", "50")];
    let map = teacher_map(&teachers);
    let sessions = [
        session(1, 1, dt(2024, 3, 1), "2", true),
        session(2, 1, dt(2024, 3, 8), "3", true),
    ];
    let payroll = aggregate(sessions.iter(), |id| map.get(&id));
    assert_eq!(payroll.breakdown.len(), 1);
    assert_eq!(payroll.breakdown[0].total_hours, dec("5"));
    assert_eq!(payroll.breakdown[0].total_pay, dec("250"));
    assert_eq!(payroll.total_payroll, dec("250"));
}

#[test]
fn unconfirmed_sessions_never_count() {
    let teachers = [teacher(1, "Anna", "50")];
    let map = teacher_map(&teachers);
    let sessions = [
        session(1, 1, dt(2024, 3, 1), "2", true),
        session(2, 1, dt(2024, 3, 2), "10", false),
    ];
    let payroll = aggregate(sessions_in_period(&sessions, None, None), |id| map.get(&id));
    assert_eq!(payroll.total_payroll, dec("100"));
    assert_eq!(payroll.breakdown[0].total_hours, dec("2"));
}

#[test]
fn sessions_with_unresolved_teacher_are_skipped() {
    let teachers = [teacher(1, "Anna", "40")];
    let map = teacher_map(&teachers);
    let sessions = [
        session(1, 1, dt(2024, 3, 1), "1", true),
        session(2, 99, dt(2024, 3, 2), "8", true), // teacher deleted
    ];
    let payroll = aggregate(sessions.iter(), |id| map.get(&id));
    assert_eq!(payroll.breakdown.len(), 1);
    assert_eq!(payroll.total_payroll, dec("40"));
}

#[test]
fn breakdown_is_ordered_by_teacher_id() {
    let teachers = [
        teacher(3, "Cara", "30"),
        teacher(1, "Anna", "50"),
        teacher(2, "Ben", "40"),
    ];
    let map = teacher_map(&teachers);
    let sessions = [
        session(1, 3, dt(2024, 3, 1), "1", true),
        session(2, 1, dt(2024, 3, 2), "1", true),
        session(3, 2, dt(2024, 3, 3), "1", true),
    ];
    let payroll = aggregate(sessions.iter(), |id| map.get(&id));
    let ids: Vec<i64> = payroll.breakdown.iter().map(|e| e.teacher_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(payroll.total_payroll, dec("120"));
}

#[test]
fn period_bounds_are_inclusive_and_optional() {
    let sessions = [
        session(1, 1, dt(2024, 3, 1), "1", true),
        session(2, 1, dt(2024, 3, 15), "1", true),
        session(3, 1, dt(2024, 3, 31), "1", true),
    ];

    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 31)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    let hits: Vec<i64> = sessions_in_period(&sessions, Some(start), Some(end))
        .map(|s| s.id)
        .collect();
    assert_eq!(hits, vec![1, 2, 3]);

    let open_start: Vec<i64> = sessions_in_period(&sessions, None, Some(dt(2024, 3, 15)))
        .map(|s| s.id)
        .collect();
    assert_eq!(open_start, vec![1, 2]);

    let open_end: Vec<i64> = sessions_in_period(&sessions, Some(dt(2024, 3, 15)), None)
        .map(|s| s.id)
        .collect();
    assert_eq!(open_end, vec![2, 3]);
}

#[test]
fn empty_input_yields_empty_payroll() {
    let payroll = aggregate(std::iter::empty(), |_| None::<&Teacher>);
    assert!(payroll.breakdown.is_empty());
    assert_eq!(payroll.total_payroll, Decimal::ZERO);
}
