// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Session, Teacher};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEntry {
    pub teacher_id: i64,
    pub teacher_name: String,
    pub total_hours: Decimal,
    pub total_pay: Decimal,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub total_payroll: Decimal,
    pub breakdown: Vec<PayrollEntry>,
}

/// Confirmed sessions inside the (optionally open-ended) window. Only
/// confirmed sessions ever count toward payroll.
pub fn sessions_in_period<'a>(
    sessions: &'a [Session],
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> impl Iterator<Item = &'a Session> {
    sessions.iter().filter(move |s| {
        s.is_confirmed
            && start.is_none_or(|b| s.session_date >= b)
            && end.is_none_or(|b| s.session_date <= b)
    })
}

/// Joins sessions to teachers through the supplied lookup and groups pay per
/// teacher. A session whose teacher no longer resolves is skipped and
/// contributes nothing; payroll reporting stays usable after a teacher row is
/// deleted. The breakdown comes back ordered by teacher id.
pub fn aggregate<'a, 'b, I, F>(sessions: I, lookup_teacher: F) -> Payroll
where
    I: IntoIterator<Item = &'a Session>,
    F: Fn(i64) -> Option<&'b Teacher>,
{
    let mut by_teacher: BTreeMap<i64, PayrollEntry> = BTreeMap::new();
    for session in sessions {
        let teacher = match lookup_teacher(session.teacher_id) {
            Some(t) => t,
            None => continue,
        };
        let entry = by_teacher.entry(teacher.id).or_insert_with(|| PayrollEntry {
            teacher_id: teacher.id,
            teacher_name: teacher.name.clone(),
            total_hours: Decimal::ZERO,
            total_pay: Decimal::ZERO,
        });
        entry.total_hours += session.duration;
        entry.total_pay += session.duration * teacher.hourly_rate;
    }

    let breakdown: Vec<PayrollEntry> = by_teacher.into_values().collect();
    let total_payroll = breakdown
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc + e.total_pay);
    Payroll {
        total_payroll,
        breakdown,
    }
}
