// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Composes the period resolver, summary, and payroll reductions into one
//! consolidated report.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::models::{Session, Teacher, Transaction, TransactionStatus, TransactionType};

use super::{filter, payroll, period, summary, Error};

/// Tags that mark an income transaction as a subscription sale.
pub const SUBSCRIPTION_TAGS: [&str; 2] = ["subscription", "subscription-package"];

#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub r#type: Option<TransactionType>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub active_session_packages: usize,
    pub active_subscription_packages: usize,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub total_teacher_salaries: Decimal,
    pub net_profit: Decimal,
    pub total_tax: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
}

/// Builds the consolidated report for the resolved period (missing bounds
/// default to the current calendar month). The resolved bounds always come
/// back in the report so callers can display the window that was used.
pub fn build<'t, F>(
    transactions: &[Transaction],
    sessions: &[Session],
    lookup_teacher: F,
    filters: &DashboardFilter,
    today: NaiveDate,
) -> Result<DashboardReport, Error>
where
    F: Fn(i64) -> Option<&'t Teacher>,
{
    let (period_start, period_end) =
        period::resolve_dashboard_period(filters.start_date, filters.end_date, today)?;
    let in_period = |dt: NaiveDateTime| dt >= period_start && dt <= period_end;

    // Distinct packages taught in the period, counted over confirmed sessions.
    let active_session_packages = sessions
        .iter()
        .filter(|s| s.is_confirmed && in_period(s.session_date))
        .map(|s| s.package_id)
        .collect::<HashSet<_>>()
        .len();

    let active_subscription_packages = transactions
        .iter()
        .filter(|t| {
            t.r#type == TransactionType::Income
                && t.status == TransactionStatus::Active
                && in_period(t.transaction_date)
                && SUBSCRIPTION_TAGS
                    .iter()
                    .any(|tag| t.tags.iter().any(|have| have == tag))
        })
        .count();

    let selected = transactions.iter().filter(|t| {
        t.status == TransactionStatus::Active
            && in_period(t.transaction_date)
            && filters.r#type.is_none_or(|ty| t.r#type == ty)
            && (filters.tags.is_empty() || filter::tags_intersect(&t.tags, &filters.tags))
    });
    let summary = summary::summarize(selected);

    let payroll = payroll::aggregate(
        payroll::sessions_in_period(sessions, Some(period_start), Some(period_end)),
        lookup_teacher,
    );

    Ok(DashboardReport {
        active_session_packages,
        active_subscription_packages,
        total_income: summary.total_income,
        total_expenses: summary.total_expenses,
        gross_profit: summary.gross_profit,
        total_teacher_salaries: payroll.total_payroll,
        net_profit: summary.gross_profit - payroll.total_payroll,
        total_tax: summary.total_tax,
        expenses_by_category: summary.expenses_by_category,
        income_by_category: summary.income_by_category,
        period_start,
        period_end,
    })
}

/// Per-teacher payroll for an optionally bounded window. Unlike the dashboard,
/// omitting both dates here means all-time, not the current month; the two
/// defaults are intentionally different and must not be unified.
pub fn salary_breakdown<'t, F>(
    sessions: &[Session],
    lookup_teacher: F,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> payroll::Payroll
where
    F: Fn(i64) -> Option<&'t Teacher>,
{
    payroll::aggregate(payroll::sessions_in_period(sessions, start, end), lookup_teacher)
}
