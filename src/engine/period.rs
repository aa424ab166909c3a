// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Date parsing and reporting-window resolution.
//!
//! Two default policies coexist and must stay separate: the dashboard fills a
//! missing bound from the current calendar month, while the salary breakdown
//! treats a missing bound as unbounded (all-time). Transaction list filters
//! apply no default at all; an absent bound simply leaves that side open.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::Error;

fn day_start() -> NaiveTime {
    NaiveTime::MIN
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]` (also with a `T` separator) or a bare
/// `YYYY-MM-DD`, which reads as midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, Error> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(day_start()));
    }
    Err(Error::InvalidDate(s.to_string()))
}

fn last_day(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

fn bounds(year: i32, from_month: u32, to_month: u32) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    let first = NaiveDate::from_ymd_opt(year, from_month, 1)
        .ok_or_else(|| Error::InvalidDate(format!("{}-{:02}", year, from_month)))?;
    let last = NaiveDate::from_ymd_opt(year, to_month, last_day(year, to_month))
        .ok_or_else(|| Error::InvalidDate(format!("{}-{:02}", year, to_month)))?;
    Ok((first.and_time(day_start()), last.and_time(day_end())))
}

/// Expands a `YYYY-MM` string to the full calendar month,
/// `[day 1 00:00:00.000, last day 23:59:59.999]`.
pub fn month_bounds(month: &str) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    let bad = || Error::InvalidDate(month.to_string());
    let (y, m) = month.split_once('-').ok_or_else(bad)?;
    let year: i32 = y.parse().map_err(|_| bad())?;
    let mon: u32 = m.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&mon) {
        return Err(bad());
    }
    bounds(year, mon, mon)
}

/// Expands a `YYYY` string to `[Jan 1 00:00:00.000, Dec 31 23:59:59.999]`.
pub fn year_bounds(year: &str) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    let y: i32 = year
        .parse()
        .map_err(|_| Error::InvalidDate(year.to_string()))?;
    bounds(y, 1, 12)
}

/// Bounds of the calendar month containing `today`.
pub fn current_month_bounds(today: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    bounds(today.year(), today.month(), today.month())
}

/// Dashboard policy: each missing bound falls back to the matching edge of the
/// current calendar month.
pub fn resolve_dashboard_period(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    today: NaiveDate,
) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    let (month_start, month_end) = current_month_bounds(today)?;
    Ok((start.unwrap_or(month_start), end.unwrap_or(month_end)))
}
