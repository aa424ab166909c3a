// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const STORE_FMT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const READ_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn store_datetime(dt: NaiveDateTime) -> String {
    dt.format(STORE_FMT).to_string()
}

pub fn read_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, READ_FMT)
        .with_context(|| format!("Invalid stored datetime '{}'", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Tags live in a single TEXT column as a JSON array; order is kept for
/// display even though aggregation ignores it.
pub fn store_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).context("Serialize tags")
}

pub fn read_tags(s: &str) -> Result<Vec<String>> {
    serde_json::from_str(s).with_context(|| format!("Invalid stored tags '{}'", s))
}

/// Package expenses: JSON object of category name -> amount.
pub fn store_expenses(expenses: &BTreeMap<String, Decimal>) -> Result<String> {
    serde_json::to_string(expenses).context("Serialize expenses")
}

pub fn read_expenses(s: &str) -> Result<BTreeMap<String, Decimal>> {
    serde_json::from_str(s).with_context(|| format!("Invalid stored expenses '{}'", s))
}

/// Parses a `CATEGORY=AMOUNT` expense flag.
pub fn parse_expense_arg(s: &str) -> Result<(String, Decimal)> {
    let (category, amount) = s
        .split_once('=')
        .with_context(|| format!("Invalid expense '{}', expected CATEGORY=AMOUNT", s))?;
    Ok((category.to_string(), parse_decimal(amount)?))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_teacher(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM teachers WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Teacher '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_package(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM packages WHERE package_name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Package '{}' not found", name))?;
    Ok(id)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
