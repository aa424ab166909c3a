// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Sessions whose teacher or package reference no longer resolves.
    //    Payroll skips these silently; surface them here instead.
    let mut stmt = conn.prepare(
        "SELECT s.id FROM sessions s LEFT JOIN teachers t ON s.teacher_id=t.id WHERE t.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["session_missing_teacher".into(), format!("session {}", id)]);
    }
    let mut stmt2 = conn.prepare(
        "SELECT s.id FROM sessions s LEFT JOIN packages p ON s.package_id=p.id WHERE p.id IS NULL",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["session_missing_package".into(), format!("session {}", id)]);
    }

    // 2) Derived tax fields drifting from amount * rate. Unparsable rows are
    //    left to the JSON/decimal checks below.
    let mut tax_stmt = conn.prepare(
        "SELECT id, amount, tax_rate, tax_amount, net_amount FROM transactions",
    )?;
    let mut tax_cur = tax_stmt.query([])?;
    while let Some(r) = tax_cur.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        let rate: String = r.get(2)?;
        let stored_tax: String = r.get(3)?;
        let stored_net: String = r.get(4)?;
        let parsed = (
            amount.parse::<rust_decimal::Decimal>(),
            rate.parse::<rust_decimal::Decimal>(),
            stored_tax.parse::<rust_decimal::Decimal>(),
            stored_net.parse::<rust_decimal::Decimal>(),
        );
        let (Ok(amount), Ok(rate), Ok(stored_tax), Ok(stored_net)) = parsed else {
            rows.push(vec!["bad_amounts".into(), format!("transaction {}", id)]);
            continue;
        };
        let (tax_amount, net_amount) = Transaction::tax_parts(amount, rate);
        if stored_tax != tax_amount || stored_net != net_amount {
            rows.push(vec![
                "tax_fields_drift".into(),
                format!(
                    "transaction {}: stored {}/{}, derived {}/{}",
                    id, stored_tax, stored_net, tax_amount, net_amount
                ),
            ]);
        }
    }

    // 3) Tag or expense columns that no longer parse as JSON.
    let mut stmt3 = conn.prepare("SELECT id, tags FROM transactions")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let tags: String = r.get(1)?;
        if serde_json::from_str::<Vec<String>>(&tags).is_err() {
            rows.push(vec!["bad_tags".into(), format!("transaction {}", id)]);
        }
    }
    let mut stmt4 = conn.prepare("SELECT package_name, expenses FROM packages")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let name: String = r.get(0)?;
        let expenses: String = r.get(1)?;
        if serde_json::from_str::<std::collections::BTreeMap<String, rust_decimal::Decimal>>(
            &expenses,
        )
        .is_err()
        {
            rows.push(vec!["bad_expenses".into(), format!("package '{}'", name)]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
