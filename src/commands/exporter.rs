// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT transaction_date, name, type, amount, tax_rate, tax_amount, net_amount, tags, status, notes
         FROM transactions
         ORDER BY transaction_date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, String>(8)?,
            r.get::<_, Option<String>>(9)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "name", "type", "amount", "tax_rate", "tax_amount", "net_amount", "tags",
                "status", "notes",
            ])?;
            for row in rows {
                let (d, n, ty, amt, rate, tax, net, tags, status, notes) = row?;
                wtr.write_record([
                    d,
                    n,
                    ty,
                    amt,
                    rate,
                    tax,
                    net,
                    tags,
                    status,
                    notes.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, n, ty, amt, rate, tax, net, tags, status, notes) = row?;
                items.push(json!({
                    "date": d, "name": n, "type": ty, "amount": amt, "taxRate": rate,
                    "taxAmount": tax, "netAmount": net, "tags": tags, "status": status,
                    "notes": notes
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
