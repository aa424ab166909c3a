// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Teacher;
use crate::utils::{fmt_money, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            conn.execute(
                "INSERT INTO teachers(name, hourly_rate) VALUES (?1, ?2)",
                params![name, rate.to_string()],
            )?;
            println!("Added teacher '{}' at {}/h", name, fmt_money(&rate));
        }
        Some(("list", sub)) => {
            let include_inactive = sub.get_flag("all");
            let mut sql = String::from(
                "SELECT name, hourly_rate, is_active FROM teachers",
            );
            if !include_inactive {
                sql.push_str(" WHERE is_active=1");
            }
            sql.push_str(" ORDER BY name");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, bool>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (name, rate, active) = row?;
                data.push(vec![
                    name,
                    rate,
                    if active { "yes".into() } else { "no".into() },
                ]);
            }
            println!("{}", pretty_table(&["Name", "Rate/h", "Active"], data));
        }
        Some(("rate", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            let n = conn.execute(
                "UPDATE teachers SET hourly_rate=?1 WHERE name=?2",
                params![rate.to_string(), name],
            )?;
            if n == 0 {
                anyhow::bail!("Teacher '{}' not found", name);
            }
            println!("Updated '{}' to {}/h", name, fmt_money(&rate));
        }
        Some(("activate", sub)) => set_active(conn, sub, true)?,
        Some(("deactivate", sub)) => set_active(conn, sub, false)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("DELETE FROM teachers WHERE name=?1", params![name])?;
            if n == 0 {
                anyhow::bail!("Teacher '{}' not found", name);
            }
            println!("Removed teacher '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn set_active(conn: &Connection, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let n = conn.execute(
        "UPDATE teachers SET is_active=?1 WHERE name=?2",
        params![active, name],
    )?;
    if n == 0 {
        anyhow::bail!("Teacher '{}' not found", name);
    }
    println!(
        "Teacher '{}' is now {}",
        name,
        if active { "active" } else { "inactive" }
    );
    Ok(())
}

/// One fetch of every teacher, keyed by id, for in-memory payroll joins.
pub fn load_map(conn: &Connection) -> Result<HashMap<i64, Teacher>> {
    let mut stmt = conn.prepare("SELECT id, name, hourly_rate, is_active FROM teachers")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, bool>(3)?,
        ))
    })?;
    let mut map = HashMap::new();
    for row in rows {
        let (id, name, rate, is_active) = row?;
        map.insert(
            id,
            Teacher {
                id,
                name,
                hourly_rate: parse_decimal(&rate)?,
                is_active,
            },
        );
    }
    Ok(map)
}
