// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::models::Package;
use crate::utils::{
    fmt_money, maybe_print_json, parse_decimal, parse_expense_arg, pretty_table, read_expenses,
    store_expenses,
};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("profit", sub)) => profit(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "DELETE FROM packages WHERE package_name=?1",
                params![name],
            )?;
            if n == 0 {
                return Err(engine::Error::NotFound(format!("package '{}'", name)).into());
            }
            println!("Removed package '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let mut expenses = BTreeMap::new();
    if let Some(entries) = sub.get_many::<String>("expense") {
        for entry in entries {
            let (category, amount) = parse_expense_arg(entry)?;
            expenses.insert(category, amount);
        }
    }
    conn.execute(
        "INSERT INTO packages(package_name, price, expenses) VALUES (?1, ?2, ?3)",
        params![name, price.to_string(), store_expenses(&expenses)?],
    )?;
    println!(
        "Added package '{}' at {} with {} expense categories",
        name,
        fmt_money(&price),
        expenses.len()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let packages = load_all(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &packages)? {
        let rows: Vec<Vec<String>> = packages
            .iter()
            .map(|p| {
                vec![
                    p.package_name.clone(),
                    fmt_money(&p.price),
                    p.expenses
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", "),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Package", "Price", "Expense categories"], rows)
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("name").unwrap();
    let package = get_by_name(conn, name)?;
    if !maybe_print_json(json_flag, jsonl_flag, &package)? {
        let mut rows = vec![vec!["price".to_string(), fmt_money(&package.price)]];
        for (category, amount) in &package.expenses {
            rows.push(vec![format!("expense: {}", category), fmt_money(amount)]);
        }
        println!(
            "{}",
            pretty_table(&[package.package_name.as_str(), "Amount"], rows)
        );
    }
    Ok(())
}

fn profit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("name").unwrap();
    let package = get_by_name(conn, name)?;
    let breakdown = engine::profit::calculate(&package);
    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let mut rows = Vec::new();
        for (category, amount) in &breakdown.expenses {
            rows.push(vec![category.clone(), fmt_money(amount)]);
        }
        rows.push(vec!["total expenses".into(), fmt_money(&breakdown.total_expenses)]);
        rows.push(vec!["price".into(), fmt_money(&breakdown.price)]);
        rows.push(vec!["profit".into(), fmt_money(&breakdown.profit)]);
        println!(
            "{}",
            pretty_table(&[breakdown.package_name.as_str(), "Amount"], rows)
        );
    }
    Ok(())
}

fn package_from_row(
    id: i64,
    package_name: String,
    price: String,
    expenses: String,
) -> Result<Package> {
    Ok(Package {
        id,
        package_name,
        price: parse_decimal(&price)?,
        expenses: read_expenses(&expenses)?,
    })
}

pub fn get_by_name(conn: &Connection, name: &str) -> Result<Package> {
    let mut stmt =
        conn.prepare("SELECT id, package_name, price, expenses FROM packages WHERE package_name=?1")?;
    let row = stmt
        .query_row(params![name], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })
        .optional()?;
    match row {
        Some((id, package_name, price, expenses)) => {
            package_from_row(id, package_name, price, expenses)
        }
        None => Err(engine::Error::NotFound(format!("package '{}'", name)).into()),
    }
}

pub fn load_all(conn: &Connection) -> Result<Vec<Package>> {
    let mut stmt =
        conn.prepare("SELECT id, package_name, price, expenses FROM packages ORDER BY package_name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut packages = Vec::new();
    for row in rows {
        let (id, package_name, price, expenses) = row?;
        packages.push(package_from_row(id, package_name, price, expenses)?);
    }
    Ok(packages)
}
