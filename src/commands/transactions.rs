// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::filter::{self, SortField, SortOrder, TransactionFilter};
use crate::engine::period::parse_datetime;
use crate::engine::summary;
use crate::models::{Transaction, TransactionStatus, TransactionType};
use crate::utils::{
    fmt_money, maybe_print_json, parse_decimal, pretty_table, read_datetime, read_tags,
    store_datetime, store_tags,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("exclude", sub)) => set_status(conn, sub, TransactionStatus::Excluded)?,
        Some(("activate", sub)) => set_status(conn, sub, TransactionStatus::Active)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
            if n == 0 {
                anyhow::bail!("Transaction {} not found", id);
            }
            println!("Removed transaction {}", id);
        }
        Some(("summary", sub)) => print_summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let r#type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let date = parse_datetime(sub.get_one::<String>("date").unwrap())?;
    let tags: Vec<String> = sub
        .get_many::<String>("tag")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());
    let tax_rate = match sub.get_one::<String>("tax-rate") {
        Some(s) => parse_decimal(s)?,
        None => rust_decimal::Decimal::ZERO,
    };
    let (tax_amount, net_amount) = Transaction::tax_parts(amount, tax_rate);

    conn.execute(
        "INSERT INTO transactions(name, amount, type, tags, notes, transaction_date, tax_rate, tax_amount, net_amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            name,
            amount.to_string(),
            r#type.as_str(),
            store_tags(&tags)?,
            notes,
            store_datetime(date),
            tax_rate.to_string(),
            tax_amount.to_string(),
            net_amount.to_string()
        ],
    )?;
    println!(
        "Recorded {} {} '{}' on {} (net {})",
        r#type.as_str(),
        fmt_money(&amount),
        name,
        date.date(),
        fmt_money(&net_amount)
    );
    Ok(())
}

/// Edits a transaction in place. Whenever the amount or the tax rate changes,
/// the derived tax and net amounts are recomputed from the new values.
fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut tx = get(conn, id)?;

    if let Some(name) = sub.get_one::<String>("name") {
        tx.name = name.to_string();
    }
    if let Some(date) = sub.get_one::<String>("date") {
        tx.transaction_date = parse_datetime(date)?;
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        tx.notes = Some(notes.to_string());
    }
    if let Some(tags) = sub.get_many::<String>("tag") {
        tx.tags = tags.cloned().collect();
    }
    let mut recompute = false;
    if let Some(amount) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(amount)?;
        recompute = true;
    }
    if let Some(rate) = sub.get_one::<String>("tax-rate") {
        tx.tax_rate = parse_decimal(rate)?;
        recompute = true;
    }
    if recompute {
        let (tax_amount, net_amount) = Transaction::tax_parts(tx.amount, tx.tax_rate);
        tx.tax_amount = tax_amount;
        tx.net_amount = net_amount;
    }

    conn.execute(
        "UPDATE transactions SET name=?1, amount=?2, tags=?3, notes=?4, transaction_date=?5,
         tax_rate=?6, tax_amount=?7, net_amount=?8 WHERE id=?9",
        params![
            tx.name,
            tx.amount.to_string(),
            store_tags(&tx.tags)?,
            tx.notes,
            store_datetime(tx.transaction_date),
            tx.tax_rate.to_string(),
            tx.tax_amount.to_string(),
            tx.net_amount.to_string(),
            id
        ],
    )?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches, status: TransactionStatus) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "UPDATE transactions SET status=?1 WHERE id=?2",
        params![status.as_str(), id],
    )?;
    if n == 0 {
        anyhow::bail!("Transaction {} not found", id);
    }
    println!("Transaction {} is now {}", id, status.as_str());
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.transaction_date.date().to_string(),
                    t.name.clone(),
                    t.r#type.as_str().to_string(),
                    fmt_money(&t.amount),
                    fmt_money(&t.net_amount),
                    t.tags.join(", "),
                    t.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Name", "Type", "Amount", "Net", "Tags", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

/// Builds the filter from CLI flags and runs it over a single fetch of the
/// candidate set.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from_matches(sub)?;
    let all = load_all(conn)?;
    let hits = filter::apply(&all, &filter)?;
    Ok(hits.into_iter().cloned().collect())
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::default();
    if let Some(ty) = sub.get_one::<String>("type") {
        filter.r#type = Some(ty.parse::<TransactionType>()?);
    }
    if let Some(tags) = sub.get_many::<String>("tag") {
        filter.tags = tags.cloned().collect();
    }
    if let Some(status) = sub.get_one::<String>("status") {
        filter.status = Some(status.parse::<TransactionStatus>()?);
    }
    if let Some(from) = sub.get_one::<String>("from") {
        filter.start_date = Some(parse_datetime(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filter.end_date = Some(parse_datetime(to)?);
    }
    filter.month = sub.get_one::<String>("month").map(|s| s.to_string());
    filter.year = sub.get_one::<String>("year").map(|s| s.to_string());
    filter.search = sub.get_one::<String>("search").map(|s| s.to_string());
    if let Some(field) = sub.get_one::<String>("sort-by") {
        filter.sort_by = Some(field.parse::<SortField>()?);
    }
    if let Some(order) = sub.get_one::<String>("order") {
        filter.sort_order = Some(order.parse::<SortOrder>()?);
    }
    filter.limit = sub.get_one::<usize>("limit").copied();
    filter.page = sub.get_one::<usize>("page").copied();
    Ok(filter)
}

fn print_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let r#type = match sub.get_one::<String>("type") {
        Some(ty) => Some(ty.parse::<TransactionType>()?),
        None => None,
    };
    let tags: Vec<String> = sub
        .get_many::<String>("tag")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let start = match sub.get_one::<String>("from") {
        Some(s) => Some(parse_datetime(s)?),
        None => None,
    };
    let end = match sub.get_one::<String>("to") {
        Some(s) => Some(parse_datetime(s)?),
        None => None,
    };

    // Content filters only: excluded rows never count, but search, sort, and
    // pagination have no effect on totals.
    let all = load_all(conn)?;
    let selected = all.iter().filter(|t| {
        t.status == TransactionStatus::Active
            && r#type.is_none_or(|ty| t.r#type == ty)
            && (tags.is_empty() || filter::tags_intersect(&t.tags, &tags))
            && start.is_none_or(|b| t.transaction_date >= b)
            && end.is_none_or(|b| t.transaction_date <= b)
    });
    let summary = summary::summarize(selected);

    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let mut rows = vec![
            vec!["total income (net)".to_string(), fmt_money(&summary.total_income)],
            vec!["total expenses".to_string(), fmt_money(&summary.total_expenses)],
            vec!["total tax".to_string(), fmt_money(&summary.total_tax)],
            vec!["gross profit".to_string(), fmt_money(&summary.gross_profit)],
        ];
        for (tag, amount) in &summary.income_by_category {
            rows.push(vec![format!("income: {}", tag), fmt_money(amount)]);
        }
        for (tag, amount) in &summary.expenses_by_category {
            rows.push(vec![format!("expense: {}", tag), fmt_money(amount)]);
        }
        println!("{}", pretty_table(&["Figure", "Amount"], rows));
    }
    Ok(())
}

fn get(conn: &Connection, id: i64) -> Result<Transaction> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, type, tags, notes, status, transaction_date, tax_rate, tax_amount, net_amount, created_at
         FROM transactions WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => transaction_from_row(r),
        None => anyhow::bail!("Transaction {} not found", id),
    }
}

/// One fetch of every transaction for in-memory filtering and aggregation.
pub fn load_all(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, type, tags, notes, status, transaction_date, tax_rate, tax_amount, net_amount, created_at
         FROM transactions ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(transaction_from_row(r)?);
    }
    Ok(data)
}

fn transaction_from_row(r: &rusqlite::Row<'_>) -> Result<Transaction> {
    let amount: String = r.get(2)?;
    let type_s: String = r.get(3)?;
    let tags_s: String = r.get(4)?;
    let status_s: String = r.get(6)?;
    let date_s: String = r.get(7)?;
    let tax_rate: String = r.get(8)?;
    let tax_amount: String = r.get(9)?;
    let net_amount: String = r.get(10)?;
    let created_s: String = r.get(11)?;
    Ok(Transaction {
        id: r.get(0)?,
        name: r.get(1)?,
        amount: parse_decimal(&amount)?,
        r#type: type_s.parse()?,
        tags: read_tags(&tags_s)?,
        notes: r.get(5)?,
        status: status_s.parse()?,
        transaction_date: read_datetime(&date_s)?,
        tax_rate: parse_decimal(&tax_rate)?,
        tax_amount: parse_decimal(&tax_amount)?,
        net_amount: parse_decimal(&net_amount)?,
        created_at: read_datetime(&created_s)?,
    })
}
