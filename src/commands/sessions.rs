// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::period::parse_datetime;
use crate::models::Session;
use crate::utils::{
    id_for_package, id_for_teacher, maybe_print_json, parse_decimal, pretty_table, read_datetime,
    store_datetime,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("confirm", sub)) => set_confirmed(conn, sub, true)?,
        Some(("unconfirm", sub)) => set_confirmed(conn, sub, false)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM sessions WHERE id=?1", params![id])?;
            if n == 0 {
                anyhow::bail!("Session {} not found", id);
            }
            println!("Removed session {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let teacher = sub.get_one::<String>("teacher").unwrap();
    let package = sub.get_one::<String>("package").unwrap();
    let date = parse_datetime(sub.get_one::<String>("date").unwrap())?;
    let duration = parse_decimal(sub.get_one::<String>("duration").unwrap())?;
    let confirmed = !sub.get_flag("unconfirmed");

    let teacher_id = id_for_teacher(conn, teacher)?;
    let package_id = id_for_package(conn, package)?;
    conn.execute(
        "INSERT INTO sessions(teacher_id, package_id, session_date, duration, is_confirmed)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            teacher_id,
            package_id,
            store_datetime(date),
            duration.to_string(),
            confirmed
        ],
    )?;
    println!(
        "Recorded {}h with '{}' on {} ({})",
        duration,
        teacher,
        date.date(),
        if confirmed { "confirmed" } else { "unconfirmed" }
    );
    Ok(())
}

fn set_confirmed(conn: &Connection, sub: &clap::ArgMatches, confirmed: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "UPDATE sessions SET is_confirmed=?1 WHERE id=?2",
        params![confirmed, id],
    )?;
    if n == 0 {
        anyhow::bail!("Session {} not found", id);
    }
    println!(
        "Session {} is now {}",
        id,
        if confirmed { "confirmed" } else { "unconfirmed" }
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut sql = String::from(
        "SELECT s.id, t.name, p.package_name, s.session_date, s.duration, s.is_confirmed
         FROM sessions s
         LEFT JOIN teachers t ON s.teacher_id=t.id
         LEFT JOIN packages p ON s.package_id=p.id
         WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(teacher) = sub.get_one::<String>("teacher") {
        sql.push_str(" AND t.name=?");
        params_vec.push(teacher.into());
    }
    if let Some(package) = sub.get_one::<String>("package") {
        sql.push_str(" AND p.package_name=?");
        params_vec.push(package.into());
    }
    if let Some(from) = sub.get_one::<String>("from") {
        sql.push_str(" AND s.session_date>=?");
        params_vec.push(store_datetime(parse_datetime(from)?));
    }
    if let Some(to) = sub.get_one::<String>("to") {
        sql.push_str(" AND s.session_date<=?");
        params_vec.push(store_datetime(parse_datetime(to)?));
    }
    if sub.get_flag("confirmed") {
        sql.push_str(" AND s.is_confirmed=1");
    }
    sql.push_str(" ORDER BY s.session_date DESC, s.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let bind: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let teacher: Option<String> = r.get(1)?;
        let package: Option<String> = r.get(2)?;
        let date: String = r.get(3)?;
        let duration: String = r.get(4)?;
        let confirmed: bool = r.get(5)?;
        data.push(vec![
            id.to_string(),
            teacher.unwrap_or_default(),
            package.unwrap_or_default(),
            date,
            duration,
            if confirmed { "yes".into() } else { "no".into() },
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Teacher", "Package", "Date", "Hours", "Confirmed"],
                data,
            )
        );
    }
    Ok(())
}

/// One fetch of every session for in-memory aggregation.
pub fn load_all(conn: &Connection) -> Result<Vec<Session>> {
    let mut stmt = conn.prepare(
        "SELECT id, teacher_id, package_id, session_date, duration, is_confirmed FROM sessions",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, i64>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, bool>(5)?,
        ))
    })?;
    let mut sessions = Vec::new();
    for row in rows {
        let (id, teacher_id, package_id, date, duration, is_confirmed) = row?;
        sessions.push(Session {
            id,
            teacher_id,
            package_id,
            session_date: read_datetime(&date)?,
            duration: parse_decimal(&duration)?,
            is_confirmed,
        });
    }
    Ok(sessions)
}
