// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{sessions, teachers, transactions};
use crate::engine::dashboard::{self, DashboardFilter};
use crate::engine::period::parse_datetime;
use crate::models::TransactionType;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut filters = DashboardFilter::default();
    if let Some(from) = sub.get_one::<String>("from") {
        filters.start_date = Some(parse_datetime(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filters.end_date = Some(parse_datetime(to)?);
    }
    if let Some(ty) = sub.get_one::<String>("type") {
        filters.r#type = Some(ty.parse::<TransactionType>()?);
    }
    if let Some(tags) = sub.get_many::<String>("tag") {
        filters.tags = tags.cloned().collect();
    }

    let txs = transactions::load_all(conn)?;
    let sess = sessions::load_all(conn)?;
    let teacher_map = teachers::load_map(conn)?;
    let today = chrono::Local::now().date_naive();

    let report = dashboard::build(&txs, &sess, |id| teacher_map.get(&id), &filters, today)?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let mut rows = vec![
            vec![
                "period".to_string(),
                format!("{} .. {}", report.period_start.date(), report.period_end.date()),
            ],
            vec![
                "packages taught".to_string(),
                report.active_session_packages.to_string(),
            ],
            vec![
                "subscription sales".to_string(),
                report.active_subscription_packages.to_string(),
            ],
            vec!["total income (net)".to_string(), fmt_money(&report.total_income)],
            vec!["total expenses".to_string(), fmt_money(&report.total_expenses)],
            vec!["total tax".to_string(), fmt_money(&report.total_tax)],
            vec!["gross profit".to_string(), fmt_money(&report.gross_profit)],
            vec![
                "teacher salaries".to_string(),
                fmt_money(&report.total_teacher_salaries),
            ],
            vec!["net profit".to_string(), fmt_money(&report.net_profit)],
        ];
        for (tag, amount) in &report.income_by_category {
            rows.push(vec![format!("income: {}", tag), fmt_money(amount)]);
        }
        for (tag, amount) in &report.expenses_by_category {
            rows.push(vec![format!("expense: {}", tag), fmt_money(amount)]);
        }
        println!("{}", pretty_table(&["Figure", "Value"], rows));
    }
    Ok(())
}

pub fn salaries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    // No dates here means the whole history, not the current month.
    let start = match sub.get_one::<String>("from") {
        Some(s) => Some(parse_datetime(s)?),
        None => None,
    };
    let end = match sub.get_one::<String>("to") {
        Some(s) => Some(parse_datetime(s)?),
        None => None,
    };

    let sess = sessions::load_all(conn)?;
    let teacher_map = teachers::load_map(conn)?;
    let payroll = dashboard::salary_breakdown(&sess, |id| teacher_map.get(&id), start, end);

    if !maybe_print_json(json_flag, jsonl_flag, &payroll)? {
        let mut rows: Vec<Vec<String>> = payroll
            .breakdown
            .iter()
            .map(|e| {
                vec![
                    e.teacher_name.clone(),
                    e.total_hours.to_string(),
                    fmt_money(&e.total_pay),
                ]
            })
            .collect();
        rows.push(vec![
            "TOTAL".to_string(),
            String::new(),
            fmt_money(&payroll.total_payroll),
        ]);
        println!("{}", pretty_table(&["Teacher", "Hours", "Pay"], rows));
    }
    Ok(())
}
