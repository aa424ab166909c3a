// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};
use tutorledger::{cli, commands::transactions};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount TEXT NOT NULL,
            type TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            notes TEXT,
            status TEXT NOT NULL DEFAULT 'active',
            transaction_date TEXT NOT NULL,
            tax_rate TEXT NOT NULL DEFAULT '0',
            tax_amount TEXT NOT NULL DEFAULT '0',
            net_amount TEXT NOT NULL DEFAULT '0',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(name,amount,type,transaction_date,net_amount) \
             VALUES (?1,'100','income',?2,'100')",
            params![
                format!("lesson {}", i),
                format!("2025-01-0{} 00:00:00.000", i)
            ],
        )
        .unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["tutorledger", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    // Default order is newest first.
    assert_eq!(rows[0].name, "lesson 3");
}

#[test]
fn list_month_flag_overrides_explicit_range() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(name,amount,type,transaction_date,net_amount) \
         VALUES ('feb one','50','income','2025-02-10 00:00:00.000','50')",
        [],
    )
    .unwrap();

    let rows = transactions::query_rows(
        &conn,
        &list_matches(&["--month", "2025-02", "--from", "2024-01-01"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "feb one");
}

#[test]
fn update_recomputes_tax_fields() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "tutorledger",
        "tx",
        "update",
        "--id",
        "1",
        "--amount",
        "200",
        "--tax-rate",
        "0.1",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();

    let (tax, net): (String, String) = conn
        .query_row(
            "SELECT tax_amount, net_amount FROM transactions WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(tax, "20.0");
    assert_eq!(net, "180.0");
}

#[test]
fn exclude_drops_row_from_summary_but_not_from_list() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["tutorledger", "tx", "exclude", "--id", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();

    let all = transactions::query_rows(&conn, &list_matches(&[])).unwrap();
    assert_eq!(all.len(), 3);

    let active = transactions::query_rows(&conn, &list_matches(&["--status", "active"])).unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|t| t.name != "lesson 2"));
}

#[test]
fn add_stores_derived_tax_fields() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "tutorledger",
        "tx",
        "add",
        "--name",
        "workshop",
        "--amount",
        "300",
        "--type",
        "income",
        "--date",
        "2025-03-01",
        "--tag",
        "workshop",
        "--tag",
        "premium",
        "--tax-rate",
        "0.2",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();

    let rows = transactions::query_rows(&conn, &list_matches(&["--search", "workshop"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tax_amount.to_string(), "60.0");
    assert_eq!(rows[0].net_amount.to_string(), "240.0");
    assert_eq!(rows[0].tags, vec!["workshop", "premium"]);
}

#[test]
fn bad_filter_values_surface_as_errors() {
    let conn = setup();
    assert!(transactions::query_rows(&conn, &list_matches(&["--type", "transfer"])).is_err());
    assert!(transactions::query_rows(&conn, &list_matches(&["--month", "2025-13"])).is_err());
    assert!(transactions::query_rows(&conn, &list_matches(&["--limit", "0"])).is_err());
}
