// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn date_range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("Start of the period (YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS')"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("End of the period (YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS')"),
    )
}

fn teacher_cmd() -> Command {
    Command::new("teacher")
        .about("Manage teachers and their hourly rates")
        .subcommand(
            Command::new("add")
                .about("Register a teacher")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .help("Hourly rate"),
                ),
        )
        .subcommand(
            Command::new("list").about("List teachers").arg(
                Arg::new("all")
                    .long("all")
                    .action(ArgAction::SetTrue)
                    .help("Include deactivated teachers"),
            ),
        )
        .subcommand(
            Command::new("rate")
                .about("Update a teacher's hourly rate")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("rate").long("rate").required(true)),
        )
        .subcommand(
            Command::new("activate")
                .about("Mark a teacher as active")
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(
            Command::new("deactivate")
                .about("Mark a teacher as inactive")
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a teacher (their sessions stay)")
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn package_cmd() -> Command {
    Command::new("package")
        .about("Manage service packages")
        .subcommand(
            Command::new("add")
                .about("Create a package")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("price").long("price").required(true))
                .arg(
                    Arg::new("expense")
                        .long("expense")
                        .action(ArgAction::Append)
                        .help("Expense entry as CATEGORY=AMOUNT (repeatable)"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List packages")))
        .subcommand(json_flags(
            Command::new("show")
                .about("Show one package with its expense schedule")
                .arg(Arg::new("name").long("name").required(true)),
        ))
        .subcommand(json_flags(
            Command::new("profit")
                .about("Expense and profit breakdown for a package")
                .arg(Arg::new("name").long("name").required(true)),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a package")
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn session_cmd() -> Command {
    Command::new("session")
        .about("Record and manage teaching sessions")
        .subcommand(
            Command::new("add")
                .about("Record a teaching session")
                .arg(Arg::new("teacher").long("teacher").required(true))
                .arg(Arg::new("package").long("package").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS'"),
                )
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .required(true)
                        .help("Duration in hours"),
                )
                .arg(
                    Arg::new("unconfirmed")
                        .long("unconfirmed")
                        .action(ArgAction::SetTrue)
                        .help("Record as not yet confirmed"),
                ),
        )
        .subcommand(json_flags(date_range_args(
            Command::new("list")
                .about("List sessions")
                .arg(Arg::new("teacher").long("teacher"))
                .arg(Arg::new("package").long("package"))
                .arg(
                    Arg::new("confirmed")
                        .long("confirmed")
                        .action(ArgAction::SetTrue)
                        .help("Confirmed sessions only"),
                ),
        )))
        .subcommand(
            Command::new("confirm")
                .about("Confirm a session")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("unconfirm")
                .about("Withdraw a session's confirmation")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a session")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and query financial transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("income or expense"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS'"),
                )
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .help("Category tag (repeatable)"),
                )
                .arg(Arg::new("notes").long("notes"))
                .arg(
                    Arg::new("tax-rate")
                        .long("tax-rate")
                        .help("Tax rate as a decimal fraction, e.g. 0.1"),
                ),
        )
        .subcommand(json_flags(date_range_args(
            Command::new("list")
                .about("List transactions with filters")
                .arg(Arg::new("type").long("type").help("income or expense"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .help("Match any of the given tags (repeatable)"),
                )
                .arg(Arg::new("status").long("status").help("active or excluded"))
                .arg(Arg::new("month").long("month").help("Calendar month YYYY-MM"))
                .arg(Arg::new("year").long("year").help("Calendar year YYYY"))
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Case-insensitive match on name or notes"),
                )
                .arg(
                    Arg::new("sort-by")
                        .long("sort-by")
                        .help("date, amount, name, or createdAt"),
                )
                .arg(Arg::new("order").long("order").help("asc or desc"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Results per page (1-100, default 50)"),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_parser(value_parser!(usize))
                        .help("Page number, starting at 1"),
                ),
        )))
        .subcommand(
            Command::new("update")
                .about("Edit a transaction (tax fields are recomputed)")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("notes").long("notes"))
                .arg(Arg::new("tax-rate").long("tax-rate"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .help("Replace the tag set (repeatable)"),
                ),
        )
        .subcommand(
            Command::new("exclude")
                .about("Exclude a transaction from reporting")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("activate")
                .about("Return a transaction to reporting")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(json_flags(date_range_args(
            Command::new("summary")
                .about("Income/expense/tax totals with per-tag breakdowns")
                .arg(Arg::new("type").long("type").help("income or expense"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .help("Match any of the given tags (repeatable)"),
                ),
        )))
}

pub fn build_cli() -> Command {
    Command::new("tutorledger")
        .about("Teaching-studio finances: sessions, packages, payroll, and reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(teacher_cmd())
        .subcommand(package_cmd())
        .subcommand(session_cmd())
        .subcommand(tx_cmd())
        .subcommand(json_flags(date_range_args(
            Command::new("dashboard")
                .about("Consolidated financial report (defaults to the current month)")
                .arg(Arg::new("type").long("type").help("income or expense"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .help("Restrict the transaction summary to these tags"),
                ),
        )))
        .subcommand(json_flags(date_range_args(
            Command::new("salaries")
                .about("Per-teacher payroll breakdown (defaults to all-time)"),
        )))
        .subcommand(
            Command::new("export").about("Export records").subcommand(
                Command::new("transactions")
                    .about("Export transactions to CSV or JSON")
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    ),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
