// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Period filter, defaults to the current month")
}

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

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("gymbook")
        .about("Gym membership, scheduling, point-of-sale, and financials")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the data dir and seed default commission tiers"))
        .subcommand(
            Command::new("member")
                .about("Manage members")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("phone").long("phone").default_value(""))
                        .arg(Arg::new("email").long("email").default_value(""))
                        .arg(
                            Arg::new("package")
                                .long("package")
                                .value_parser(value_parser!(i64))
                                .help("Active package id"),
                        )
                        .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD"))
                        .arg(
                            Arg::new("pay")
                                .long("pay")
                                .value_parser(["cash", "card"])
                                .help("Payment type for the membership"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(Arg::new("status").long("status").value_parser(["active", "passive"])),
                ))
                .subcommand(Command::new("rm").arg(id_arg("Member id")))
                .subcommand(
                    Command::new("assign")
                        .about("Set or renew the member's active package")
                        .arg(id_arg("Member id"))
                        .arg(
                            Arg::new("package")
                                .long("package")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD")),
                ),
        )
        .subcommand(
            Command::new("package")
                .about("Manage membership packages")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("service")
                                .long("service")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("price").long("price").required(true).help("VAT-exclusive price"))
                        .arg(
                            Arg::new("sessions")
                                .long("sessions")
                                .value_parser(value_parser!(u32))
                                .default_value("1"),
                        )
                        .arg(
                            Arg::new("validity")
                                .long("validity")
                                .value_parser(value_parser!(u32))
                                .help("Validity in days"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("Package id"))),
        )
        .subcommand(
            Command::new("service")
                .about("Manage services")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(["self_service", "coaching"])
                                .default_value("self_service"),
                        ),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(id_arg("Service id"))),
        )
        .subcommand(
            Command::new("staff")
                .about("Manage staff and their pay model")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("role")
                                .long("role")
                                .value_parser(["admin", "manager", "trainer", "dietitian", "physio"])
                                .default_value("trainer"),
                        )
                        .arg(
                            Arg::new("model")
                                .long("model")
                                .required(true)
                                .value_parser(["salaried", "commission", "partner"]),
                        )
                        .arg(Arg::new("salary").long("salary").help("Monthly salary (salaried)"))
                        .arg(Arg::new("rate").long("rate").help("Lesson commission percent (commission)"))
                        .arg(Arg::new("share").long("share").help("Profit share percent (partner)"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("hired").long("hired").value_name("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("Staff id"))),
        )
        .subcommand(
            Command::new("appt")
                .about("Manage appointments")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("member")
                                .long("member")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("trainer")
                                .long("trainer")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date").required(true).value_name("YYYY-MM-DD"))
                        .arg(Arg::new("time").long("time").default_value("09:00"))
                        .arg(Arg::new("kind").long("kind").default_value("fitness")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(Arg::new("trainer").long("trainer").value_parser(value_parser!(i64))),
                ))
                .subcommand(Command::new("cancel").arg(id_arg("Appointment id")))
                .subcommand(Command::new("complete").arg(id_arg("Appointment id")))
                .subcommand(Command::new("rm").arg(id_arg("Appointment id"))),
        )
        .subcommand(
            Command::new("product")
                .about("Manage store inventory")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("category").long("category").default_value("other"))
                        .arg(Arg::new("price").long("price").required(true).help("VAT-exclusive price"))
                        .arg(Arg::new("cost").long("cost").default_value("0"))
                        .arg(
                            Arg::new("stock")
                                .long("stock")
                                .value_parser(value_parser!(i64))
                                .default_value("0"),
                        )
                        .arg(
                            Arg::new("tax")
                                .long("tax")
                                .value_parser(["0", "1", "8", "10", "18", "20"])
                                .default_value("20")
                                .help("VAT rate percent"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("Product id")))
                .subcommand(
                    Command::new("restock")
                        .arg(id_arg("Product id"))
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .required(true)
                                .value_parser(value_parser!(i64))
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("cost").long("cost").help("New unit cost")),
                ),
        )
        .subcommand(
            Command::new("sale")
                .about("Point of sale")
                .subcommand(
                    Command::new("checkout")
                        .arg(
                            Arg::new("item")
                                .long("item")
                                .required(true)
                                .action(ArgAction::Append)
                                .value_name("PRODUCT-ID:QTY")
                                .help("Cart line, repeatable"),
                        )
                        .arg(
                            Arg::new("discount")
                                .long("discount")
                                .default_value("0")
                                .help("Flat discount amount"),
                        )
                        .arg(Arg::new("coupon").long("coupon").value_name("CODE"))
                        .arg(
                            Arg::new("card")
                                .long("card")
                                .action(ArgAction::SetTrue)
                                .help("Card payment (default cash)"),
                        )
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .value_parser(value_parser!(u32))
                                .default_value("1"),
                        )
                        .arg(Arg::new("staff").long("staff").value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(Command::new("list").arg(month_arg()))),
        )
        .subcommand(
            Command::new("expense")
                .about("One-off and installment expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser([
                                    "rent",
                                    "bill",
                                    "salary",
                                    "maintenance",
                                    "stock_purchase",
                                    "consumable",
                                    "tax",
                                    "other",
                                ])
                                .default_value("other"),
                        )
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .value_parser(value_parser!(u32))
                                .default_value("1"),
                        )
                        .arg(
                            Arg::new("paid")
                                .long("paid")
                                .value_parser(value_parser!(u32))
                                .help("Installments already paid, defaults to all of them"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").arg(month_arg())))
                .subcommand(Command::new("rm").arg(id_arg("Expense id")))
                .subcommand(
                    Command::new("pay")
                        .about("Pay the next installment")
                        .arg(id_arg("Expense id")),
                ),
        )
        .subcommand(
            Command::new("fixed")
                .about("Recurring fixed expenses and bill reminders")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").default_value("0"))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .value_parser(value_parser!(u32).range(1..=31))
                                .default_value("1")
                                .help("Day of month the cost falls due"),
                        )
                        .arg(
                            Arg::new("variable")
                                .long("variable")
                                .action(ArgAction::SetTrue)
                                .help("Bill reminder; amount entered when paid"),
                        ),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(id_arg("Fixed expense id")))
                .subcommand(
                    Command::new("pay-bill")
                        .about("Record a variable bill's payment as an expense")
                        .arg(id_arg("Fixed expense id"))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("commission")
                .about("Card installment commission tiers")
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("rate").long("rate").required(true).help("Surcharge percent")),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("installments")
                            .long("installments")
                            .required(true)
                            .value_parser(value_parser!(u32)),
                    ),
                ),
        )
        .subcommand(
            Command::new("coupon")
                .about("Percent-off coupons")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("rate").long("rate").required(true).help("Discount percent")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("enable").arg(Arg::new("code").required(true)))
                .subcommand(Command::new("disable").arg(Arg::new("code").required(true)))
                .subcommand(Command::new("rm").arg(Arg::new("code").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Financial reports")
                .subcommand(json_flags(Command::new("financials").arg(month_arg())))
                .subcommand(json_flags(Command::new("staff").arg(month_arg())))
                .subcommand(json_flags(Command::new("products").arg(month_arg())))
                .subcommand(json_flags(Command::new("memberships").arg(month_arg()))),
        )
        .subcommand(
            Command::new("export")
                .about("Export report data to delimited files")
                .subcommand(
                    Command::new("summary")
                        .arg(month_arg())
                        .arg(Arg::new("out").long("out").required(true).value_name("FILE"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        ),
                )
                .subcommand(
                    Command::new("staff")
                        .arg(month_arg())
                        .arg(Arg::new("out").long("out").required(true).value_name("FILE"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Scan the collections for integrity problems"))
}
