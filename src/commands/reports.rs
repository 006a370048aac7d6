// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::billing::{self, Snapshot};
use crate::store::Store;
use crate::utils::{current_month, fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("financials", sub)) => financials(store, sub)?,
        Some(("staff", sub)) => staff(store, sub)?,
        Some(("products", sub)) => products(store, sub)?,
        Some(("memberships", sub)) => memberships(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_of(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => crate::utils::parse_month(m),
        None => Ok(current_month()),
    }
}

fn staff_rows(earnings: &[billing::StaffEarnings]) -> Vec<Vec<String>> {
    earnings
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.model.to_string(),
                s.appointment_count.to_string(),
                fmt_money(&(s.salary + s.lesson_earning)),
                if s.profit_share > Decimal::ZERO {
                    format!("{} ({}%)", fmt_money(&s.profit_share), s.share_rate)
                } else {
                    "-".into()
                },
                fmt_money(&s.total),
            ]
        })
        .collect()
}

fn financials(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_of(sub)?;

    let snap = Snapshot::load(store)?;
    let summary = billing::summarize(&snap, &month);

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    println!("Financials for {}", summary.period);
    println!();
    println!("TOTAL INCOME          {}", fmt_money(&summary.income.total));
    println!("  Memberships         {}", fmt_money(&summary.income.membership_income));
    println!("  Product sales       {}", fmt_money(&summary.income.product_income));
    println!("OPERATING EXPENSES   -{}", fmt_money(&summary.operating.total));
    println!("  Fixed costs         {}", fmt_money(&summary.operating.fixed_total));
    println!("  Stock purchases     {}", fmt_money(&summary.operating.stock_purchase));
    println!("  Consumables         {}", fmt_money(&summary.operating.consumable));
    println!("  Other               {}", fmt_money(&summary.operating.other));
    println!("STAFF COSTS          -{}", fmt_money(&summary.staff_costs_total));
    println!("TAXES                -{}", fmt_money(&summary.taxes.total));
    println!("  VAT (20%)           {}", fmt_money(&summary.taxes.vat));
    println!("  Withholding (20%)   {}", fmt_money(&summary.taxes.withholding));
    println!("  Corporate (25%)     {}", fmt_money(&summary.taxes.corporate));
    println!("NET PROFIT            {}", fmt_money(&summary.net_profit));
    println!();

    println!(
        "{}",
        pretty_table(
            &["Staff", "Model", "Lessons", "Salary+Commission", "Profit Share", "Total"],
            staff_rows(&summary.staff_earnings),
        )
    );

    if !summary.membership_sales.is_empty() {
        let rows = summary
            .membership_sales
            .iter()
            .map(|(name, count)| vec![name.clone(), count.to_string()])
            .collect();
        println!("{}", pretty_table(&["Package", "Sold"], rows));
    }

    println!(
        "Product sales: gross {} / cost {} / margin {}",
        fmt_money(&summary.product_summary.gross),
        fmt_money(&summary.product_summary.cost),
        fmt_money(&summary.product_summary.profit)
    );

    if !summary.diagnostics.is_empty() {
        let rows = summary
            .diagnostics
            .iter()
            .map(|d| vec![d.record.clone(), d.detail.clone()])
            .collect();
        println!("{}", pretty_table(&["Record", "Problem"], rows));
    }
    Ok(())
}

fn staff(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_of(sub)?;

    let snap = Snapshot::load(store)?;
    let summary = billing::summarize(&snap, &month);

    if !maybe_print_json(json_flag, jsonl_flag, &summary.staff_earnings)? {
        println!(
            "{}",
            pretty_table(
                &["Staff", "Model", "Lessons", "Salary+Commission", "Profit Share", "Total"],
                staff_rows(&summary.staff_earnings),
            )
        );
    }
    Ok(())
}

fn products(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_of(sub)?;

    let snap = Snapshot::load(store)?;
    let summary = billing::summarize(&snap, &month);

    if !maybe_print_json(json_flag, jsonl_flag, &summary.product_summary)? {
        let rows = vec![vec![
            month.clone(),
            fmt_money(&summary.product_summary.gross),
            fmt_money(&summary.product_summary.cost),
            fmt_money(&summary.product_summary.profit),
        ]];
        println!("{}", pretty_table(&["Month", "Gross", "Cost", "Margin"], rows));
    }
    Ok(())
}

fn memberships(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_of(sub)?;

    let snap = Snapshot::load(store)?;
    let summary = billing::summarize(&snap, &month);

    if !maybe_print_json(json_flag, jsonl_flag, &summary.membership_sales)? {
        let rows = summary
            .membership_sales
            .iter()
            .map(|(name, count)| vec![name.clone(), count.to_string()])
            .collect();
        println!("{}", pretty_table(&["Package", "Sold"], rows));
    }
    Ok(())
}
