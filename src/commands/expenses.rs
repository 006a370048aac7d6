// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::{Expense, ExpenseCategory, ExpenseStatus};
use crate::store::{EXPENSES, Store};
use crate::utils::{fmt_money, in_month, maybe_print_json, next_id, parse_date, parse_decimal, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("pay", sub)) => pay(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_category(s: &str) -> ExpenseCategory {
    match s {
        "rent" => ExpenseCategory::Rent,
        "bill" => ExpenseCategory::Bill,
        "salary" => ExpenseCategory::Salary,
        "maintenance" => ExpenseCategory::Maintenance,
        "stock_purchase" => ExpenseCategory::StockPurchase,
        "consumable" => ExpenseCategory::Consumable,
        "tax" => ExpenseCategory::Tax,
        _ => ExpenseCategory::Other,
    }
}

fn category_label(c: ExpenseCategory) -> &'static str {
    match c {
        ExpenseCategory::Rent => "rent",
        ExpenseCategory::Bill => "bill",
        ExpenseCategory::Salary => "salary",
        ExpenseCategory::Maintenance => "maintenance",
        ExpenseCategory::StockPurchase => "stock_purchase",
        ExpenseCategory::Consumable => "consumable",
        ExpenseCategory::Tax => "tax",
        ExpenseCategory::Other => "other",
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = parse_category(sub.get_one::<String>("category").unwrap());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let installments = *sub.get_one::<u32>("installments").unwrap();
    let paid = sub
        .get_one::<u32>("paid")
        .copied()
        .unwrap_or(installments)
        .min(installments);

    let mut expenses = store.expenses()?;
    let id = next_id(expenses.iter().map(|e| e.id));
    expenses.push(Expense {
        id,
        title: title.clone(),
        amount,
        category,
        date,
        installments,
        paid_installments: paid,
        status: Expense::derived_status(paid, installments),
    });
    store.write(EXPENSES, &expenses)?;
    println!("Recorded expense '{}' (id {})", title, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let expenses = store.expenses()?;
    let month = sub.get_one::<String>("month");

    let data: Vec<Vec<String>> = expenses
        .iter()
        .filter(|e| month.is_none_or(|mo| in_month(e.date, mo)))
        .map(|e| {
            vec![
                e.id.to_string(),
                e.title.clone(),
                category_label(e.category).to_string(),
                fmt_money(&e.amount),
                e.date.to_string(),
                format!("{}/{}", e.paid_installments, e.installments),
                match e.status {
                    ExpenseStatus::Paid => "paid".into(),
                    ExpenseStatus::Pending => "pending".into(),
                },
            ]
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Category", "Amount", "Date", "Installments", "Status"],
                data,
            )
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut expenses = store.expenses()?;
    let before = expenses.len();
    expenses.retain(|e| e.id != id);
    if expenses.len() == before {
        anyhow::bail!("Expense {} not found", id);
    }
    store.write(EXPENSES, &expenses)?;
    println!("Removed expense {}", id);
    Ok(())
}

/// Advance the installment counter by one; the status is re-derived, never
/// set directly.
fn pay(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut expenses = store.expenses()?;
    let expense = expenses
        .iter_mut()
        .find(|e| e.id == id)
        .with_context(|| format!("Expense {} not found", id))?;

    if expense.status == ExpenseStatus::Paid {
        anyhow::bail!("Expense {} is already fully paid", id);
    }
    expense.paid_installments = (expense.paid_installments + 1).min(expense.installments);
    expense.status = Expense::derived_status(expense.paid_installments, expense.installments);

    let (paid, total, status) = (
        expense.paid_installments,
        expense.installments,
        expense.status,
    );
    store.write(EXPENSES, &expenses)?;
    println!(
        "Expense {}: {}/{} installments paid{}",
        id,
        paid,
        total,
        if status == ExpenseStatus::Paid {
            " (complete)"
        } else {
            ""
        }
    );
    Ok(())
}
