// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::{Expense, ExpenseCategory, ExpenseStatus, FixedExpense, FixedExpenseKind};
use crate::store::{EXPENSES, FIXED_EXPENSES, Store};
use crate::utils::{fmt_money, next_id, parse_decimal, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", _)) => list(store)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("pay-bill", sub)) => pay_bill(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = if sub.get_flag("variable") {
        FixedExpenseKind::Variable
    } else {
        FixedExpenseKind::Fixed
    };

    let mut fixed = store.fixed_expenses()?;
    let id = next_id(fixed.iter().map(|f| f.id));
    fixed.push(FixedExpense {
        id,
        title: title.clone(),
        amount,
        day_of_month: *sub.get_one::<u32>("day").unwrap(),
        kind,
    });
    store.write(FIXED_EXPENSES, &fixed)?;
    match kind {
        FixedExpenseKind::Fixed => println!("Added fixed expense '{}' (id {})", title, id),
        FixedExpenseKind::Variable => println!("Added bill reminder '{}' (id {})", title, id),
    }
    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let fixed = store.fixed_expenses()?;
    let data: Vec<Vec<String>> = fixed
        .iter()
        .map(|f| {
            vec![
                f.id.to_string(),
                f.title.clone(),
                match f.kind {
                    FixedExpenseKind::Fixed => fmt_money(&f.amount),
                    FixedExpenseKind::Variable => "(on payment)".into(),
                },
                format!("day {}", f.day_of_month),
                match f.kind {
                    FixedExpenseKind::Fixed => "fixed".into(),
                    FixedExpenseKind::Variable => "variable".into(),
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Title", "Amount", "Due", "Kind"], data)
    );
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut fixed = store.fixed_expenses()?;
    let before = fixed.len();
    fixed.retain(|f| f.id != id);
    if fixed.len() == before {
        anyhow::bail!("Fixed expense {} not found", id);
    }
    store.write(FIXED_EXPENSES, &fixed)?;
    println!("Removed fixed expense {}", id);
    Ok(())
}

/// A variable bill has no amount of its own; paying it books a one-off
/// bill expense for this month at the entered amount.
fn pay_bill(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;

    let fixed = store.fixed_expenses()?;
    let bill = fixed
        .iter()
        .find(|f| f.id == id)
        .with_context(|| format!("Fixed expense {} not found", id))?;
    if bill.kind != FixedExpenseKind::Variable {
        anyhow::bail!("'{}' is a fixed cost, not a bill reminder", bill.title);
    }

    let mut expenses = store.expenses()?;
    let expense_id = next_id(expenses.iter().map(|e| e.id));
    expenses.push(Expense {
        id: expense_id,
        title: bill.title.clone(),
        amount,
        category: ExpenseCategory::Bill,
        date: today(),
        installments: 1,
        paid_installments: 1,
        status: ExpenseStatus::Paid,
    });
    store.write(EXPENSES, &expenses)?;
    println!(
        "Paid bill '{}': recorded expense {} for {}",
        bill.title,
        expense_id,
        fmt_money(&amount)
    );
    Ok(())
}
