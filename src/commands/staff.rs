// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::models::{PayModel, Role, Staff};
use crate::store::{STAFF, Store};
use crate::utils::{fmt_money, maybe_print_json, next_id, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_role(s: &str) -> Role {
    match s {
        "admin" => Role::Admin,
        "manager" => Role::Manager,
        "dietitian" => Role::Dietitian,
        "physio" => Role::Physio,
        _ => Role::Trainer,
    }
}

fn role_label(r: Role) -> &'static str {
    match r {
        Role::Admin => "admin",
        Role::Manager => "manager",
        Role::Trainer => "trainer",
        Role::Dietitian => "dietitian",
        Role::Physio => "physio",
    }
}

fn pay_model(sub: &clap::ArgMatches) -> Result<PayModel> {
    let rate_of = |key: &str| -> Result<Decimal> {
        let raw = sub
            .get_one::<String>(key)
            .with_context(|| format!("--{} is required for this pay model", key))?;
        parse_decimal(raw)
    };
    Ok(match sub.get_one::<String>("model").unwrap().as_str() {
        "salaried" => PayModel::Salaried {
            salary: rate_of("salary")?,
        },
        "partner" => PayModel::Partner {
            share_rate: rate_of("share")?,
        },
        _ => PayModel::Commission {
            rate: rate_of("rate")?,
        },
    })
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let role = parse_role(sub.get_one::<String>("role").unwrap());
    let pay = pay_model(sub)?;
    let hire_date = match sub.get_one::<String>("hired") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };

    let mut staff = store.staff()?;
    let id = next_id(staff.iter().map(|s| s.id));
    staff.push(Staff {
        id,
        name: name.clone(),
        role,
        pay,
        email: sub.get_one::<String>("email").cloned(),
        phone: sub.get_one::<String>("phone").cloned(),
        hire_date,
    });
    store.write(STAFF, &staff)?;
    println!("Added staff '{}' (id {})", name, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let staff = store.staff()?;

    let data: Vec<Vec<String>> = staff
        .iter()
        .map(|s| {
            let (model, terms) = match &s.pay {
                PayModel::Salaried { salary } => ("salaried", fmt_money(salary)),
                PayModel::Commission { rate } => ("commission", format!("{}%", rate)),
                PayModel::Partner { share_rate } => ("partner", format!("{}%", share_rate)),
            };
            vec![
                s.id.to_string(),
                s.name.clone(),
                role_label(s.role).to_string(),
                model.to_string(),
                terms,
            ]
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Role", "Model", "Terms"], data)
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut staff = store.staff()?;
    let before = staff.len();
    staff.retain(|s| s.id != id);
    if staff.len() == before {
        anyhow::bail!("Staff {} not found", id);
    }
    store.write(STAFF, &staff)?;
    println!("Removed staff {}", id);
    Ok(())
}
