// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Days;
use serde::Serialize;

use crate::models::{Member, MemberStatus, Package, PaymentType};
use crate::store::{MEMBERS, Store};
use crate::utils::{maybe_print_json, next_id, parse_date, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("assign", sub)) => assign(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn end_date_for(pkg: &Package, start: chrono::NaiveDate) -> Option<chrono::NaiveDate> {
    pkg.validity_days
        .and_then(|days| start.checked_add_days(Days::new(days as u64)))
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let mut members = store.members()?;
    let packages = store.packages()?;

    let name = sub.get_one::<String>("name").unwrap();
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let package_id = sub.get_one::<i64>("package").copied();
    let pkg = package_id.and_then(|id| packages.iter().find(|p| p.id == id));
    if let Some(id) = package_id {
        pkg.with_context(|| format!("Package {} not found", id))?;
    }
    let payment_type = sub.get_one::<String>("pay").map(|p| match p.as_str() {
        "card" => PaymentType::Card,
        _ => PaymentType::Cash,
    });

    let id = next_id(members.iter().map(|m| m.id));
    members.push(Member {
        id,
        full_name: name.clone(),
        phone: sub.get_one::<String>("phone").unwrap().clone(),
        email: sub.get_one::<String>("email").unwrap().clone(),
        active_package_id: package_id,
        remaining_sessions: pkg.map(|p| p.session_count),
        start_date: start,
        end_date: pkg.and_then(|p| end_date_for(p, start)),
        status: MemberStatus::Active,
        payment_type,
        notes: sub.get_one::<String>("notes").cloned(),
    });
    store.write(MEMBERS, &members)?;
    println!("Added member '{}' (id {})", name, id);
    Ok(())
}

#[derive(Serialize)]
struct MemberRow {
    id: i64,
    name: String,
    phone: String,
    package: String,
    start: String,
    end: String,
    sessions: String,
    status: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let members = store.members()?;
    let packages = store.packages()?;

    let month = sub.get_one::<String>("month");
    let status = sub.get_one::<String>("status");

    let data: Vec<MemberRow> = members
        .iter()
        .filter(|m| match month {
            Some(mo) => crate::utils::in_month(m.start_date, mo),
            None => true,
        })
        .filter(|m| match status.map(|s| s.as_str()) {
            Some("active") => m.status == MemberStatus::Active,
            Some("passive") => m.status == MemberStatus::Passive,
            _ => true,
        })
        .map(|m| {
            let package = m
                .active_package_id
                .and_then(|id| packages.iter().find(|p| p.id == id))
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "-".into());
            MemberRow {
                id: m.id,
                name: m.full_name.clone(),
                phone: m.phone.clone(),
                package,
                start: m.start_date.to_string(),
                end: m.end_date.map(|d| d.to_string()).unwrap_or_default(),
                sessions: m
                    .remaining_sessions
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                status: match m.status {
                    MemberStatus::Active => "active".into(),
                    MemberStatus::Passive => "passive".into(),
                },
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.phone.clone(),
                    r.package.clone(),
                    r.start.clone(),
                    r.end.clone(),
                    r.sessions.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Phone", "Package", "Start", "End", "Sessions", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut members = store.members()?;
    let before = members.len();
    members.retain(|m| m.id != id);
    if members.len() == before {
        anyhow::bail!("Member {} not found", id);
    }
    store.write(MEMBERS, &members)?;
    println!("Removed member {}", id);
    Ok(())
}

/// Set or renew the active package: stamps a fresh start date, resets the
/// session balance to the package's count, re-derives the end date, and
/// reactivates a passive member.
fn assign(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let package_id = *sub.get_one::<i64>("package").unwrap();
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    let mut members = store.members()?;
    let packages = store.packages()?;
    let pkg = packages
        .iter()
        .find(|p| p.id == package_id)
        .with_context(|| format!("Package {} not found", package_id))?;
    let member = members
        .iter_mut()
        .find(|m| m.id == id)
        .with_context(|| format!("Member {} not found", id))?;

    member.active_package_id = Some(package_id);
    member.remaining_sessions = Some(pkg.session_count);
    member.start_date = start;
    member.end_date = end_date_for(pkg, start);
    member.status = MemberStatus::Active;

    let name = member.full_name.clone();
    store.write(MEMBERS, &members)?;
    println!("Assigned '{}' to member '{}' starting {}", pkg.name, name, start);
    Ok(())
}
