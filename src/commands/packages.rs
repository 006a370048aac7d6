// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::Package;
use crate::store::{PACKAGES, Store};
use crate::utils::{fmt_money, maybe_print_json, next_id, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let service_id = *sub.get_one::<i64>("service").unwrap();
    let services = store.services()?;
    services
        .iter()
        .find(|s| s.id == service_id)
        .with_context(|| format!("Service {} not found", service_id))?;

    let name = sub.get_one::<String>("name").unwrap();
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let sessions = *sub.get_one::<u32>("sessions").unwrap();

    let mut packages = store.packages()?;
    let id = next_id(packages.iter().map(|p| p.id));
    packages.push(Package {
        id,
        service_id,
        name: name.clone(),
        price,
        session_count: sessions,
        validity_days: sub.get_one::<u32>("validity").copied(),
        active: true,
    });
    store.write(PACKAGES, &packages)?;
    println!("Added package '{}' (id {}, {} sessions)", name, id, sessions);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let packages = store.packages()?;
    let services = store.services()?;

    let mut data = Vec::new();
    for p in &packages {
        let service = services
            .iter()
            .find(|s| s.id == p.service_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "-".into());
        data.push(vec![
            p.id.to_string(),
            p.name.clone(),
            service,
            fmt_money(&p.price),
            p.session_count.to_string(),
            p.validity_days.map(|d| d.to_string()).unwrap_or_default(),
            if p.active { "yes".into() } else { "no".into() },
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Service", "Price", "Sessions", "Validity", "Active"],
                data,
            )
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut packages = store.packages()?;
    let before = packages.len();
    packages.retain(|p| p.id != id);
    if packages.len() == before {
        anyhow::bail!("Package {} not found", id);
    }
    store.write(PACKAGES, &packages)?;
    println!("Removed package {}", id);
    Ok(())
}
