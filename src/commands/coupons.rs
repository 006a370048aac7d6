// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::Coupon;
use crate::store::{COUPONS, Store};
use crate::utils::{next_id, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().to_uppercase();
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            let mut coupons = store.coupons()?;
            if coupons.iter().any(|c| c.code == code) {
                anyhow::bail!("Coupon '{}' already exists", code);
            }
            let id = next_id(coupons.iter().map(|c| c.id));
            coupons.push(Coupon {
                id,
                code: code.clone(),
                discount_rate: rate,
                active: true,
            });
            store.write(COUPONS, &coupons)?;
            println!("Added coupon '{}' ({}% off)", code, rate);
        }
        Some(("list", _)) => {
            let coupons = store.coupons()?;
            let data = coupons
                .iter()
                .map(|c| {
                    vec![
                        c.code.clone(),
                        format!("{}%", c.discount_rate),
                        if c.active { "active".into() } else { "inactive".into() },
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Code", "Discount", "Status"], data));
        }
        Some(("enable", sub)) => set_active(store, sub, true)?,
        Some(("disable", sub)) => set_active(store, sub, false)?,
        Some(("rm", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().to_uppercase();
            let mut coupons = store.coupons()?;
            let before = coupons.len();
            coupons.retain(|c| c.code != code);
            if coupons.len() == before {
                anyhow::bail!("Coupon '{}' not found", code);
            }
            store.write(COUPONS, &coupons)?;
            println!("Removed coupon '{}'", code);
        }
        _ => {}
    }
    Ok(())
}

fn set_active(store: &Store, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap().to_uppercase();
    let mut coupons = store.coupons()?;
    let coupon = coupons
        .iter_mut()
        .find(|c| c.code == code)
        .with_context(|| format!("Coupon '{}' not found", code))?;
    coupon.active = active;
    store.write(COUPONS, &coupons)?;
    println!(
        "Coupon '{}' {}",
        code,
        if active { "enabled" } else { "disabled" }
    );
    Ok(())
}
