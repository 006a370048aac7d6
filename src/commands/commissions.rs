// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::CommissionRate;
use crate::store::{COMMISSIONS, Store, StoreError};
use crate::utils::{parse_decimal, pretty_table};

/// Default card-installment tiers, written only when the collection has
/// never been saved.
pub fn seed_defaults(store: &Store) -> Result<(), StoreError> {
    if store.read::<Vec<CommissionRate>>(COMMISSIONS)?.is_some() {
        return Ok(());
    }
    let defaults = vec![
        CommissionRate {
            installments: 1,
            rate: Decimal::ZERO,
        },
        CommissionRate {
            installments: 3,
            rate: Decimal::from(5),
        },
        CommissionRate {
            installments: 6,
            rate: Decimal::from(10),
        },
        CommissionRate {
            installments: 9,
            rate: Decimal::from(15),
        },
        CommissionRate {
            installments: 12,
            rate: Decimal::from(20),
        },
    ];
    store.write(COMMISSIONS, &defaults)
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let installments = *sub.get_one::<u32>("installments").unwrap();
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            let mut rates = store.commission_rates()?;
            match rates.iter_mut().find(|r| r.installments == installments) {
                Some(r) => r.rate = rate,
                None => rates.push(CommissionRate { installments, rate }),
            }
            rates.sort_by_key(|r| r.installments);
            store.write(COMMISSIONS, &rates)?;
            println!("Commission for {} installments = {}%", installments, rate);
        }
        Some(("list", _)) => {
            let rates = store.commission_rates()?;
            let data = rates
                .iter()
                .map(|r| {
                    vec![
                        if r.installments == 1 {
                            "single".into()
                        } else {
                            format!("{} installments", r.installments)
                        },
                        format!("{}%", r.rate),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Tier", "Surcharge"], data));
        }
        Some(("rm", sub)) => {
            let installments = *sub.get_one::<u32>("installments").unwrap();
            let mut rates = store.commission_rates()?;
            let before = rates.len();
            rates.retain(|r| r.installments != installments);
            if rates.len() == before {
                anyhow::bail!("No tier for {} installments", installments);
            }
            store.write(COMMISSIONS, &rates)?;
            println!("Removed tier for {} installments", installments);
        }
        _ => {}
    }
    Ok(())
}
