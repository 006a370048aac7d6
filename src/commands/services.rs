// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{Service, ServiceCategory};
use crate::store::{SERVICES, Store};
use crate::utils::{next_id, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let category = match sub.get_one::<String>("category").unwrap().as_str() {
                "coaching" => ServiceCategory::Coaching,
                _ => ServiceCategory::SelfService,
            };
            let mut services = store.services()?;
            let id = next_id(services.iter().map(|s| s.id));
            services.push(Service {
                id,
                name: name.clone(),
                category,
                active: true,
            });
            store.write(SERVICES, &services)?;
            println!("Added service '{}' (id {})", name, id);
        }
        Some(("list", _)) => {
            let services = store.services()?;
            let data = services
                .iter()
                .map(|s| {
                    vec![
                        s.id.to_string(),
                        s.name.clone(),
                        match s.category {
                            ServiceCategory::SelfService => "self_service".into(),
                            ServiceCategory::Coaching => "coaching".into(),
                        },
                        if s.active { "yes".into() } else { "no".into() },
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["ID", "Name", "Category", "Active"], data));
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let mut services = store.services()?;
            let before = services.len();
            services.retain(|s| s.id != id);
            if services.len() == before {
                anyhow::bail!("Service {} not found", id);
            }
            store.write(SERVICES, &services)?;
            println!("Removed service {}", id);
        }
        _ => {}
    }
    Ok(())
}
