// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use gymbook::{cli, commands, store::Store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Store::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            commands::commissions::seed_defaults(&store)?;
            println!("Store initialized at {}", store.data_dir().display());
        }
        Some(("member", sub)) => commands::members::handle(&store, sub)?,
        Some(("package", sub)) => commands::packages::handle(&store, sub)?,
        Some(("service", sub)) => commands::services::handle(&store, sub)?,
        Some(("staff", sub)) => commands::staff::handle(&store, sub)?,
        Some(("appt", sub)) => commands::appointments::handle(&store, sub)?,
        Some(("product", sub)) => commands::products::handle(&store, sub)?,
        Some(("sale", sub)) => commands::sales::handle(&store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&store, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&store, sub)?,
        Some(("commission", sub)) => commands::commissions::handle(&store, sub)?,
        Some(("coupon", sub)) => commands::coupons::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
