// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::billing::{self, Snapshot};
use crate::store::Store;
use crate::utils::current_month;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => export_summary(store, sub),
        Some(("staff", sub)) => export_staff(store, sub),
        _ => Ok(()),
    }
}

fn month_of(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => crate::utils::parse_month(m),
        None => Ok(current_month()),
    }
}

// Semicolon-delimited: the spreadsheet locales this targets use comma
// decimals.
fn csv_writer(out: &str) -> Result<csv::Writer<std::fs::File>> {
    Ok(csv::WriterBuilder::new().delimiter(b';').from_path(out)?)
}

fn export_summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let snap = Snapshot::load(store)?;
    let s = billing::summarize(&snap, &month);

    // Profit before tax on this sheet is income minus operating and staff
    // costs; the tax block's own pre-tax base additionally nets out VAT and
    // withholding.
    let rows = [
        ("Total Income", s.income.total),
        ("Operating Expenses", s.operating.total),
        ("Staff Costs (Salary+Commission)", s.staff_costs_total),
        (
            "Profit Before Tax",
            s.income.total - s.operating.total - s.staff_costs_total,
        ),
        ("Total Tax", s.taxes.total),
        ("Net Profit (Distributable)", s.net_profit),
    ];

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv_writer(out)?;
            wtr.write_record(["item", "amount"])?;
            for (item, amount) in rows {
                wtr.write_record([item.to_string(), format!("{:.2}", amount)])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|(item, amount)| json!({ "item": item, "amount": amount }))
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} summary to {}", month, out);
    Ok(())
}

fn export_staff(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let snap = Snapshot::load(store)?;
    let s = billing::summarize(&snap, &month);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv_writer(out)?;
            wtr.write_record(["staff", "role", "model", "salary_and_commission", "profit_share", "total"])?;
            for e in &s.staff_earnings {
                wtr.write_record([
                    e.name.clone(),
                    format!("{:?}", e.role).to_lowercase(),
                    e.model.to_string(),
                    format!("{:.2}", e.salary + e.lesson_earning),
                    format!("{:.2}", e.profit_share),
                    format!("{:.2}", e.total),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&s.staff_earnings)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} staff payouts to {}", month, out);
    Ok(())
}
