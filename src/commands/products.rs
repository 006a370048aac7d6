// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::Product;
use crate::store::{PRODUCTS, Store};
use crate::utils::{fmt_money, maybe_print_json, next_id, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("restock", sub)) => restock(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let cost = parse_decimal(sub.get_one::<String>("cost").unwrap())?;
    let tax_rate: u32 = sub.get_one::<String>("tax").unwrap().parse()?;

    let mut products = store.products()?;
    let id = next_id(products.iter().map(|p| p.id));
    products.push(Product {
        id,
        name: name.clone(),
        category: sub.get_one::<String>("category").unwrap().clone(),
        price,
        cost,
        stock: *sub.get_one::<i64>("stock").unwrap(),
        tax_rate,
    });
    store.write(PRODUCTS, &products)?;
    println!("Added product '{}' (id {}, VAT {}%)", name, id, tax_rate);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let products = store.products()?;

    let data: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.category.clone(),
                fmt_money(&p.price),
                fmt_money(&p.cost),
                p.stock.to_string(),
                format!("{}%", p.tax_rate),
            ]
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Category", "Price", "Cost", "Stock", "VAT"],
                data,
            )
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut products = store.products()?;
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
        anyhow::bail!("Product {} not found", id);
    }
    store.write(PRODUCTS, &products)?;
    println!("Removed product {}", id);
    Ok(())
}

fn restock(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let qty = *sub.get_one::<i64>("qty").unwrap();
    let mut products = store.products()?;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .with_context(|| format!("Product {} not found", id))?;

    product.stock += qty;
    if let Some(cost) = sub.get_one::<String>("cost") {
        product.cost = parse_decimal(cost)?;
    }
    let (name, stock) = (product.name.clone(), product.stock);
    store.write(PRODUCTS, &products)?;
    println!("Restocked '{}' to {} units", name, stock);
    Ok(())
}
