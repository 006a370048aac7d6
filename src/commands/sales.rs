// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::billing::cart::{CartLine, PaymentMethod, price_cart};
use crate::models::{ProductSale, SaleItem};
use crate::store::{PRODUCT_SALES, PRODUCTS, Store};
use crate::utils::{fmt_money, in_month, maybe_print_json, next_id, parse_decimal, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("checkout", sub)) => checkout(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_item(raw: &str) -> Result<(i64, u32)> {
    let (id, qty) = raw
        .split_once(':')
        .with_context(|| format!("Invalid item '{}', expected PRODUCT-ID:QTY", raw))?;
    let id: i64 = id
        .trim()
        .parse()
        .with_context(|| format!("Invalid product id in '{}'", raw))?;
    let qty: u32 = qty
        .trim()
        .parse()
        .with_context(|| format!("Invalid quantity in '{}'", raw))?;
    Ok((id, qty))
}

fn checkout(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let mut products = store.products()?;
    let coupons = store.coupons()?;
    let rates = store.commission_rates()?;

    let mut lines = Vec::new();
    for raw in sub.get_many::<String>("item").unwrap() {
        let (id, qty) = parse_item(raw)?;
        let product = products
            .iter()
            .find(|p| p.id == id)
            .with_context(|| format!("Product {} not found", id))?;
        if product.stock < qty as i64 {
            eprintln!(
                "warning: '{}' has {} in stock, selling {}",
                product.name, product.stock, qty
            );
        }
        lines.push(CartLine::from_product(product, qty));
    }

    let manual_discount = parse_decimal(sub.get_one::<String>("discount").unwrap())?;
    let coupon = match sub.get_one::<String>("coupon") {
        Some(code) => Some(
            coupons
                .iter()
                .find(|c| c.code == *code && c.active)
                .with_context(|| format!("Invalid or inactive coupon '{}'", code))?,
        ),
        None => None,
    };

    let method = if sub.get_flag("card") {
        PaymentMethod::Card
    } else {
        PaymentMethod::Cash
    };
    let installments = *sub.get_one::<u32>("installments").unwrap();

    let totals = price_cart(&lines, manual_discount, coupon, method, installments, &rates);

    println!("Gross total          {}", fmt_money(&totals.raw_gross_total));
    if totals.total_discount > Decimal::ZERO {
        println!("Discount            -{}", fmt_money(&totals.total_discount));
        println!("After discount       {}", fmt_money(&totals.effective_gross_total));
    }
    for (rate, vat) in &totals.vat_breakdown {
        println!("  VAT {:>2}%            {}", rate, fmt_money(vat));
    }
    println!("Subtotal (net)       {}", fmt_money(&totals.discounted_sub_total));
    if totals.commission_amount > Decimal::ZERO {
        println!(
            "Card commission ({}%) {}",
            totals.commission_rate,
            fmt_money(&totals.commission_amount)
        );
    }
    println!("TOTAL                {}", fmt_money(&totals.final_total));

    let mut sales = store.product_sales()?;
    let id = next_id(sales.iter().map(|s| s.id));
    sales.push(ProductSale {
        id,
        date: today(),
        items: lines
            .iter()
            .map(|l| SaleItem {
                product_id: l.product_id,
                name: l.name.clone(),
                quantity: l.quantity,
                price_at_sale: l.unit_price,
            })
            .collect(),
        total_amount: totals.final_total,
        staff_id: sub.get_one::<i64>("staff").copied(),
    });

    for line in &lines {
        if let Some(p) = products.iter_mut().find(|p| p.id == line.product_id) {
            p.stock -= line.quantity as i64;
        }
    }

    store.write(PRODUCT_SALES, &sales)?;
    store.write(PRODUCTS, &products)?;
    println!("Recorded sale {}", id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sales = store.product_sales()?;
    let month = sub.get_one::<String>("month");

    let data: Vec<Vec<String>> = sales
        .iter()
        .filter(|s| month.is_none_or(|mo| in_month(s.date, mo)))
        .map(|s| {
            let items = s
                .items
                .iter()
                .map(|i| format!("{}x{}", i.quantity, i.name))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                s.id.to_string(),
                s.date.to_string(),
                items,
                fmt_money(&s.total_amount),
            ]
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["ID", "Date", "Items", "Total"], data));
    }
    Ok(())
}
