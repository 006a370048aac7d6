// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use gymbook::commands::commissions::seed_defaults;
use gymbook::store::Store;

fn setup() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path()).unwrap();
    seed_defaults(&store).unwrap();
    (dir, store)
}

fn run(store: &Store, args: &[&str]) -> Result<()> {
    let m = gymbook::cli::build_cli().get_matches_from(args);
    match m.subcommand() {
        Some(("product", sub)) => gymbook::commands::products::handle(store, sub),
        Some(("sale", sub)) => gymbook::commands::sales::handle(store, sub),
        Some(("coupon", sub)) => gymbook::commands::coupons::handle(store, sub),
        _ => unreachable!(),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn add_protein(store: &Store) {
    run(
        store,
        &[
            "gymbook", "product", "add", "--name", "Protein", "--category", "supplement",
            "--price", "100", "--stock", "10", "--tax", "20",
        ],
    )
    .unwrap();
}

#[test]
fn cash_checkout_records_gross_total_and_consumes_stock() {
    let (_dir, store) = setup();
    add_protein(&store);

    run(&store, &["gymbook", "sale", "checkout", "--item", "1:2"]).unwrap();

    let sales = store.product_sales().unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].total_amount, dec("240"));
    assert_eq!(sales[0].items[0].quantity, 2);
    assert_eq!(sales[0].items[0].price_at_sale, dec("100"));

    assert_eq!(store.products().unwrap()[0].stock, 8);
}

#[test]
fn coupon_checkout_applies_the_discount() {
    let (_dir, store) = setup();
    add_protein(&store);
    run(
        &store,
        &["gymbook", "coupon", "add", "--code", "PROMO10", "--rate", "10"],
    )
    .unwrap();

    run(
        &store,
        &["gymbook", "sale", "checkout", "--item", "1:2", "--coupon", "PROMO10"],
    )
    .unwrap();

    assert_eq!(store.product_sales().unwrap()[0].total_amount, dec("216"));
}

#[test]
fn disabled_coupons_are_rejected() {
    let (_dir, store) = setup();
    add_protein(&store);
    run(
        &store,
        &["gymbook", "coupon", "add", "--code", "OLD", "--rate", "50"],
    )
    .unwrap();
    run(&store, &["gymbook", "coupon", "disable", "OLD"]).unwrap();

    assert!(
        run(
            &store,
            &["gymbook", "sale", "checkout", "--item", "1:1", "--coupon", "OLD"],
        )
        .is_err()
    );
    assert!(store.product_sales().unwrap().is_empty());
}

#[test]
fn card_checkout_adds_the_tier_surcharge() {
    let (_dir, store) = setup();
    add_protein(&store);

    // Seeded tier: 6 installments -> 10%
    run(
        &store,
        &[
            "gymbook", "sale", "checkout", "--item", "1:2", "--card", "--installments", "6",
        ],
    )
    .unwrap();

    assert_eq!(store.product_sales().unwrap()[0].total_amount, dec("264"));
}

#[test]
fn unknown_product_blocks_the_sale() {
    let (_dir, store) = setup();
    assert!(run(&store, &["gymbook", "sale", "checkout", "--item", "42:1"]).is_err());
}

#[test]
fn restock_adjusts_stock_and_cost() {
    let (_dir, store) = setup();
    add_protein(&store);

    run(
        &store,
        &["gymbook", "product", "restock", "1", "--qty", "5", "--cost", "55"],
    )
    .unwrap();

    let p = &store.products().unwrap()[0];
    assert_eq!(p.stock, 15);
    assert_eq!(p.cost, dec("55"));
}
