// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use gymbook::commands::commissions::seed_defaults;
use gymbook::models::{CommissionRate, Coupon};
use gymbook::store::{COMMISSIONS, COUPONS, Store};

fn setup() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path()).unwrap();
    (dir, store)
}

#[test]
fn collections_round_trip() {
    let (_dir, store) = setup();
    let coupons = vec![Coupon {
        id: 1,
        code: "PROMO10".into(),
        discount_rate: Decimal::from(10),
        active: true,
    }];
    store.write(COUPONS, &coupons).unwrap();

    let loaded = store.coupons().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].code, "PROMO10");
    assert_eq!(loaded[0].discount_rate, Decimal::from(10));
}

#[test]
fn absent_document_reads_as_empty() {
    let (_dir, store) = setup();
    assert!(store.members().unwrap().is_empty());
    assert!(store.read::<Vec<Coupon>>(COUPONS).unwrap().is_none());
}

#[test]
fn document_keys_are_sanitized() {
    let (dir, store) = setup();
    let coupons: Vec<Coupon> = vec![];
    store.write("../evil key!", &coupons).unwrap();

    // Traversal and punctuation are stripped; the write lands inside the dir.
    assert!(dir.path().join("evilkey.json").exists());
    let back: Option<Vec<Coupon>> = store.read("../evil key!").unwrap();
    assert!(back.is_some());
}

#[test]
fn corrupt_document_is_an_error_not_a_default() {
    let (dir, store) = setup();
    std::fs::write(dir.path().join("gym_coupons.json"), "{not json").unwrap();
    assert!(store.coupons().is_err());
}

#[test]
fn writes_replace_the_whole_document() {
    let (_dir, store) = setup();
    let first = vec![CommissionRate {
        installments: 3,
        rate: Decimal::from(5),
    }];
    let second = vec![
        CommissionRate {
            installments: 6,
            rate: Decimal::from(10),
        },
        CommissionRate {
            installments: 9,
            rate: Decimal::from(15),
        },
    ];
    store.write(COMMISSIONS, &first).unwrap();
    store.write(COMMISSIONS, &second).unwrap();

    let loaded = store.commission_rates().unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|r| r.installments != 3));
}

#[test]
fn seeding_never_overwrites_saved_tiers() {
    let (_dir, store) = setup();

    seed_defaults(&store).unwrap();
    let defaults = store.commission_rates().unwrap();
    assert_eq!(defaults.len(), 5);
    assert_eq!(defaults[0].installments, 1);
    assert_eq!(defaults[0].rate, Decimal::ZERO);
    assert_eq!(defaults[4].installments, 12);
    assert_eq!(defaults[4].rate, Decimal::from(20));

    // A saved table, however small, survives a re-seed.
    let custom = vec![CommissionRate {
        installments: 2,
        rate: Decimal::from(3),
    }];
    store.write(COMMISSIONS, &custom).unwrap();
    seed_defaults(&store).unwrap();
    assert_eq!(store.commission_rates().unwrap().len(), 1);
}
