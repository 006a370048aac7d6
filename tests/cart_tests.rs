// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use gymbook::billing::cart::{CartLine, PaymentMethod, price_cart};
use gymbook::models::{CommissionRate, Coupon};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn line(product_id: i64, price: &str, tax_rate: u32, quantity: u32) -> CartLine {
    CartLine {
        product_id,
        name: format!("Product {}", product_id),
        unit_price: dec(price),
        tax_rate,
        quantity,
    }
}

fn coupon(rate: &str) -> Coupon {
    Coupon {
        id: 1,
        code: "PROMO".into(),
        discount_rate: dec(rate),
        active: true,
    }
}

fn tiers() -> Vec<CommissionRate> {
    vec![
        CommissionRate {
            installments: 1,
            rate: Decimal::ZERO,
        },
        CommissionRate {
            installments: 3,
            rate: dec("5"),
        },
        CommissionRate {
            installments: 6,
            rate: dec("10"),
        },
    ]
}

#[test]
fn cash_sale_without_discount() {
    let lines = vec![line(1, "100", 20, 2)];
    let t = price_cart(&lines, Decimal::ZERO, None, PaymentMethod::Cash, 1, &tiers());

    assert_eq!(t.raw_gross_total, dec("240"));
    assert_eq!(t.effective_gross_total, dec("240"));
    assert_eq!(t.total_vat, dec("40"));
    assert_eq!(t.discounted_sub_total, dec("200"));
    assert_eq!(t.commission_amount, Decimal::ZERO);
    assert_eq!(t.final_total, dec("240"));
}

#[test]
fn coupon_scales_the_vat_breakdown() {
    let lines = vec![line(1, "100", 20, 2)];
    let c = coupon("10");
    let t = price_cart(&lines, Decimal::ZERO, Some(&c), PaymentMethod::Cash, 1, &tiers());

    assert_eq!(t.coupon_discount, dec("24"));
    assert_eq!(t.effective_gross_total, dec("216"));
    assert_eq!(t.total_vat, dec("36"));
    assert_eq!(t.discounted_sub_total, dec("180"));
    assert_eq!(t.final_total, dec("216"));
    assert_eq!(t.vat_breakdown.get(&20), Some(&dec("36")));
}

#[test]
fn vat_identity_holds_for_mixed_rates_under_discount() {
    let lines = vec![
        line(1, "100", 20, 1),
        line(2, "100", 10, 1),
        line(3, "50", 0, 1),
    ];
    let t = price_cart(&lines, dec("30"), None, PaymentMethod::Cash, 1, &tiers());

    assert_eq!(t.raw_gross_total, dec("280"));
    assert_eq!(t.effective_gross_total, dec("250"));
    assert_eq!(t.vat_breakdown.len(), 3);
    assert_eq!(t.discounted_sub_total + t.total_vat, t.effective_gross_total);
}

#[test]
fn empty_cart_totals_zero() {
    let t = price_cart(&[], Decimal::ZERO, None, PaymentMethod::Card, 3, &tiers());

    assert_eq!(t.raw_gross_total, Decimal::ZERO);
    assert_eq!(t.total_vat, Decimal::ZERO);
    assert_eq!(t.discounted_sub_total, Decimal::ZERO);
    assert_eq!(t.final_total, Decimal::ZERO);
}

#[test]
fn oversized_discount_clamps_to_zero() {
    let lines = vec![line(1, "10", 20, 1)]; // gross 12
    let t = price_cart(&lines, dec("100"), None, PaymentMethod::Cash, 1, &tiers());

    assert_eq!(t.effective_gross_total, Decimal::ZERO);
    assert_eq!(t.total_vat, Decimal::ZERO);
    assert_eq!(t.discounted_sub_total, Decimal::ZERO);
    assert_eq!(t.final_total, Decimal::ZERO);
}

#[test]
fn manual_and_coupon_discounts_stack() {
    let lines = vec![line(1, "100", 20, 2)]; // gross 240
    let c = coupon("10");
    let t = price_cart(&lines, dec("16"), Some(&c), PaymentMethod::Cash, 1, &tiers());

    assert_eq!(t.coupon_discount, dec("24"));
    assert_eq!(t.total_discount, dec("40"));
    assert_eq!(t.effective_gross_total, dec("200"));
    assert_eq!(t.discounted_sub_total + t.total_vat, t.effective_gross_total);
}

#[test]
fn card_commission_comes_from_the_tier_table() {
    let lines = vec![line(1, "100", 20, 2)]; // effective 240
    let t = price_cart(&lines, Decimal::ZERO, None, PaymentMethod::Card, 6, &tiers());

    assert_eq!(t.commission_rate, dec("10"));
    assert_eq!(t.commission_amount, dec("24"));
    assert_eq!(t.final_total, dec("264"));
}

#[test]
fn unknown_installment_tier_adds_no_surcharge() {
    let lines = vec![line(1, "100", 20, 2)];
    let t = price_cart(&lines, Decimal::ZERO, None, PaymentMethod::Card, 9, &tiers());

    assert_eq!(t.commission_rate, Decimal::ZERO);
    assert_eq!(t.final_total, dec("240"));
}

#[test]
fn quantity_multiplies_within_a_line() {
    let lines = vec![line(1, "25.50", 10, 4)]; // net 102, gross 112.20
    let t = price_cart(&lines, Decimal::ZERO, None, PaymentMethod::Cash, 1, &tiers());

    assert_eq!(t.raw_gross_total, dec("112.20"));
    assert_eq!(t.total_vat, dec("10.20"));
    assert_eq!(t.discounted_sub_total, dec("102"));
}
