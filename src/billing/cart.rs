// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{CommissionRate, Coupon, Product};
use crate::utils::pct;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub unit_price: Decimal, // VAT-exclusive
    pub tax_rate: u32,
    pub quantity: u32,
}

impl CartLine {
    pub fn from_product(p: &Product, quantity: u32) -> Self {
        CartLine {
            product_id: p.id,
            name: p.name.clone(),
            unit_price: p.price,
            tax_rate: p.tax_rate,
            quantity,
        }
    }

    fn gross(&self) -> Decimal {
        let net = self.unit_price * Decimal::from(self.quantity);
        net * (Decimal::ONE + pct(Decimal::from(self.tax_rate)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartTotals {
    pub raw_gross_total: Decimal,
    pub manual_discount: Decimal,
    pub coupon_discount: Decimal,
    pub total_discount: Decimal,
    pub effective_gross_total: Decimal,
    /// VAT owed per tax rate after the discount is spread across lines.
    pub vat_breakdown: BTreeMap<u32, Decimal>,
    pub total_vat: Decimal,
    pub discounted_sub_total: Decimal,
    pub commission_rate: Decimal,
    pub commission_amount: Decimal,
    pub final_total: Decimal,
}

/// Checkout pricing. The discount applies to the VAT-inclusive total and
/// is then backed out per line to keep the per-rate VAT breakdown
/// consistent: `discounted_sub_total + total_vat == effective_gross_total`
/// holds for every input, including an empty cart and a 100% discount.
pub fn price_cart(
    lines: &[CartLine],
    manual_discount: Decimal,
    coupon: Option<&Coupon>,
    method: PaymentMethod,
    installments: u32,
    rates: &[CommissionRate],
) -> CartTotals {
    let raw_gross_total: Decimal = lines.iter().map(|l| l.gross()).sum();

    let coupon_discount = coupon
        .map(|c| raw_gross_total * pct(c.discount_rate))
        .unwrap_or(Decimal::ZERO);
    let total_discount = manual_discount + coupon_discount;

    let effective_gross_total = (raw_gross_total - total_discount).max(Decimal::ZERO);

    // Ratio 1 for the empty cart keeps the division meaningful.
    let discount_ratio = if raw_gross_total > Decimal::ZERO {
        effective_gross_total / raw_gross_total
    } else {
        Decimal::ONE
    };

    let mut vat_breakdown: BTreeMap<u32, Decimal> = BTreeMap::new();
    for line in lines {
        let discounted_gross = line.gross() * discount_ratio;
        let discounted_net = discounted_gross / (Decimal::ONE + pct(Decimal::from(line.tax_rate)));
        let line_vat = discounted_gross - discounted_net;
        *vat_breakdown.entry(line.tax_rate).or_insert(Decimal::ZERO) += line_vat;
    }
    let total_vat: Decimal = vat_breakdown.values().copied().sum();
    let discounted_sub_total = effective_gross_total - total_vat;

    // Unknown installment tier charges no surcharge.
    let commission_rate = match method {
        PaymentMethod::Card => rates
            .iter()
            .find(|r| r.installments == installments)
            .map(|r| r.rate)
            .unwrap_or(Decimal::ZERO),
        PaymentMethod::Cash => Decimal::ZERO,
    };
    let commission_amount = effective_gross_total * pct(commission_rate);

    CartTotals {
        raw_gross_total,
        manual_discount,
        coupon_discount,
        total_discount,
        effective_gross_total,
        vat_breakdown,
        total_vat,
        discounted_sub_total,
        commission_rate,
        commission_amount,
        final_total: effective_gross_total + commission_amount,
    }
}
