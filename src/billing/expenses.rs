// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{IncomeBreakdown, Snapshot};
use crate::models::{ExpenseCategory, FixedExpense, FixedExpenseKind};
use crate::utils::in_month;

fn vat_rate() -> Decimal {
    Decimal::new(20, 2)
}

fn withholding_rate() -> Decimal {
    Decimal::new(20, 2)
}

fn corporate_rate() -> Decimal {
    Decimal::new(25, 2)
}

#[derive(Debug, Clone, Serialize)]
pub struct OperatingExpenses {
    pub fixed_total: Decimal,
    pub stock_purchase: Decimal,
    pub consumable: Decimal,
    pub other: Decimal,
    pub total: Decimal,
}

/// Operating expenses for a period. Fixed-kind recurring costs count every
/// period unconditionally; one-off expenses are period-filtered and
/// bucketed. Every category except `Tax` counts — tax payments are
/// accounted in the tax block, not here.
pub fn operating_expenses(snap: &Snapshot, month: &str) -> OperatingExpenses {
    let fixed_total = snap
        .fixed_expenses
        .iter()
        .filter(|e| e.kind == FixedExpenseKind::Fixed)
        .map(|e| e.amount)
        .sum::<Decimal>();

    let mut stock_purchase = Decimal::ZERO;
    let mut consumable = Decimal::ZERO;
    let mut other = Decimal::ZERO;
    for e in snap.expenses.iter().filter(|e| in_month(e.date, month)) {
        match e.category {
            ExpenseCategory::StockPurchase => stock_purchase += e.amount,
            ExpenseCategory::Consumable => consumable += e.amount,
            ExpenseCategory::Tax => {}
            _ => other += e.amount,
        }
    }

    OperatingExpenses {
        fixed_total,
        stock_purchase,
        consumable,
        other,
        total: fixed_total + stock_purchase + consumable + other,
    }
}

/// The rent line drives withholding tax; matched by title substring, any
/// fixed-expense kind.
pub fn rent_amount(fixed: &[FixedExpense]) -> Decimal {
    fixed
        .iter()
        .find(|e| {
            let t = e.title.to_lowercase();
            t.contains("kira") || t.contains("rent")
        })
        .map(|e| e.amount)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Serialize)]
pub struct TaxBreakdown {
    pub vat: Decimal,
    pub withholding: Decimal,
    pub corporate: Decimal,
    pub pre_tax_profit: Decimal,
    pub total: Decimal,
}

/// Tax waterfall. VAT on memberships and product sales is a flat 20% here
/// even though the POS calculator is per-product-rate aware; the two
/// deliberately disagree and must not be unified, or reported numbers
/// change.
pub fn taxes(
    snap: &Snapshot,
    month: &str,
    income: &IncomeBreakdown,
    operating_total: Decimal,
    staff_costs_total: Decimal,
) -> TaxBreakdown {
    let mut vat = income.membership_income * vat_rate();
    for sale in snap.product_sales.iter().filter(|s| in_month(s.date, month)) {
        vat += sale.total_amount * vat_rate();
    }

    let withholding = rent_amount(&snap.fixed_expenses) * withholding_rate();

    let pre_tax_profit = income.total - operating_total - staff_costs_total - vat - withholding;
    let corporate = if pre_tax_profit > Decimal::ZERO {
        pre_tax_profit * corporate_rate()
    } else {
        Decimal::ZERO
    };

    TaxBreakdown {
        vat,
        withholding,
        corporate,
        pre_tax_profit,
        total: vat + withholding + corporate,
    }
}
