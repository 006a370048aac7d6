// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial aggregation over an in-memory snapshot of the domain
//! collections. Everything here is a pure function of the snapshot and a
//! `YYYY-MM` period: no mutation, no I/O, re-run to completion on every
//! invocation. Lookups that miss degrade to zero so a report never fails
//! on dirty data; each miss is surfaced as a [`Diagnostic`] instead.

pub mod cart;
pub mod expenses;
pub mod income;
pub mod staff;

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    Appointment, Expense, FixedExpense, Member, Package, Product, ProductSale, Staff,
};
use crate::store::{Store, StoreError};
use crate::utils::in_month;

pub use expenses::{OperatingExpenses, TaxBreakdown};
pub use income::IncomeBreakdown;
pub use staff::{StaffCosts, StaffEarnings};

/// All collections the engine reads, loaded once per invocation.
pub struct Snapshot {
    pub members: Vec<Member>,
    pub packages: Vec<Package>,
    pub staff: Vec<Staff>,
    pub appointments: Vec<Appointment>,
    pub expenses: Vec<Expense>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub products: Vec<Product>,
    pub product_sales: Vec<ProductSale>,
}

impl Snapshot {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        Ok(Snapshot {
            members: store.members()?,
            packages: store.packages()?,
            staff: store.staff()?,
            appointments: store.appointments()?,
            expenses: store.expenses()?,
            fixed_expenses: store.fixed_expenses()?,
            products: store.products()?,
            product_sales: store.product_sales()?,
        })
    }

    pub fn package(&self, id: i64) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn member(&self, id: i64) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// A lookup miss the totals silently absorbed as zero.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub record: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(record: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic {
            record: record.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub gross: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Serialize)]
pub struct FinancialSummary {
    pub period: String,
    pub income: IncomeBreakdown,
    pub operating: OperatingExpenses,
    pub staff_costs_total: Decimal,
    pub taxes: TaxBreakdown,
    pub net_profit: Decimal,
    pub staff_earnings: Vec<StaffEarnings>,
    pub membership_sales: BTreeMap<String, u32>,
    pub product_summary: ProductSummary,
    pub diagnostics: Vec<Diagnostic>,
}

/// The full waterfall. Order matters: staff costs before taxes, taxes
/// before net profit, net profit before partner distribution. Profit share
/// is a distribution of net profit, never a cost inside it.
pub fn summarize(snap: &Snapshot, month: &str) -> FinancialSummary {
    let mut diags = Vec::new();

    let income = income::income(snap, month, &mut diags);
    let operating = expenses::operating_expenses(snap, month);
    let costs = staff::base_earnings(snap, month, &mut diags);
    let taxes = expenses::taxes(snap, month, &income, operating.total, costs.total);

    let net_profit = income.total - operating.total - costs.total - taxes.total;
    let staff_costs_total = costs.total;
    let staff_earnings = staff::distribute_profit(costs, net_profit);

    FinancialSummary {
        period: month.to_string(),
        membership_sales: membership_sales(snap, month),
        product_summary: product_summary(snap, month, &mut diags),
        income,
        operating,
        staff_costs_total,
        taxes,
        net_profit,
        staff_earnings,
        diagnostics: diags,
    }
}

/// In-period membership sales counted per package name.
fn membership_sales(snap: &Snapshot, month: &str) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for m in &snap.members {
        if !in_month(m.start_date, month) {
            continue;
        }
        let Some(pid) = m.active_package_id else {
            continue;
        };
        if let Some(pkg) = snap.package(pid) {
            *counts.entry(pkg.name.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Gross revenue vs. acquisition cost of the period's product sales. The
/// only consumer of `Product::cost`.
fn product_summary(snap: &Snapshot, month: &str, diags: &mut Vec<Diagnostic>) -> ProductSummary {
    let mut gross = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    for sale in &snap.product_sales {
        if !in_month(sale.date, month) {
            continue;
        }
        gross += sale.total_amount;
        for item in &sale.items {
            match snap.product(item.product_id) {
                Some(p) => cost += p.cost * Decimal::from(item.quantity),
                None => diags.push(Diagnostic::new(
                    format!("sale {}", sale.id),
                    format!("item references missing product {}", item.product_id),
                )),
            }
        }
    }
    ProductSummary {
        gross,
        cost,
        profit: gross - cost,
    }
}
