// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::collections::HashSet;

use crate::models::{Expense, ExpenseStatus};
use crate::store::Store;
use crate::utils::pretty_table;

/// Integrity scan. The billing engine silently counts dangling references
/// as zero; this is where they become visible. Read-only.
pub fn handle(store: &Store) -> Result<()> {
    let members = store.members()?;
    let packages = store.packages()?;
    let staff = store.staff()?;
    let appointments = store.appointments()?;
    let products = store.products()?;
    let sales = store.product_sales()?;
    let expenses = store.expenses()?;
    let coupons = store.coupons()?;
    let rates = store.commission_rates()?;

    let mut rows = Vec::new();

    // 1) Members pointing at packages that no longer exist
    for m in &members {
        if let Some(pid) = m.active_package_id {
            if !packages.iter().any(|p| p.id == pid) {
                rows.push(vec![
                    "member_dangling_package".into(),
                    format!("member {} ({}) -> package {}", m.id, m.full_name, pid),
                ]);
            }
        }
    }

    // 2) Appointments with missing member or trainer
    for a in &appointments {
        if !members.iter().any(|m| m.id == a.member_id) {
            rows.push(vec![
                "appt_missing_member".into(),
                format!("appointment {} -> member {}", a.id, a.member_id),
            ]);
        }
        if !staff.iter().any(|s| s.id == a.trainer_id) {
            rows.push(vec![
                "appt_missing_trainer".into(),
                format!("appointment {} -> staff {}", a.id, a.trainer_id),
            ]);
        }
    }

    // 3) Sale line items referencing deleted products
    for s in &sales {
        for item in &s.items {
            if !products.iter().any(|p| p.id == item.product_id) {
                rows.push(vec![
                    "sale_missing_product".into(),
                    format!("sale {} -> product {}", s.id, item.product_id),
                ]);
            }
        }
    }

    // 4) Expense installment state drifted from its derived status
    for e in &expenses {
        if e.status != Expense::derived_status(e.paid_installments, e.installments) {
            let label = match e.status {
                ExpenseStatus::Paid => "paid",
                ExpenseStatus::Pending => "pending",
            };
            rows.push(vec![
                "expense_status_drift".into(),
                format!(
                    "expense {} is {} with {}/{} installments",
                    e.id, label, e.paid_installments, e.installments
                ),
            ]);
        }
        if e.paid_installments > e.installments {
            rows.push(vec![
                "expense_overpaid".into(),
                format!(
                    "expense {} has {}/{} installments",
                    e.id, e.paid_installments, e.installments
                ),
            ]);
        }
    }

    // 5) Duplicate active coupon codes
    let mut seen = HashSet::new();
    for c in coupons.iter().filter(|c| c.active) {
        if !seen.insert(c.code.clone()) {
            rows.push(vec!["coupon_duplicate_code".into(), c.code.clone()]);
        }
    }

    // 6) Duplicate commission tiers
    let mut tiers = HashSet::new();
    for r in &rates {
        if !tiers.insert(r.installments) {
            rows.push(vec![
                "commission_duplicate_tier".into(),
                format!("{} installments", r.installments),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
