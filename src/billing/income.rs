// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Diagnostic, Snapshot};
use crate::utils::in_month;

#[derive(Debug, Clone, Serialize)]
pub struct IncomeBreakdown {
    pub membership_income: Decimal,
    pub product_income: Decimal,
    pub total: Decimal,
}

/// Period income. Membership revenue is attributed to the month the
/// membership started, not to the days of service actually consumed; a
/// renewal started in month M books all of its price to M.
pub fn income(snap: &Snapshot, month: &str, diags: &mut Vec<Diagnostic>) -> IncomeBreakdown {
    let mut membership_income = Decimal::ZERO;
    for m in &snap.members {
        if !in_month(m.start_date, month) {
            continue;
        }
        let Some(pid) = m.active_package_id else {
            continue;
        };
        match snap.package(pid) {
            Some(pkg) => membership_income += pkg.price,
            None => diags.push(Diagnostic::new(
                format!("member {}", m.id),
                format!("active package {} not found, counted as 0", pid),
            )),
        }
    }

    let product_income = snap
        .product_sales
        .iter()
        .filter(|s| in_month(s.date, month))
        .map(|s| s.total_amount)
        .sum::<Decimal>();

    IncomeBreakdown {
        membership_income,
        product_income,
        total: membership_income + product_income,
    }
}
