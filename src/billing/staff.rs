// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Diagnostic, Snapshot};
use crate::models::{AppointmentStatus, PayModel, Role};
use crate::utils::{in_month, pct};

#[derive(Debug, Clone, Serialize)]
pub struct StaffEarnings {
    pub staff_id: i64,
    pub name: String,
    pub role: Role,
    pub model: &'static str,
    pub appointment_count: usize,
    pub salary: Decimal,
    pub lesson_earning: Decimal,
    pub share_rate: Decimal,
    pub profit_share: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StaffCosts {
    pub total_salaries: Decimal,
    pub total_commissions: Decimal,
    pub total: Decimal,
    pub detail: Vec<StaffEarnings>,
}

fn model_label(pay: &PayModel) -> &'static str {
    match pay {
        PayModel::Salaried { .. } => "salaried",
        PayModel::Commission { .. } => "commission",
        PayModel::Partner { .. } => "partner",
    }
}

/// Salary and lesson-commission earnings for a period. Partners earn
/// nothing at this stage; their share needs the final net profit, which in
/// turn needs this total, so the two phases must not be merged.
///
/// `total` feeds the tax waterfall as the deductible staff cost: salaries
/// plus commissions, profit share excluded.
pub fn base_earnings(snap: &Snapshot, month: &str, diags: &mut Vec<Diagnostic>) -> StaffCosts {
    let mut total_salaries = Decimal::ZERO;
    let mut total_commissions = Decimal::ZERO;
    let mut detail = Vec::with_capacity(snap.staff.len());

    for st in &snap.staff {
        let in_period: Vec<_> = snap
            .appointments
            .iter()
            .filter(|a| {
                a.trainer_id == st.id
                    && in_month(a.date, month)
                    && a.status != AppointmentStatus::Cancelled
            })
            .collect();

        let mut salary = Decimal::ZERO;
        let mut lesson_earning = Decimal::ZERO;
        let mut share_rate = Decimal::ZERO;

        match &st.pay {
            PayModel::Salaried { salary: s } => salary = *s,
            PayModel::Commission { rate } => {
                for appt in &in_period {
                    let Some(member) = snap.member(appt.member_id) else {
                        diags.push(Diagnostic::new(
                            format!("appointment {}", appt.id),
                            format!("member {} not found, lesson skipped", appt.member_id),
                        ));
                        continue;
                    };
                    let Some(pid) = member.active_package_id else {
                        continue;
                    };
                    let Some(pkg) = snap.package(pid) else {
                        diags.push(Diagnostic::new(
                            format!("member {}", member.id),
                            format!("active package {} not found, lesson skipped", pid),
                        ));
                        continue;
                    };
                    let unit_price = pkg.price / Decimal::from(pkg.session_count.max(1));
                    lesson_earning += unit_price * pct(*rate);
                }
            }
            PayModel::Partner { share_rate: r } => share_rate = *r,
        }

        total_salaries += salary;
        total_commissions += lesson_earning;

        detail.push(StaffEarnings {
            staff_id: st.id,
            name: st.name.clone(),
            role: st.role,
            model: model_label(&st.pay),
            appointment_count: in_period.len(),
            salary,
            lesson_earning,
            share_rate,
            profit_share: Decimal::ZERO,
            total: salary + lesson_earning,
        });
    }

    StaffCosts {
        total_salaries,
        total_commissions,
        total: total_salaries + total_commissions,
        detail,
    }
}

/// Second phase: hand partners their cut of the final net profit. Negative
/// profit pays nothing; there is no clawback.
pub fn distribute_profit(costs: StaffCosts, net_profit: Decimal) -> Vec<StaffEarnings> {
    costs
        .detail
        .into_iter()
        .map(|mut s| {
            if s.share_rate > Decimal::ZERO && net_profit > Decimal::ZERO {
                s.profit_share = net_profit * pct(s.share_rate);
            }
            s.total = s.salary + s.lesson_earning + s.profit_share;
            s
        })
        .collect()
}
