// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use gymbook::billing::{self, Snapshot};
use gymbook::models::{
    Appointment, AppointmentStatus, Expense, ExpenseCategory, ExpenseStatus, FixedExpense,
    FixedExpenseKind, Member, MemberStatus, Package, PayModel, ProductSale, Role, Staff,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn empty_snapshot() -> Snapshot {
    Snapshot {
        members: vec![],
        packages: vec![],
        staff: vec![],
        appointments: vec![],
        expenses: vec![],
        fixed_expenses: vec![],
        products: vec![],
        product_sales: vec![],
    }
}

fn package(id: i64, price: &str, sessions: u32) -> Package {
    Package {
        id,
        service_id: 1,
        name: format!("Package {}", id),
        price: dec(price),
        session_count: sessions,
        validity_days: Some(30),
        active: true,
    }
}

fn member(id: i64, package_id: Option<i64>, start: &str) -> Member {
    Member {
        id,
        full_name: format!("Member {}", id),
        phone: String::new(),
        email: String::new(),
        active_package_id: package_id,
        remaining_sessions: None,
        start_date: date(start),
        end_date: None,
        status: MemberStatus::Active,
        payment_type: None,
        notes: None,
    }
}

fn sale(id: i64, day: &str, total: &str) -> ProductSale {
    ProductSale {
        id,
        date: date(day),
        items: vec![],
        total_amount: dec(total),
        staff_id: None,
    }
}

fn staff(id: i64, pay: PayModel) -> Staff {
    Staff {
        id,
        name: format!("Staff {}", id),
        role: Role::Trainer,
        pay,
        email: None,
        phone: None,
        hire_date: None,
    }
}

fn appointment(id: i64, member_id: i64, trainer_id: i64, day: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        member_id,
        trainer_id,
        date: date(day),
        time: "09:00".into(),
        kind: "fitness".into(),
        status,
    }
}

fn fixed(id: i64, title: &str, amount: &str, kind: FixedExpenseKind) -> FixedExpense {
    FixedExpense {
        id,
        title: title.into(),
        amount: dec(amount),
        day_of_month: 1,
        kind,
    }
}

fn expense(id: i64, category: ExpenseCategory, amount: &str, day: &str) -> Expense {
    Expense {
        id,
        title: format!("Expense {}", id),
        amount: dec(amount),
        category,
        date: date(day),
        installments: 1,
        paid_installments: 1,
        status: ExpenseStatus::Paid,
    }
}

#[test]
fn income_is_additive_across_sources() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "1500", 1), package(2, "2800", 12)];
    snap.members = vec![
        member(1, Some(1), "2025-08-03"),
        member(2, Some(2), "2025-08-20"),
        member(3, Some(1), "2025-07-15"), // outside the period
        member(4, None, "2025-08-10"),    // no package
    ];
    snap.product_sales = vec![
        sale(1, "2025-08-01", "350"),
        sale(2, "2025-08-28", "150"),
        sale(3, "2025-09-01", "999"), // outside the period
    ];

    let mut diags = Vec::new();
    let income = billing::income::income(&snap, "2025-08", &mut diags);
    assert_eq!(income.membership_income, dec("4300"));
    assert_eq!(income.product_income, dec("500"));
    assert_eq!(income.total, income.membership_income + income.product_income);
    assert!(diags.is_empty());
}

#[test]
fn per_period_incomes_sum_to_unfiltered_total() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "1000", 1)];
    snap.members = vec![
        member(1, Some(1), "2025-07-10"),
        member(2, Some(1), "2025-08-10"),
    ];
    snap.product_sales = vec![sale(1, "2025-07-05", "200"), sale(2, "2025-08-05", "300")];

    let mut diags = Vec::new();
    let july = billing::income::income(&snap, "2025-07", &mut diags);
    let august = billing::income::income(&snap, "2025-08", &mut diags);
    assert_eq!(july.total + august.total, dec("2500"));
}

#[test]
fn dangling_package_counts_zero_but_is_diagnosed() {
    let mut snap = empty_snapshot();
    snap.members = vec![member(1, Some(99), "2025-08-03")];

    let summary = billing::summarize(&snap, "2025-08");
    assert_eq!(summary.income.membership_income, Decimal::ZERO);
    assert!(
        summary
            .diagnostics
            .iter()
            .any(|d| d.detail.contains("package 99"))
    );
}

#[test]
fn operating_expenses_bucket_and_exclude_tax() {
    let mut snap = empty_snapshot();
    snap.fixed_expenses = vec![
        fixed(1, "Rent", "10000", FixedExpenseKind::Fixed),
        fixed(2, "Electricity", "0", FixedExpenseKind::Variable), // reminder only
    ];
    snap.expenses = vec![
        expense(1, ExpenseCategory::StockPurchase, "400", "2025-08-02"),
        expense(2, ExpenseCategory::Consumable, "100", "2025-08-03"),
        expense(3, ExpenseCategory::Bill, "250", "2025-08-04"),
        expense(4, ExpenseCategory::Salary, "50", "2025-08-05"),
        expense(5, ExpenseCategory::Tax, "9999", "2025-08-06"), // accounted in the tax block
        expense(6, ExpenseCategory::Other, "75", "2025-09-01"), // outside the period
    ];

    let op = billing::expenses::operating_expenses(&snap, "2025-08");
    assert_eq!(op.fixed_total, dec("10000"));
    assert_eq!(op.stock_purchase, dec("400"));
    assert_eq!(op.consumable, dec("100"));
    assert_eq!(op.other, dec("300")); // bill + salary
    assert_eq!(op.total, dec("10800"));
}

#[test]
fn withholding_is_a_fifth_of_rent_regardless_of_period() {
    let mut snap = empty_snapshot();
    snap.fixed_expenses = vec![fixed(1, "Kira", "15000", FixedExpenseKind::Fixed)];

    for month in ["2025-01", "2025-08", "2026-03"] {
        let summary = billing::summarize(&snap, month);
        assert_eq!(summary.taxes.withholding, dec("3000"));
    }
}

#[test]
fn corporate_tax_never_goes_negative() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "1000", 1)];
    snap.members = vec![member(1, Some(1), "2025-08-01")];
    // Expenses large enough to push pre-tax profit below zero.
    snap.expenses = vec![expense(1, ExpenseCategory::Other, "5000", "2025-08-02")];

    let summary = billing::summarize(&snap, "2025-08");
    assert!(summary.taxes.pre_tax_profit < Decimal::ZERO);
    assert_eq!(summary.taxes.corporate, Decimal::ZERO);
    assert_eq!(
        summary.taxes.total,
        summary.taxes.vat + summary.taxes.withholding
    );
}

#[test]
fn salaried_staff_earn_salary_even_with_appointments() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "2000", 8)];
    snap.members = vec![member(1, Some(1), "2025-08-01")];
    snap.staff = vec![staff(1, PayModel::Salaried { salary: dec("25000") })];
    snap.appointments = vec![appointment(1, 1, 1, "2025-08-05", AppointmentStatus::Scheduled)];

    let summary = billing::summarize(&snap, "2025-08");
    let row = &summary.staff_earnings[0];
    assert_eq!(row.appointment_count, 1);
    assert_eq!(row.lesson_earning, Decimal::ZERO);
    assert_eq!(row.salary, dec("25000"));
    assert_eq!(row.total, dec("25000"));
}

#[test]
fn commission_staff_earn_per_lesson_and_skip_cancelled() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "2000", 8)]; // unit price 250
    snap.members = vec![member(1, Some(1), "2025-08-01")];
    snap.staff = vec![staff(1, PayModel::Commission { rate: dec("40") })];
    snap.appointments = vec![
        appointment(1, 1, 1, "2025-08-05", AppointmentStatus::Scheduled),
        appointment(2, 1, 1, "2025-08-12", AppointmentStatus::Completed),
        appointment(3, 1, 1, "2025-08-19", AppointmentStatus::Cancelled),
        appointment(4, 1, 1, "2025-09-02", AppointmentStatus::Scheduled), // next month
    ];

    let mut diags = Vec::new();
    let costs = billing::staff::base_earnings(&snap, "2025-08", &mut diags);
    let row = &costs.detail[0];
    assert_eq!(row.appointment_count, 2);
    assert_eq!(row.lesson_earning, dec("200")); // 2 lessons x 250 x 40%
    assert_eq!(costs.total, dec("200"));
}

#[test]
fn zero_session_package_counts_as_one_session() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "1500", 0)];
    snap.members = vec![member(1, Some(1), "2025-08-01")];
    snap.staff = vec![staff(1, PayModel::Commission { rate: dec("10") })];
    snap.appointments = vec![appointment(1, 1, 1, "2025-08-05", AppointmentStatus::Scheduled)];

    let mut diags = Vec::new();
    let costs = billing::staff::base_earnings(&snap, "2025-08", &mut diags);
    assert_eq!(costs.detail[0].lesson_earning, dec("150"));
}

#[test]
fn partners_get_nothing_from_a_losing_month() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "1000", 1)];
    snap.members = vec![member(1, Some(1), "2025-08-01")];
    snap.expenses = vec![expense(1, ExpenseCategory::Other, "5000", "2025-08-02")];
    snap.staff = vec![staff(1, PayModel::Partner { share_rate: dec("30") })];

    let summary = billing::summarize(&snap, "2025-08");
    assert!(summary.net_profit < Decimal::ZERO);
    assert_eq!(summary.staff_earnings[0].profit_share, Decimal::ZERO);
    assert_eq!(summary.staff_earnings[0].total, Decimal::ZERO);
}

#[test]
fn full_waterfall_with_partner_distribution() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "2000", 8)];
    snap.members = vec![member(1, Some(1), "2025-08-05")];
    snap.product_sales = vec![sale(1, "2025-08-10", "500")];
    snap.staff = vec![
        staff(1, PayModel::Salaried { salary: dec("500") }),
        staff(2, PayModel::Commission { rate: dec("40") }),
        staff(3, PayModel::Partner { share_rate: dec("30") }),
    ];
    snap.appointments = vec![appointment(1, 1, 2, "2025-08-06", AppointmentStatus::Completed)];

    let summary = billing::summarize(&snap, "2025-08");

    // income 2500; staff costs 500 + 100; VAT 500; no rent
    assert_eq!(summary.income.total, dec("2500"));
    assert_eq!(summary.staff_costs_total, dec("600"));
    assert_eq!(summary.taxes.vat, dec("500"));
    assert_eq!(summary.taxes.withholding, Decimal::ZERO);
    // pre-tax 1400 -> corporate 350 -> total tax 850 -> net 1050
    assert_eq!(summary.taxes.pre_tax_profit, dec("1400"));
    assert_eq!(summary.taxes.corporate, dec("350"));
    assert_eq!(summary.taxes.total, dec("850"));
    assert_eq!(summary.net_profit, dec("1050"));

    // partner takes 30% of net; staff costs are untouched by the distribution
    let partner = summary.staff_earnings.iter().find(|s| s.staff_id == 3).unwrap();
    assert_eq!(partner.profit_share, dec("315"));
    assert_eq!(partner.total, dec("315"));
    assert_eq!(summary.staff_costs_total, dec("600"));

    // the waterfall identity
    assert_eq!(
        summary.net_profit,
        summary.income.total - summary.operating.total - summary.staff_costs_total
            - summary.taxes.total
    );
}

#[test]
fn membership_and_product_summaries_follow_the_period() {
    let mut snap = empty_snapshot();
    snap.packages = vec![package(1, "1500", 1)];
    snap.members = vec![
        member(1, Some(1), "2025-08-03"),
        member(2, Some(1), "2025-08-21"),
    ];
    snap.products = vec![gymbook::models::Product {
        id: 7,
        name: "Shaker".into(),
        category: "equipment".into(),
        price: dec("100"),
        cost: dec("60"),
        stock: 10,
        tax_rate: 20,
    }];
    snap.product_sales = vec![ProductSale {
        id: 1,
        date: date("2025-08-10"),
        items: vec![gymbook::models::SaleItem {
            product_id: 7,
            name: "Shaker".into(),
            quantity: 2,
            price_at_sale: dec("100"),
        }],
        total_amount: dec("240"),
        staff_id: None,
    }];

    let summary = billing::summarize(&snap, "2025-08");
    assert_eq!(summary.membership_sales.get("Package 1"), Some(&2));
    assert_eq!(summary.product_summary.gross, dec("240"));
    assert_eq!(summary.product_summary.cost, dec("120"));
    assert_eq!(summary.product_summary.profit, dec("120"));
}
