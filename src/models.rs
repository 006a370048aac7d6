// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    SelfService,
    Coaching,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub category: ServiceCategory,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub service_id: i64,
    pub name: String,
    pub price: Decimal, // VAT-exclusive
    pub session_count: u32,
    pub validity_days: Option<u32>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Card,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub active_package_id: Option<i64>,
    pub remaining_sessions: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: MemberStatus,
    pub payment_type: Option<PaymentType>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Trainer,
    Dietitian,
    Physio,
}

/// Exactly one earnings source applies per staff member at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PayModel {
    Salaried { salary: Decimal },
    Commission { rate: Decimal },
    Partner { share_rate: Decimal },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub pay: PayModel,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub member_id: i64,
    pub trainer_id: i64,
    pub date: NaiveDate,
    pub time: String, // HH:MM
    pub kind: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: Decimal, // VAT-exclusive
    pub cost: Decimal,  // margin reporting only, never pricing
    pub stock: i64,
    pub tax_rate: u32, // percent: 0 | 1 | 8 | 10 | 18 | 20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub price_at_sale: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSale {
    pub id: i64,
    pub date: NaiveDate,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub staff_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Bill,
    Salary,
    Maintenance,
    StockPurchase,
    Consumable,
    Tax,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub installments: u32,
    pub paid_installments: u32,
    pub status: ExpenseStatus, // derived: Paid iff paid_installments >= installments
}

impl Expense {
    pub fn derived_status(paid: u32, total: u32) -> ExpenseStatus {
        if paid >= total {
            ExpenseStatus::Paid
        } else {
            ExpenseStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedExpenseKind {
    /// Recurring same-amount monthly cost.
    Fixed,
    /// Bill reminder; the amount is entered only when paid.
    Variable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub day_of_month: u32,
    pub kind: FixedExpenseKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRate {
    pub installments: u32,
    pub rate: Decimal, // percent surcharge
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    pub discount_rate: Decimal, // percent off the gross cart total
    pub active: bool,
}
