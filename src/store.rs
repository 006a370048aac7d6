// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{
    Appointment, CommissionRate, Coupon, Expense, FixedExpense, Member, Package, Product,
    ProductSale, Service, Staff,
};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Gymbook", "gymbook"));

// Document keys must stay filesystem-safe.
static KEY_FILTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

pub const MEMBERS: &str = "gym_members";
pub const PACKAGES: &str = "gym_packages";
pub const SERVICES: &str = "gym_services";
pub const STAFF: &str = "gym_staff";
pub const APPOINTMENTS: &str = "gym_appointments";
pub const EXPENSES: &str = "gym_expenses";
pub const FIXED_EXPENSES: &str = "gym_fixed_expenses";
pub const COMMISSIONS: &str = "gym_commissions";
pub const PRODUCTS: &str = "gym_products";
pub const PRODUCT_SALES: &str = "gym_product_sales";
pub const COUPONS: &str = "gym_coupons";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not determine platform-specific data dir")]
    NoDataDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key -> JSON-document map on disk; one file per collection, rewritten
/// in full on every mutation.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn open_or_init() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(StoreError::NoDataDir)?;
        Self::at(proj.data_dir())
    }

    pub fn at(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Store {
            data_dir: dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn doc_path(&self, key: &str) -> PathBuf {
        let safe = KEY_FILTER.replace_all(key, "");
        self.data_dir.join(format!("{}.json", safe))
    }

    /// Missing document reads as None; a present-but-unparseable one is an error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.doc_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let doc = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        Ok(Some(doc))
    }

    pub fn write<T: Serialize>(&self, key: &str, doc: &T) -> Result<(), StoreError> {
        let path = self.doc_path(key);
        let raw = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, raw).map_err(|source| StoreError::Io { path, source })
    }

    fn collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    pub fn members(&self) -> Result<Vec<Member>, StoreError> {
        self.collection(MEMBERS)
    }

    pub fn packages(&self) -> Result<Vec<Package>, StoreError> {
        self.collection(PACKAGES)
    }

    pub fn services(&self) -> Result<Vec<Service>, StoreError> {
        self.collection(SERVICES)
    }

    pub fn staff(&self) -> Result<Vec<Staff>, StoreError> {
        self.collection(STAFF)
    }

    pub fn appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        self.collection(APPOINTMENTS)
    }

    pub fn expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.collection(EXPENSES)
    }

    pub fn fixed_expenses(&self) -> Result<Vec<FixedExpense>, StoreError> {
        self.collection(FIXED_EXPENSES)
    }

    pub fn commission_rates(&self) -> Result<Vec<CommissionRate>, StoreError> {
        self.collection(COMMISSIONS)
    }

    pub fn products(&self) -> Result<Vec<Product>, StoreError> {
        self.collection(PRODUCTS)
    }

    pub fn product_sales(&self) -> Result<Vec<ProductSale>, StoreError> {
        self.collection(PRODUCT_SALES)
    }

    pub fn coupons(&self) -> Result<Vec<Coupon>, StoreError> {
        self.collection(COUPONS)
    }
}
