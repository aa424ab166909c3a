// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = engine::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(engine::Error::Validation(format!(
                "unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Active,
    Excluded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Active => "active",
            TransactionStatus::Excluded => "excluded",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = engine::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TransactionStatus::Active),
            "excluded" => Ok(TransactionStatus::Excluded),
            other => Err(engine::Error::Validation(format!(
                "unknown status '{}' (use active|excluded)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub status: TransactionStatus,
    pub transaction_date: NaiveDateTime,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub net_amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// `tax_amount` and `net_amount` follow from the amount and rate; they are
    /// recomputed whenever either changes, never edited directly.
    pub fn tax_parts(amount: Decimal, tax_rate: Decimal) -> (Decimal, Decimal) {
        let tax_amount = amount * tax_rate;
        (tax_amount, amount - tax_amount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub teacher_id: i64,
    pub package_id: i64,
    pub session_date: NaiveDateTime,
    pub duration: Decimal, // hours
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub hourly_rate: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub package_name: String,
    pub price: Decimal,
    pub expenses: BTreeMap<String, Decimal>,
}
