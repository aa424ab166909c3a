// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Transaction, TransactionType};

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_tax: Decimal,
    pub gross_profit: Decimal,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub expenses_by_category: BTreeMap<String, Decimal>,
}

/// Single-pass reduction over an already-selected transaction set. Income
/// counts net of tax, expenses count gross. A transaction carrying several
/// tags contributes its full figure (net for income, gross for expenses) to
/// every tag's bucket; the per-tag view double-counts across categories on
/// purpose, it is never divided.
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summary = Summary::default();
    for tx in transactions {
        match tx.r#type {
            TransactionType::Income => {
                summary.total_income += tx.net_amount;
                summary.total_tax += tx.tax_amount;
                for tag in &tx.tags {
                    *summary
                        .income_by_category
                        .entry(tag.clone())
                        .or_insert(Decimal::ZERO) += tx.net_amount;
                }
            }
            TransactionType::Expense => {
                summary.total_expenses += tx.amount;
                for tag in &tx.tags {
                    *summary
                        .expenses_by_category
                        .entry(tag.clone())
                        .or_insert(Decimal::ZERO) += tx.amount;
                }
            }
        }
    }
    summary.gross_profit = summary.total_income - summary.total_expenses;
    summary
}
