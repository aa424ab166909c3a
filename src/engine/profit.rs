// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Package;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitBreakdown {
    pub package_name: String,
    pub price: Decimal,
    pub expenses: BTreeMap<String, Decimal>,
    pub total_expenses: Decimal,
    pub profit: Decimal,
}

/// Expense values on a package are absolute currency amounts and are summed
/// as-is. NOTE: an earlier revision of the books read them as percentages of
/// the package price (`value / 100 * price`); data recorded under that
/// convention must be converted to amounts before entry, it is not detected
/// here.
///
/// Profit is `price - total_expenses` and may be negative; it is reported
/// as-is, never floored at zero.
pub fn calculate(package: &Package) -> ProfitBreakdown {
    let mut expenses = BTreeMap::new();
    let mut total_expenses = Decimal::ZERO;
    for (category, amount) in &package.expenses {
        expenses.insert(category.clone(), *amount);
        total_expenses += *amount;
    }
    ProfitBreakdown {
        package_name: package.package_name.clone(),
        price: package.price,
        expenses,
        total_expenses,
        profit: package.price - total_expenses,
    }
}
