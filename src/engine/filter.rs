// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Multi-criteria transaction filtering: predicate, ordering, and page slice.

use chrono::NaiveDateTime;
use regex::{Regex, RegexBuilder};

use crate::models::{Transaction, TransactionStatus, TransactionType};

use super::{period, Error};

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Amount,
    Name,
    CreatedAt,
}

impl std::str::FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" | "transactionDate" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "name" => Ok(SortField::Name),
            "createdAt" | "created-at" => Ok(SortField::CreatedAt),
            other => Err(Error::Validation(format!(
                "unknown sort field '{}' (use date|amount|name|createdAt)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::Validation(format!(
                "unknown sort order '{}' (use asc|desc)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub r#type: Option<TransactionType>,
    pub tags: Vec<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub month: Option<String>, // YYYY-MM
    pub year: Option<String>,
    pub status: Option<TransactionStatus>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
}

/// A transaction matches when any of its tags appears in the wanted set.
pub fn tags_intersect(have: &[String], want: &[String]) -> bool {
    want.iter().any(|w| have.iter().any(|h| h == w))
}

fn search_pattern(query: &str) -> Result<Regex, Error> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|err| Error::Validation(format!("bad search term '{}': {}", query, err)))
}

/// Applies the filter as a pure function over a candidate set: content
/// predicates first, then ordering, then the page slice. The `month` shortcut
/// replaces any explicit date range, and `year` replaces both.
pub fn apply<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Result<Vec<&'a Transaction>, Error> {
    let limit = filter.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(Error::Validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    let page = filter.page.unwrap_or(1);
    if page < 1 {
        return Err(Error::Validation("page must be at least 1".to_string()));
    }

    let mut window = (filter.start_date, filter.end_date);
    if let Some(month) = &filter.month {
        let (s, e) = period::month_bounds(month)?;
        window = (Some(s), Some(e));
    }
    if let Some(year) = &filter.year {
        let (s, e) = period::year_bounds(year)?;
        window = (Some(s), Some(e));
    }

    let search = match &filter.search {
        Some(q) => Some(search_pattern(q)?),
        None => None,
    };

    let mut hits: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| {
            if let Some(ty) = filter.r#type {
                if t.r#type != ty {
                    return false;
                }
            }
            if !filter.tags.is_empty() && !tags_intersect(&t.tags, &filter.tags) {
                return false;
            }
            if let Some(st) = filter.status {
                if t.status != st {
                    return false;
                }
            }
            if let Some(s) = window.0 {
                if t.transaction_date < s {
                    return false;
                }
            }
            if let Some(e) = window.1 {
                if t.transaction_date > e {
                    return false;
                }
            }
            if let Some(re) = &search {
                let in_name = re.is_match(&t.name);
                let in_notes = t.notes.as_deref().is_some_and(|n| re.is_match(n));
                if !in_name && !in_notes {
                    return false;
                }
            }
            true
        })
        .collect();

    // With no sort field the listing reads newest-first; an explicit field
    // sorts ascending unless told otherwise. Stable sort keeps ties in input
    // order.
    let (field, order) = match filter.sort_by {
        Some(f) => (f, filter.sort_order.unwrap_or(SortOrder::Asc)),
        None => (SortField::Date, SortOrder::Desc),
    };
    hits.sort_by(|a, b| {
        let ord = match field {
            SortField::Date => a.transaction_date.cmp(&b.transaction_date),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Name => a.name.cmp(&b.name),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    // A page past the end is an empty slice, not an error.
    let skip = (page - 1).saturating_mul(limit);
    Ok(hits.into_iter().skip(skip).take(limit).collect())
}
