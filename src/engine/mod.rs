// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over already-loaded records. Nothing in here touches the
//! database or the terminal; commands fetch rows once, then reduce in memory.

pub mod dashboard;
pub mod filter;
pub mod payroll;
pub mod period;
pub mod profit;
pub mod summary;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
}
