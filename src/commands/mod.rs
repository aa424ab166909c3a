// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod teachers;
pub mod packages;
pub mod sessions;
pub mod transactions;
pub mod dashboard;
pub mod exporter;
pub mod doctor;
