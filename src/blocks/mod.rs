// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Date and block range resolution against a live chain.
//!
//! This module provides functionality for:
//! - Resolving UTC dates and timestamp intervals to block ranges
//! - Producing rows for a date-ordered block mapping table
//! - Locating the block a contract was deployed in
//! - Serving block points from an alloy provider

pub mod deployment;
pub mod mapping;
pub mod rpc;
pub mod window;

// Re-export public API
pub use deployment::{ContractCodeProvider, DeploymentBlockFinder};
pub use mapping::{pending_dates, BlockDateRow};
pub use rpc::AlloyBlockDataProvider;
pub use window::{BlockRange, DailyBlockWindow, DateRangeResolver, UnixTimestamp};
