// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the blockdate library.
//!
//! This module provides strongly-typed errors for all public APIs in blockdate.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`SearchError`,
//!   `BlockRangeError`, etc.)
//! - **Unified error type** (`BlockDateError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`SearchError`] - Errors from bracketing a timestamp between blocks
//! - [`BlockRangeError`] - Errors from resolving dates and intervals to block ranges
//! - [`DeploymentSearchError`] - Errors from contract deployment block lookups
//!
//! Additionally, [`RpcError`] provides shared error variants for blockchain RPC operations.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockdate::{BlockDateError, DateRangeResolver};
//! use chrono::NaiveDate;
//!
//! async fn example() -> Result<(), BlockDateError> {
//!     let mut resolver = DateRangeResolver::new(block_source);
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//!     let window = resolver.resolve_date(date).await?;
//!     // Errors automatically convert to BlockDateError via From implementations
//!     Ok(())
//! }
//! ```

mod blocks;
mod deployment;
mod rpc;
mod search;

pub use blocks::BlockRangeError;
pub use deployment::DeploymentSearchError;
pub use rpc::RpcError;
pub use search::SearchError;

/// Unified error type for all blockdate operations.
///
/// All module-specific error types automatically convert to `BlockDateError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum BlockDateError {
    /// Error from bracketing a value between blocks.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Error from block range resolution.
    #[error("Block range error: {0}")]
    BlockRange(#[from] BlockRangeError),

    /// Error from deployment block lookups.
    #[error("Deployment search error: {0}")]
    Deployment(#[from] DeploymentSearchError),

    /// Error from provider construction or queries outside a search.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}
