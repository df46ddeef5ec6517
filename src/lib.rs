// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Resolve UTC dates and timestamp intervals to EVM block ranges
//!
//! Block timestamps grow with block number but can only be read one block at a
//! time over RPC. This crate brackets a timestamp between adjacent blocks with
//! an interpolation search that typically needs a handful of
//! `eth_getBlockByNumber` calls, caching every sampled block for the rest of
//! the session.
//!
//! # Main components
//!
//! - [`MonotonicRangeSearch`] - brackets a value of a monotonic block function
//! - [`DateRangeResolver`] - maps UTC days and timestamp intervals to [`BlockRange`]s
//! - [`AlloyBlockDataProvider`] - serves block timestamps from any alloy provider
//! - [`DeploymentBlockFinder`] - finds the block a contract was deployed in
//!
//! # Example
//!
//! ```rust,ignore
//! use blockdate::{create_http_provider, AlloyBlockDataProvider, DateRangeResolver};
//! use alloy_network::AnyNetwork;
//! use chrono::NaiveDate;
//!
//! let provider = create_http_provider("https://eth.llamarpc.com")?;
//! let mut resolver =
//!     DateRangeResolver::new(AlloyBlockDataProvider::<_, AnyNetwork>::new(provider));
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let window = resolver.resolve_date(date).await?;
//! println!("{window}");
//! ```

pub mod blocks;
pub mod config;
pub mod errors;
pub mod provider;
pub mod search;
mod tracing;

pub use blocks::{
    pending_dates, AlloyBlockDataProvider, BlockDateRow, BlockRange, ContractCodeProvider,
    DailyBlockWindow, DateRangeResolver, DeploymentBlockFinder, UnixTimestamp,
};
pub use config::{ResolverConfig, ResolverConfigBuilder};
pub use errors::{BlockDateError, BlockRangeError, DeploymentSearchError, RpcError, SearchError};
pub use provider::{create_http_provider, AnyHttpProvider};
pub use search::{
    best_bracket, BlockDataProvider, Bracket, MonotonicRangeSearch, Point, SearchCache,
    SearchStats,
};
