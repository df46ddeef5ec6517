// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block range resolution for mapping UTC dates to blockchain block ranges
//!
//! This module provides tools for calculating which blockchain blocks correspond to
//! a specific UTC date or timestamp interval. This is useful for analyzing blockchain
//! data by date rather than by block number.
//!
//! # Caching
//!
//! Every block sampled while resolving is kept for the lifetime of the resolver
//! and used to seed later searches, so resolving consecutive days on the same
//! resolver costs far fewer RPC calls than resolving each day from scratch.
//! Nothing is persisted across runs.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockdate::{AlloyBlockDataProvider, DateRangeResolver};
//! use alloy_provider::ProviderBuilder;
//! use chrono::NaiveDate;
//!
//! let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
//! let mut resolver = DateRangeResolver::new(AlloyBlockDataProvider::new(provider));
//!
//! let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
//! let window = resolver.resolve_date(date).await?;
//!
//! println!("Blocks for {}: [{}, {}]", date, window.start_block, window.end_block);
//! ```

use alloy_primitives::BlockNumber;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn, Instrument};

use crate::config::constants::{GENESIS_BLOCK, LAST_SECOND_OF_DAY};
use crate::config::ResolverConfig;
use crate::errors::BlockRangeError;
use crate::search::{BlockDataProvider, MonotonicRangeSearch};
use crate::tracing::spans;

/// Unix timestamp in seconds (always UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(pub i64);

impl UnixTimestamp {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    /// Returns the first and last whole seconds of `date` in UTC.
    ///
    /// The end is 23:59:59.999999 truncated to whole seconds.
    pub fn day_bounds(date: NaiveDate) -> Result<(Self, Self), BlockRangeError> {
        let start_dt = Utc
            .with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0)
            .single()
            .ok_or(BlockRangeError::InvalidDate { date })?;

        let end_dt = start_dt
            .checked_add_signed(TimeDelta::seconds(LAST_SECOND_OF_DAY))
            .ok_or(BlockRangeError::InvalidDate { date })?;

        Ok((Self::from_datetime(start_dt), Self::from_datetime(end_dt)))
    }
}

impl fmt::Display for UnixTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive range of block numbers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockRange {
    /// First block in the range (inclusive)
    pub start_block: BlockNumber,

    /// Last block in the range (inclusive)
    pub end_block: BlockNumber,
}

impl BlockRange {
    /// Creates a new block range, rejecting ranges that end before they start
    pub fn new(start_block: BlockNumber, end_block: BlockNumber) -> Result<Self, BlockRangeError> {
        if end_block < start_block {
            return Err(BlockRangeError::invalid_range(start_block, end_block));
        }
        Ok(Self {
            start_block,
            end_block,
        })
    }

    /// Returns the number of blocks in this range (inclusive)
    pub fn block_count(&self) -> u64 {
        self.end_block
            .saturating_sub(self.start_block)
            .saturating_add(1)
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start_block, self.end_block)
    }
}

/// Represents an inclusive block range for a specific UTC day on a blockchain
///
/// A daily window captures:
/// - The first block produced at or after 00:00:00 UTC on the given date
/// - The last block produced at or before 23:59:59 UTC on the given date
/// - The UTC timestamps that define the day boundaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBlockWindow {
    /// The UTC date
    pub date: NaiveDate,

    /// First block number in the window (inclusive)
    pub start_block: BlockNumber,

    /// Last block number in the window (inclusive)
    pub end_block: BlockNumber,

    /// UTC timestamp at start of day (00:00:00 UTC)
    pub start_ts: UnixTimestamp,

    /// UTC timestamp of the last second of the day (23:59:59 UTC)
    pub end_ts: UnixTimestamp,
}

impl DailyBlockWindow {
    /// Creates a new daily block window from a resolved range
    pub fn new(
        date: NaiveDate,
        range: BlockRange,
        start_ts: UnixTimestamp,
        end_ts: UnixTimestamp,
    ) -> Self {
        Self {
            date,
            start_block: range.start_block,
            end_block: range.end_block,
            start_ts,
            end_ts,
        }
    }

    pub fn block_range(&self) -> BlockRange {
        BlockRange {
            start_block: self.start_block,
            end_block: self.end_block,
        }
    }

    /// Returns the number of blocks in this window (inclusive)
    pub fn block_count(&self) -> u64 {
        self.block_range().block_count()
    }
}

impl fmt::Display for DailyBlockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.block_range())
    }
}

/// Resolves UTC dates and timestamp intervals to block ranges
///
/// The resolver owns one [`MonotonicRangeSearch`] session, so every block it
/// samples is reused by later calls on the same resolver. Calls take
/// `&mut self`; create one resolver per concurrent task.
///
/// # Examples
///
/// ```rust,ignore
/// use blockdate::{AlloyBlockDataProvider, DateRangeResolver, ResolverConfigBuilder};
/// use alloy_chains::NamedChain;
///
/// let config = ResolverConfigBuilder::new().chain(NamedChain::Mainnet).build();
/// let mut resolver =
///     DateRangeResolver::with_config(AlloyBlockDataProvider::new(provider), config);
///
/// let range = resolver
///     .resolve_timestamp_range(UnixTimestamp(1_700_000_000), UnixTimestamp(1_700_003_600))
///     .await?;
/// println!("Blocks: {range}");
/// ```
#[derive(Debug)]
pub struct DateRangeResolver<B> {
    search: MonotonicRangeSearch<B>,
    config: ResolverConfig,
}

impl<B: BlockDataProvider> DateRangeResolver<B> {
    /// Creates a resolver with the default configuration
    pub fn new(provider: B) -> Self {
        Self::with_config(provider, ResolverConfig::default())
    }

    /// Creates a resolver with an explicit configuration
    pub fn with_config(provider: B, config: ResolverConfig) -> Self {
        Self {
            search: MonotonicRangeSearch::new(provider),
            config,
        }
    }

    /// The configuration this resolver was built with
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The underlying search session, for its cache and statistics
    pub fn search(&self) -> &MonotonicRangeSearch<B> {
        &self.search
    }

    /// Resolves the blocks produced during `date` (UTC)
    ///
    /// # Errors
    ///
    /// See [`resolve_timestamp_range`](Self::resolve_timestamp_range). In
    /// particular a day that has not fully elapsed on chain yet fails with an
    /// out-of-bounds error (check [`BlockRangeError::is_out_of_bounds`]).
    pub async fn resolve_date(&mut self, date: NaiveDate) -> Result<DailyBlockWindow, BlockRangeError> {
        let span = spans::resolve_date(self.config.chain, date);
        async move {
            let (start_ts, end_ts) = UnixTimestamp::day_bounds(date)?;
            let range = self.resolve_timestamp_range(start_ts, end_ts).await?;
            let window = DailyBlockWindow::new(date, range, start_ts, end_ts);

            info!(
                date = %date,
                start_block = window.start_block,
                end_block = window.end_block,
                block_count = window.block_count(),
                provider_queries = self.search.stats().provider_queries,
                "Resolved daily block window"
            );
            Ok(window)
        }
        .instrument(span)
        .await
    }

    /// Resolves the blocks whose timestamps fall within `[start_ts, end_ts]`
    ///
    /// - A start before the first usable block resolves to genesis.
    /// - A start resolving to the provider's first usable block is widened to
    ///   genesis when [`ResolverConfig::include_genesis`] is set, unless the
    ///   provider serves genesis itself.
    ///
    /// # Errors
    ///
    /// - [`BlockRangeError::InvalidTimestampRange`] if `start_ts > end_ts`
    /// - [`BlockRangeError::NoBlocksInRange`] if no block was produced in the interval
    /// - [`BlockRangeError::Search`] if the end lies beyond the latest block
    ///   (out of bounds), timestamps are inconsistent, or the provider fails
    pub async fn resolve_timestamp_range(
        &mut self,
        start_ts: UnixTimestamp,
        end_ts: UnixTimestamp,
    ) -> Result<BlockRange, BlockRangeError> {
        let span = spans::resolve_timestamp_range(self.config.chain, start_ts.0, end_ts.0);
        async move {
            if start_ts > end_ts {
                return Err(BlockRangeError::InvalidTimestampRange {
                    start: start_ts,
                    end: end_ts,
                });
            }

            let start_bounds = match self.search.bounds_for(start_ts.0).await {
                Ok(bracket) => bracket.block_bounds(),
                Err(e) if e.is_out_of_bounds() => {
                    warn!(
                        start_ts = %start_ts,
                        error = %e,
                        "Range starts before the first usable block, starting at genesis"
                    );
                    (GENESIS_BLOCK, GENESIS_BLOCK)
                }
                Err(e) => return Err(e.into()),
            };

            let end_bounds = self.search.bounds_for(end_ts.0).await?.block_bounds();

            debug!(?start_bounds, ?end_bounds, "Bracketed range ends");

            if start_bounds == end_bounds && start_bounds.0 != start_bounds.1 {
                return Err(BlockRangeError::NoBlocksInRange {
                    start: start_ts,
                    end: end_ts,
                });
            }

            let start_block = self
                .config
                .effective_start_block(start_bounds.1, self.search.first_block());
            let end_block = end_bounds.0;
            BlockRange::new(start_block, end_block)
        }
        .instrument(span)
        .await
    }

    /// Resolves each of `dates` in ascending order, sharing this resolver's cache
    ///
    /// Duplicate dates are resolved once. Stops at the first failure.
    pub async fn resolve_dates(
        &mut self,
        dates: &[NaiveDate],
    ) -> Result<Vec<DailyBlockWindow>, BlockRangeError> {
        let mut ordered = dates.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let span = spans::resolve_dates(self.config.chain, ordered.len());
        async move {
            let mut windows = Vec::with_capacity(ordered.len());
            for date in ordered {
                windows.push(self.resolve_date(date).await?);
            }
            info!(
                windows = windows.len(),
                stats = %self.search.stats(),
                "Resolved daily block windows"
            );
            Ok(windows)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let (start, end) = UnixTimestamp::day_bounds(date).unwrap();
        assert_eq!(start, UnixTimestamp(1_704_067_200));
        assert_eq!(end, UnixTimestamp(1_704_067_200 + 86_399));
    }

    #[test]
    fn test_day_bounds_before_epoch() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        let (start, end) = UnixTimestamp::day_bounds(date).unwrap();
        assert_eq!(start, UnixTimestamp(-86_400));
        assert_eq!(end, UnixTimestamp(-1));
    }

    #[test]
    fn test_block_range_validation() {
        let range = BlockRange::new(1000, 2000).unwrap();
        assert_eq!(range.block_count(), 1001);
        assert_eq!(range.to_string(), "[1000, 2000]");

        let single = BlockRange::new(1000, 1000).unwrap();
        assert_eq!(single.block_count(), 1);

        let invalid = BlockRange::new(2000, 1000);
        assert!(invalid
            .unwrap_err()
            .to_string()
            .contains("Invalid block range"));
    }

    #[test]
    fn test_block_count_overflow_protection() {
        // Near u64::MAX (should use saturating arithmetic)
        let range = BlockRange::new(0, u64::MAX).unwrap();
        assert_eq!(range.block_count(), u64::MAX);
    }

    #[test]
    fn test_daily_window_display() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let (start_ts, end_ts) = UnixTimestamp::day_bounds(date).unwrap();
        let window = DailyBlockWindow::new(
            date,
            BlockRange::new(100_000_000, 100_040_000).unwrap(),
            start_ts,
            end_ts,
        );
        assert_eq!(window.to_string(), "2025-10-15: [100000000, 100040000]");
        // Arbitrum produces ~40k blocks per day
        assert_eq!(window.block_count(), 40_001);
    }
}
