// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for blockdate integration tests
//!
//! Provides synthetic chains implementing [`BlockDataProvider`] so the search
//! and resolver can be exercised without a real blockchain connection.

#![allow(dead_code)]

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::BlockNumber;
use async_trait::async_trait;
use blockdate::{BlockDataProvider, Point, RpcError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// 2023-12-29T00:00:00Z
pub const DEC_29_2023: i64 = 1_703_808_000;

type TimestampFn = Box<dyn Fn(BlockNumber) -> Option<i64> + Send + Sync>;

/// Chain whose block timestamps are computed on demand
///
/// Serves blocks `first..=last`; `first_point` returns `first`, so pass `1` to
/// mirror a chain whose genesis block is excluded. Every query is counted.
///
/// # Example
///
/// ```rust,ignore
/// // Block x has timestamp 1000 * x for x in [1, 1000]
/// let chain = SyntheticChain::linear(1, 1_000, 1_000);
/// let mut search = MonotonicRangeSearch::new(chain);
/// ```
pub struct SyntheticChain {
    first: BlockNumber,
    last: BlockNumber,
    timestamp: TimestampFn,
    queries: AtomicU64,
}

impl SyntheticChain {
    /// Chain with timestamps from `timestamp`
    pub fn new<F>(first: BlockNumber, last: BlockNumber, timestamp: F) -> Self
    where
        F: Fn(BlockNumber) -> i64 + Send + Sync + 'static,
    {
        Self {
            first,
            last,
            timestamp: Box::new(move |x| Some(timestamp(x))),
            queries: AtomicU64::new(0),
        }
    }

    /// Chain where block `x` has timestamp `seconds_per_block * x`
    pub fn linear(first: BlockNumber, last: BlockNumber, seconds_per_block: i64) -> Self {
        Self::new(first, last, move |x| x as i64 * seconds_per_block)
    }

    /// Post-merge style chain starting at 2023-12-29T00:00:00Z
    ///
    /// Blocks are 12 seconds apart, and every tenth block follows a missed
    /// slot, so block times are close to but not exactly uniform.
    pub fn mainnet_like(last: BlockNumber) -> Self {
        Self::new(1, last, mainnet_like_timestamp)
    }

    /// Chain serving exactly the given `(block, timestamp)` points
    ///
    /// Blocks missing from the table fail with [`RpcError::BlockNotFound`].
    pub fn from_points(points: &[(BlockNumber, i64)]) -> Self {
        let table: BTreeMap<BlockNumber, i64> = points.iter().copied().collect();
        let first = *table.keys().next().expect("at least one point");
        let last = *table.keys().next_back().expect("at least one point");
        Self {
            first,
            last,
            timestamp: Box::new(move |x| table.get(&x).copied()),
            queries: AtomicU64::new(0),
        }
    }

    /// Number of points served so far
    pub fn queries(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    pub fn timestamp_of(&self, x: BlockNumber) -> Option<i64> {
        (self.timestamp)(x)
    }

    /// Brute-force reference: first block at or after `start_ts` and last
    /// block at or before `end_ts`
    pub fn scan_range(&self, start_ts: i64, end_ts: i64) -> (BlockNumber, BlockNumber) {
        let blocks = move || {
            (self.first..=self.last).filter_map(move |x| self.timestamp_of(x).map(|y| (x, y)))
        };
        let start = blocks()
            .find(|&(_, y)| y >= start_ts)
            .map(|(x, _)| x)
            .expect("start within chain");
        let end = blocks()
            .filter(|&(_, y)| y <= end_ts)
            .map(|(x, _)| x)
            .last()
            .expect("end within chain");
        (start, end)
    }

    fn point(&self, x: BlockNumber) -> Result<Point, RpcError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if x < self.first || x > self.last {
            return Err(RpcError::BlockNotFound {
                block: BlockNumberOrTag::Number(x),
            });
        }
        self.timestamp_of(x)
            .map(|y| Point::new(x, y))
            .ok_or(RpcError::BlockNotFound {
                block: BlockNumberOrTag::Number(x),
            })
    }
}

#[async_trait]
impl BlockDataProvider for SyntheticChain {
    async fn first_point(&self) -> Result<Point, RpcError> {
        self.point(self.first)
    }

    async fn last_point(&self) -> Result<Point, RpcError> {
        self.point(self.last)
    }

    async fn point_at(&self, x: BlockNumber) -> Result<Point, RpcError> {
        self.point(x)
    }
}

fn mainnet_like_timestamp(x: BlockNumber) -> i64 {
    let x = x as i64;
    DEC_29_2023 + 12 * x + 12 * (x / 10)
}
