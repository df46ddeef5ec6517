// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Interpolation search over a monotonic, expensive-to-sample function.
//!
//! # Algorithm
//!
//! Each iteration starts from a bracket `(start, end)` around the target:
//!
//! 1. A first estimate is interpolated between `start` and `end` and clamped
//!    strictly inside the bracket.
//! 2. If that estimate falls below the target, the function is locally
//!    concave, so a second estimate is extrapolated along `start -> e1`
//!    (it likely lands above the target). Otherwise it is extrapolated along
//!    `e1 -> end` (likely below). The second estimate is clamped inside the
//!    outer bracket as well.
//! 3. The tightest bracket among `{start, e1, e2, end}` becomes the next
//!    bracket.
//!
//! When an iteration leaves more than half of the bracket, the next one
//! bisects instead: it samples the midpoint, then the midpoint of the half
//! holding the target.
//!
//! The bracket strictly narrows every iteration. On nearly linear data
//! (block times close to constant) this needs `O(log log n)` samples on
//! average. On skewed data every halving of the initial span costs at most
//! two samples.

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, Instrument};

use super::cache::{best_bracket, SearchCache};
use super::interpolate::{clamp_inside, interpolate};
use super::point::{Bracket, Point};
use super::provider::BlockDataProvider;
use crate::errors::SearchError;
use crate::tracing::spans;

/// Counters for one search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of points requested from the provider
    pub provider_queries: u64,
    /// Searches whose seed bracket came from the cache
    pub cache_seeded: u64,
    /// Searches that had to seed from the first and last points
    pub provider_seeded: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provider_queries={}, cache_seeded={}, provider_seeded={}",
            self.provider_queries, self.cache_seeded, self.provider_seeded
        )
    }
}

/// Brackets target values of a monotonic `block -> timestamp` function.
///
/// Every point sampled from the provider is kept in the session's
/// [`SearchCache`] and reused to seed later searches, so repeated or nearby
/// targets get cheaper over the lifetime of the session.
///
/// Searches take `&mut self`: a session must not be used by several callers
/// at once. Run independent sessions (each with its own cache) to search in
/// parallel; they can share one provider through an `Arc`.
///
/// # Examples
///
/// ```rust,ignore
/// use blockdate::{AlloyBlockDataProvider, MonotonicRangeSearch};
///
/// let mut search = MonotonicRangeSearch::new(AlloyBlockDataProvider::new(provider));
/// let bracket = search.bounds_for(1_700_000_000).await?;
/// println!("Timestamp falls within blocks {:?}", bracket.block_bounds());
/// ```
#[derive(Debug)]
pub struct MonotonicRangeSearch<B> {
    provider: B,
    cache: SearchCache,
    stats: SearchStats,
    first_block: Option<BlockNumber>,
}

impl<B: BlockDataProvider> MonotonicRangeSearch<B> {
    /// Creates a session with an empty cache.
    pub fn new(provider: B) -> Self {
        Self {
            provider,
            cache: SearchCache::new(),
            stats: SearchStats::default(),
            first_block: None,
        }
    }

    /// The data source this session samples from.
    pub fn provider(&self) -> &B {
        &self.provider
    }

    /// Points sampled so far in this session.
    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Query and seeding counters for this session.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Block number of the provider's first usable point, once it has been
    /// sampled in this session.
    pub fn first_block(&self) -> Option<BlockNumber> {
        self.first_block
    }

    /// Returns the tightest bracket around `target`.
    ///
    /// The result is either exact (`lower.x == upper.x`, the target equals a
    /// block's timestamp) or spans two adjacent blocks.
    ///
    /// The seed bracket comes from the cache when possible. Otherwise the
    /// first and last points are fetched, and a target outside them fails
    /// with [`SearchError::OutOfBounds`].
    ///
    /// # Errors
    ///
    /// - [`SearchError::OutOfBounds`] if the target precedes the first usable
    ///   block or follows the latest block
    /// - [`SearchError::MonotonicityViolation`] if sampled timestamps do not
    ///   grow with block number
    /// - [`SearchError::Rpc`] if the provider fails
    pub async fn bounds_for(&mut self, target: i64) -> Result<Bracket, SearchError> {
        let span = spans::bounds_for(target, self.cache.len());
        async move {
            let seed = match self.cache.find_bracket(target) {
                Some(seed) => {
                    self.stats.cache_seeded += 1;
                    debug!(seed = %seed, "Seeded search from cache");
                    seed
                }
                None => {
                    self.stats.provider_seeded += 1;
                    let first = self.first_point().await?;
                    let last = self.last_point().await?;
                    debug!(first = %first, last = %last, "Seeded search from provider");
                    Bracket::new(first, last)
                }
            };
            self.refine(target, seed).await
        }
        .instrument(span)
        .await
    }

    /// Narrows the caller supplied bracket `(lower, upper)` around `target`.
    ///
    /// Unlike [`bounds_for`](Self::bounds_for) the seed is not looked up, so
    /// a target outside the given points fails with
    /// [`SearchError::OutOfBounds`] even if the chain extends further.
    pub async fn bounds_within(
        &mut self,
        target: i64,
        lower: Point,
        upper: Point,
    ) -> Result<Bracket, SearchError> {
        let span = spans::bounds_for(target, self.cache.len());
        self.refine(target, Bracket::new(lower, upper))
            .instrument(span)
            .await
    }

    /// Runs refinement steps until the bracket is exact or tight.
    ///
    /// Each step samples two interpolated estimates. A step that fails to at
    /// least halve the bracket is followed by a bisection step, so every
    /// halving of the initial span costs at most two queries.
    async fn refine(&mut self, target: i64, seed: Bracket) -> Result<Bracket, SearchError> {
        let mut bracket = seed;
        let mut bisect = false;
        loop {
            let (start, end) = ordered(bracket)?;

            if target < start.y || target > end.y {
                return Err(SearchError::out_of_bounds(target, start, end));
            }
            if target == start.y {
                return Ok(Bracket::exact(start));
            }
            if target == end.y {
                return Ok(Bracket::exact(end));
            }
            let width = end.x - start.x;
            if width <= 1 {
                return Ok(Bracket::new(start, end));
            }

            let (e1, e2) = if bisect {
                self.bisect(target, start, end).await?
            } else {
                let (e1, e2) = self.estimate(target, start, end).await?;
                (e1, Some(e2))
            };

            let mut candidates = vec![start, e1, end];
            candidates.extend(e2);
            check_monotonic(&candidates)?;

            let next = best_bracket(target, &candidates)
                .ok_or_else(|| SearchError::monotonicity_violation(start, end))?;
            // Consistent data always narrows the bracket.
            if next.width() >= width {
                return Err(SearchError::monotonicity_violation(start, end));
            }

            debug!(
                target_ts = target,
                bisect,
                e1 = %e1,
                e2 = ?e2,
                next = %next,
                "Narrowed bracket"
            );
            bisect = next.width().saturating_mul(2) > width;
            bracket = next;
        }
    }

    /// Samples the interpolated estimate inside `(start, end)`, then a second
    /// estimate along the sub-bracket it selects.
    async fn estimate(
        &mut self,
        target: i64,
        start: Point,
        end: Point,
    ) -> Result<(Point, Point), SearchError> {
        let x1 = interpolate(start, end, target)
            .map(|estimate| clamp_inside(estimate, start.x, end.x))
            .ok_or_else(|| SearchError::monotonicity_violation(start, end))?;
        let e1 = self.point_at(x1).await?;

        let (a, b) = if e1.y < target { (start, e1) } else { (e1, end) };
        let x2 = interpolate(a, b, target)
            .map(|estimate| clamp_inside(estimate, start.x, end.x))
            .ok_or_else(|| SearchError::monotonicity_violation(a, b))?;
        let e2 = self.point_at(x2).await?;
        Ok((e1, e2))
    }

    /// Samples the midpoint of `(start, end)`, then the midpoint of the half
    /// holding `target` when that half still has interior blocks.
    async fn bisect(
        &mut self,
        target: i64,
        start: Point,
        end: Point,
    ) -> Result<(Point, Option<Point>), SearchError> {
        let m1 = self.point_at(midpoint(start.x, end.x)).await?;
        let (a, b) = if m1.y < target { (m1, end) } else { (start, m1) };
        if m1.y == target || b.x.saturating_sub(a.x) <= 1 {
            return Ok((m1, None));
        }
        let m2 = self.point_at(midpoint(a.x, b.x)).await?;
        Ok((m1, Some(m2)))
    }

    async fn first_point(&mut self) -> Result<Point, SearchError> {
        let point = self.provider.first_point().await?;
        self.first_block = Some(point.x);
        Ok(self.record(point))
    }

    async fn last_point(&mut self) -> Result<Point, SearchError> {
        let point = self.provider.last_point().await?;
        Ok(self.record(point))
    }

    async fn point_at(&mut self, x: BlockNumber) -> Result<Point, SearchError> {
        let point = self.provider.point_at(x).await?;
        Ok(self.record(point))
    }

    fn record(&mut self, point: Point) -> Point {
        trace!(point = %point, "Sampled point");
        self.stats.provider_queries += 1;
        self.cache.push(point);
        point
    }
}

fn midpoint(lower: BlockNumber, upper: BlockNumber) -> BlockNumber {
    lower + (upper - lower) / 2
}

/// Orders the bracket ends by block number and rejects ends whose values
/// decrease.
fn ordered(bracket: Bracket) -> Result<(Point, Point), SearchError> {
    let (start, end) = if bracket.lower.x <= bracket.upper.x {
        (bracket.lower, bracket.upper)
    } else {
        (bracket.upper, bracket.lower)
    };
    if start.y > end.y {
        return Err(SearchError::monotonicity_violation(start, end));
    }
    Ok((start, end))
}

/// Rejects any pair of points whose value decreases as the block number
/// grows, or that disagree on the value of the same block.
fn check_monotonic(points: &[Point]) -> Result<(), SearchError> {
    let mut by_block = points.to_vec();
    by_block.sort_unstable_by_key(|point| point.x);

    match by_block
        .windows(2)
        .find(|pair| pair[0].y > pair[1].y || (pair[0].x == pair[1].x && pair[0].y != pair[1].y))
    {
        Some(pair) => Err(SearchError::monotonicity_violation(pair[0], pair[1])),
        None => Ok(()),
    }
}
