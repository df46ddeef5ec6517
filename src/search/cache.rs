// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-session cache of sampled points.
//!
//! The cache is an append-only list in insertion order. It is never
//! deduplicated and never shrinks; the number of points stays small because
//! each search only adds a handful of samples per iteration.

use super::point::{Bracket, Point};

/// Append-only collection of points observed during one search session.
#[derive(Debug, Clone, Default)]
pub struct SearchCache {
    points: Vec<Point>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a point. Duplicates are kept.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Finds the first adjacent pair of cached points bracketing `target`.
    pub fn find_bracket(&self, target: i64) -> Option<Bracket> {
        best_bracket(target, &self.points)
    }
}

/// Sorts `points` by value and returns the first adjacent pair `(p, q)` with
/// `p.y <= target <= q.y`.
///
/// Ties on value are ordered by block number so that, for consistent data,
/// the returned pair also has non-decreasing block numbers.
pub fn best_bracket(target: i64, points: &[Point]) -> Option<Bracket> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable_by_key(|point| (point.y, point.x));

    sorted
        .windows(2)
        .find(|pair| pair[0].y <= target && target <= pair[1].y)
        .map(|pair| Bracket::new(pair[0], pair[1]))
}
