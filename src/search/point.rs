// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sampled points and the brackets built from them.

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sample of the block timestamp function: block `x` was produced at `y`.
///
/// Across all points of a chain, a larger `x` never has a smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Block number
    pub x: BlockNumber,
    /// Block timestamp in seconds
    pub y: i64,
}

impl Point {
    pub const fn new(x: BlockNumber, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A pair of points bounding a target value from below and above.
///
/// A bracket is *exact* when both ends are the same block, and *tight* when
/// the ends are at most one block apart. Block numbers are integers, so a
/// tight bracket cannot be narrowed further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub lower: Point,
    pub upper: Point,
}

impl Bracket {
    pub const fn new(lower: Point, upper: Point) -> Self {
        Self { lower, upper }
    }

    /// A bracket whose both ends are `point`.
    pub const fn exact(point: Point) -> Self {
        Self {
            lower: point,
            upper: point,
        }
    }

    /// Returns true if both ends are the same block.
    pub fn is_exact(&self) -> bool {
        self.lower.x == self.upper.x
    }

    /// Returns true if the ends are adjacent or equal blocks.
    pub fn is_tight(&self) -> bool {
        self.width() <= 1
    }

    /// Number of blocks between the two ends.
    pub fn width(&self) -> u64 {
        self.upper.x.abs_diff(self.lower.x)
    }

    /// Returns true if `target` lies within the values of the two ends.
    pub fn contains(&self, target: i64) -> bool {
        self.lower.y <= target && target <= self.upper.y
    }

    /// The `(lower, upper)` block numbers.
    pub fn block_bounds(&self) -> (BlockNumber, BlockNumber) {
        (self.lower.x, self.upper.x)
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
