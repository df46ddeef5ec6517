// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the monotonic range search.

use super::RpcError;
use crate::search::Point;

/// Errors that can occur while bracketing a target value.
///
/// All variants are deterministic functions of the sampled data except
/// [`SearchError::Rpc`]; retrying a search without fresh points reproduces
/// the same outcome.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The target lies outside the values spanned by the seed bracket.
    ///
    /// When the seed comes from the provider this means the target precedes
    /// the first usable block or follows the latest block.
    #[error("Target {target} is out of bounds for points {lower}-{upper}")]
    OutOfBounds {
        /// The value being searched for
        target: i64,
        /// Lower end of the bracket the target was checked against
        lower: Point,
        /// Upper end of the bracket the target was checked against
        upper: Point,
    },

    /// Two points with increasing block numbers have values that fail to
    /// increase where strict growth is required.
    ///
    /// This indicates an inconsistent data source (for example a reorg that
    /// reordered timestamps) and is never recoverable by retrying.
    #[error("Values must increase strictly with block number, got {first} then {second}")]
    MonotonicityViolation {
        /// The point with the smaller block number
        first: Point,
        /// The point with the larger block number
        second: Point,
    },

    /// The provider failed to supply a point.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl SearchError {
    /// Create an `OutOfBounds` error.
    pub fn out_of_bounds(target: i64, lower: Point, upper: Point) -> Self {
        SearchError::OutOfBounds {
            target,
            lower,
            upper,
        }
    }

    /// Create a `MonotonicityViolation` error.
    pub fn monotonicity_violation(first: Point, second: Point) -> Self {
        SearchError::MonotonicityViolation { first, second }
    }

    /// Returns true if the target fell outside the known data.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, SearchError::OutOfBounds { .. })
    }
}
