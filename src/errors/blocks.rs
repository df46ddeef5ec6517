// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block range resolution.
//!
//! This module provides error types for operations in the `blocks` module,
//! particularly for mapping dates and timestamp intervals to block ranges.

use alloy_primitives::BlockNumber;
use chrono::NaiveDate;

use super::SearchError;
use crate::blocks::window::UnixTimestamp;

/// Errors that can occur while resolving a date or timestamp interval to a
/// block range.
///
/// # Examples
///
/// ```rust,ignore
/// use blockdate::{BlockRangeError, DateRangeResolver};
/// use chrono::NaiveDate;
///
/// let mut resolver = DateRangeResolver::new(block_source);
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
///
/// match resolver.resolve_date(date).await {
///     Ok(window) => println!("{window}"),
///     Err(e) if e.is_out_of_bounds() => {
///         eprintln!("Day is not fully produced yet, try again later: {e}");
///     }
///     Err(BlockRangeError::NoBlocksInRange { .. }) => {
///         eprintln!("No block was produced during {date}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BlockRangeError {
    /// The interval start is after its end.
    #[error("Invalid timestamp range: start {start} is after end {end}")]
    InvalidTimestampRange {
        /// Requested start of the interval
        start: UnixTimestamp,
        /// Requested end of the interval
        end: UnixTimestamp,
    },

    /// Both interval ends fall between the same pair of adjacent blocks, so
    /// no block was produced inside the interval.
    #[error("Timestamp range {start}-{end} does not cover any blocks")]
    NoBlocksInRange {
        /// Requested start of the interval
        start: UnixTimestamp,
        /// Requested end of the interval
        end: UnixTimestamp,
    },

    /// Invalid block range calculated.
    #[error("Invalid block range: {start_block}-{end_block}")]
    InvalidRange {
        /// First block of the range
        start_block: BlockNumber,
        /// Last block of the range
        end_block: BlockNumber,
    },

    /// A calendar date could not be converted to UTC timestamps.
    #[error("Date {date} cannot be converted to a UTC timestamp")]
    InvalidDate {
        /// The date that failed to convert
        date: NaiveDate,
    },

    /// Bracketing one end of the interval failed.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

impl BlockRangeError {
    /// Create an `InvalidRange` error.
    pub fn invalid_range(start_block: BlockNumber, end_block: BlockNumber) -> Self {
        BlockRangeError::InvalidRange {
            start_block,
            end_block,
        }
    }

    /// Returns true if the interval end lies beyond the latest known block.
    ///
    /// Callers usually treat this as "try again later", once more blocks have
    /// been produced.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, BlockRangeError::Search(e) if e.is_out_of_bounds())
    }
}
