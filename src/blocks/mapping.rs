// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rows for a date-ordered block mapping table.
//!
//! A mapping table records, for each UTC day, the first and last block
//! produced on it. Keeping it current means resolving every day after the
//! last recorded one, which [`DateRangeResolver::resolve_pending_rows`] does
//! on a single search session.

use alloy_primitives::BlockNumber;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::{DailyBlockWindow, DateRangeResolver};
use crate::errors::BlockRangeError;
use crate::search::BlockDataProvider;

/// One row of the block mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDateRow {
    pub date: NaiveDate,
    pub starting_block: BlockNumber,
    pub ending_block: BlockNumber,
}

impl From<&DailyBlockWindow> for BlockDateRow {
    fn from(window: &DailyBlockWindow) -> Self {
        Self {
            date: window.date,
            starting_block: window.start_block,
            ending_block: window.end_block,
        }
    }
}

impl From<DailyBlockWindow> for BlockDateRow {
    fn from(window: DailyBlockWindow) -> Self {
        Self::from(&window)
    }
}

/// Dates strictly after `last_recorded` up to and including `through`.
///
/// Empty when `through <= last_recorded`.
pub fn pending_dates(last_recorded: NaiveDate, through: NaiveDate) -> Vec<NaiveDate> {
    last_recorded
        .iter_days()
        .skip(1)
        .take_while(|date| *date <= through)
        .collect()
}

impl<B: BlockDataProvider> DateRangeResolver<B> {
    /// Resolves every date missing from a mapping table last updated on
    /// `last_recorded`, through `through` inclusive.
    ///
    /// Rows come back in ascending date order. A `through` date that has not
    /// fully elapsed on chain fails with an out-of-bounds error, so callers
    /// usually pass yesterday.
    pub async fn resolve_pending_rows(
        &mut self,
        last_recorded: NaiveDate,
        through: NaiveDate,
    ) -> Result<Vec<BlockDateRow>, BlockRangeError> {
        let dates = pending_dates(last_recorded, through);
        if dates.is_empty() {
            return Ok(Vec::new());
        }
        let windows = self.resolve_dates(&dates).await?;
        Ok(windows.iter().map(BlockDateRow::from).collect())
    }
}
