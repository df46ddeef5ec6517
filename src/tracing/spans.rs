// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for blockdate operations.
//!
//! Telemetry concerns are kept apart from business logic: instead of using
//! `#[instrument]` attributes, each instrumented operation has a corresponding
//! span helper here. Spans are attached to futures with
//! [`tracing::Instrument`] so that instrumented futures stay `Send`.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&mut self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use alloy_chains::NamedChain;
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, BlockNumber};
use chrono::NaiveDate;
use tracing::Span;

/// Create span for a single block header query.
///
/// Parent: bounds_for span
#[inline]
pub(crate) fn get_block_point(block: BlockNumberOrTag) -> Span {
    tracing::trace_span!("blockdate.get_block_point", block = %block)
}

/// Create span for bracketing one target timestamp.
///
/// Parent: resolve_timestamp_range span
/// Children: get_block_point spans (seeding and estimates)
#[inline]
pub(crate) fn bounds_for(target_ts: i64, cached_points: usize) -> Span {
    tracing::debug_span!(
        "blockdate.bounds_for",
        target_ts = target_ts,
        cached_points = cached_points,
    )
}

/// Create span for resolving a timestamp interval to a block range.
///
/// Parent: resolve_date span, or none when called directly
/// Children: bounds_for spans (one per interval end)
#[inline]
pub(crate) fn resolve_timestamp_range(chain: Option<NamedChain>, start_ts: i64, end_ts: i64) -> Span {
    tracing::debug_span!(
        "blockdate.resolve_timestamp_range",
        chain_id = chain.map(|c| c as u64),
        start_ts = start_ts,
        end_ts = end_ts,
    )
}

/// Create span for resolving a UTC date to a block range.
///
/// Parent: resolve_dates span, or none when called directly
/// Children: resolve_timestamp_range span
#[inline]
pub(crate) fn resolve_date(chain: Option<NamedChain>, date: NaiveDate) -> Span {
    tracing::info_span!(
        "blockdate.resolve_date",
        chain_id = chain.map(|c| c as u64),
        date = %date,
    )
}

/// Create span for resolving a run of dates into mapping rows.
///
/// Parent: None (root span for this operation)
/// Children: resolve_date spans
#[inline]
pub(crate) fn resolve_dates(chain: Option<NamedChain>, dates: usize) -> Span {
    tracing::info_span!(
        "blockdate.resolve_dates",
        chain_id = chain.map(|c| c as u64),
        dates = dates,
    )
}

/// Create span for locating the block a contract was deployed in.
///
/// Parent: None (root span for this operation)
/// Children: has_code_at spans
#[inline]
pub(crate) fn find_deployment_block(address: Address, latest_block: Option<BlockNumber>) -> Span {
    tracing::info_span!(
        "blockdate.find_deployment_block",
        address = %address,
        latest_block = latest_block,
    )
}

/// Create span for one code presence lookup.
///
/// Parent: find_deployment_block span
#[inline]
pub(crate) fn has_code_at(address: Address, block_number: BlockNumber) -> Span {
    tracing::trace_span!(
        "blockdate.has_code_at",
        address = %address,
        block_number = block_number,
    )
}
