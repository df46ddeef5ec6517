// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for DateRangeResolver
//!
//! Covers interval edge cases against a synthetic linear chain and full-day
//! resolution against a chain with realistic block times, checked against a
//! brute-force scan.

mod helpers;

use blockdate::{
    BlockDateRow, BlockRange, BlockRangeError, DateRangeResolver, ResolverConfigBuilder,
    UnixTimestamp,
};
use chrono::NaiveDate;
use helpers::SyntheticChain;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Block x has timestamp 1000 * x for x in [1, 1000]
fn linear_resolver() -> DateRangeResolver<SyntheticChain> {
    DateRangeResolver::new(SyntheticChain::linear(1, 1_000, 1_000))
}

// ============================================================================
// Timestamp interval edge cases
// ============================================================================

#[tokio::test]
async fn test_interval_between_adjacent_blocks_has_no_blocks() {
    let mut resolver = linear_resolver();

    let error = resolver
        .resolve_timestamp_range(UnixTimestamp(50_500), UnixTimestamp(50_999))
        .await
        .unwrap_err();

    assert!(
        matches!(error, BlockRangeError::NoBlocksInRange { .. }),
        "Expected NoBlocksInRange, got {error:?}"
    );
}

#[tokio::test]
async fn test_interval_starting_on_exact_block_timestamp() {
    let mut resolver = linear_resolver();

    let range = resolver
        .resolve_timestamp_range(UnixTimestamp(50_000), UnixTimestamp(51_999))
        .await
        .unwrap();

    assert_eq!(range, BlockRange::new(50, 51).unwrap());
}

#[tokio::test]
async fn test_interval_covering_single_block() {
    let mut resolver = linear_resolver();

    let range = resolver
        .resolve_timestamp_range(UnixTimestamp(50_500), UnixTimestamp(51_500))
        .await
        .unwrap();

    assert_eq!(range, BlockRange::new(51, 51).unwrap());
    assert_eq!(range.block_count(), 1);
}

#[tokio::test]
async fn test_range_starting_at_first_usable_block_includes_genesis() {
    let mut resolver = linear_resolver();

    let range = resolver
        .resolve_timestamp_range(UnixTimestamp(1_000), UnixTimestamp(5_500))
        .await
        .unwrap();
    assert_eq!(range, BlockRange::new(0, 5).unwrap());

    let config = ResolverConfigBuilder::new().include_genesis(false).build();
    let mut resolver =
        DateRangeResolver::with_config(SyntheticChain::linear(1, 1_000, 1_000), config);
    let range = resolver
        .resolve_timestamp_range(UnixTimestamp(1_000), UnixTimestamp(5_500))
        .await
        .unwrap();
    assert_eq!(range, BlockRange::new(1, 5).unwrap());
}

#[tokio::test]
async fn test_provider_serving_genesis_keeps_start_block() {
    // Genesis carries a real timestamp and is the provider's first point
    let chain = SyntheticChain::new(0, 1_000, |x| 1_000 + 1_000 * x as i64);
    let mut resolver = DateRangeResolver::new(chain);

    let range = resolver
        .resolve_timestamp_range(UnixTimestamp(1_500), UnixTimestamp(5_500))
        .await
        .unwrap();

    assert_eq!(resolver.search().first_block(), Some(0));
    assert_eq!(range, BlockRange::new(1, 4).unwrap());
}

#[tokio::test]
async fn test_start_before_first_block_resolves_to_genesis() {
    let mut resolver = linear_resolver();

    let range = resolver
        .resolve_timestamp_range(UnixTimestamp(0), UnixTimestamp(5_500))
        .await
        .unwrap();

    assert_eq!(range, BlockRange::new(0, 5).unwrap());
}

#[tokio::test]
async fn test_end_after_latest_block_is_out_of_bounds() {
    let mut resolver = linear_resolver();

    let error = resolver
        .resolve_timestamp_range(UnixTimestamp(990_000), UnixTimestamp(1_000_001))
        .await
        .unwrap_err();

    assert!(error.is_out_of_bounds(), "Expected out of bounds, got {error:?}");
}

#[tokio::test]
async fn test_inverted_interval_is_rejected_without_queries() {
    let mut resolver = linear_resolver();

    let error = resolver
        .resolve_timestamp_range(UnixTimestamp(2_000), UnixTimestamp(1_000))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        BlockRangeError::InvalidTimestampRange {
            start: UnixTimestamp(2_000),
            end: UnixTimestamp(1_000),
        }
    ));
    assert_eq!(resolver.search().provider().queries(), 0);
}

#[tokio::test]
async fn test_decreasing_timestamps_surface_as_search_error() {
    let chain = SyntheticChain::from_points(&[(1, 1_000), (2, 500), (3, 3_000)]);
    let mut resolver = DateRangeResolver::new(chain);

    let error = resolver
        .resolve_timestamp_range(UnixTimestamp(2_000), UnixTimestamp(2_500))
        .await
        .unwrap_err();

    assert!(
        matches!(error, BlockRangeError::Search(_)),
        "Expected a search error, got {error:?}"
    );
    assert!(!error.is_out_of_bounds());
}

// ============================================================================
// Daily resolution
// ============================================================================

#[tokio::test]
async fn test_resolve_date_matches_brute_force_scan() {
    let mut resolver = DateRangeResolver::new(SyntheticChain::mainnet_like(100_000));
    let day = date(2024, 1, 1);

    let window = resolver.resolve_date(day).await.unwrap();

    assert_eq!(window.date, day);
    assert_eq!(window.start_ts, UnixTimestamp(1_704_067_200));
    assert_eq!(window.end_ts, UnixTimestamp(1_704_067_200 + 86_399));

    let expected = resolver
        .search()
        .provider()
        .scan_range(window.start_ts.0, window.end_ts.0);
    assert_eq!((window.start_block, window.end_block), expected);

    // A day of 12-13 second blocks
    assert!(window.block_count() > 6_000 && window.block_count() < 7_300);
    assert!(
        resolver.search().stats().provider_queries < 50,
        "Interpolation should need few queries: {}",
        resolver.search().stats()
    );
}

#[tokio::test]
async fn test_resolve_date_of_chain_start_day() {
    let mut resolver = DateRangeResolver::new(SyntheticChain::mainnet_like(100_000));

    // The day starts before block 1 was produced
    let window = resolver.resolve_date(date(2023, 12, 29)).await.unwrap();

    assert_eq!(window.start_block, 0);
    let (_, expected_end) = resolver
        .search()
        .provider()
        .scan_range(window.start_ts.0, window.end_ts.0);
    assert_eq!(window.end_block, expected_end);
}

#[tokio::test]
async fn test_resolve_future_date_is_out_of_bounds() {
    let mut resolver = DateRangeResolver::new(SyntheticChain::mainnet_like(100_000));

    let error = resolver.resolve_date(date(2024, 2, 1)).await.unwrap_err();

    assert!(error.is_out_of_bounds(), "Expected out of bounds, got {error:?}");
}

#[tokio::test]
async fn test_resolve_dates_in_order_sharing_cache() {
    let mut resolver = DateRangeResolver::new(SyntheticChain::mainnet_like(100_000));
    let dates = [date(2024, 1, 3), date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 1)];

    let windows = resolver.resolve_dates(&dates).await.unwrap();

    let resolved: Vec<_> = windows.iter().map(|w| w.date).collect();
    assert_eq!(resolved, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);

    // Consecutive days tile the chain without gaps or overlaps
    for pair in windows.windows(2) {
        assert_eq!(pair[1].start_block, pair[0].end_block + 1);
    }

    // Only the very first search had to fetch the chain ends
    let stats = resolver.search().stats();
    assert_eq!(stats.provider_seeded, 1);
    assert_eq!(stats.cache_seeded, 5);
}

#[tokio::test]
async fn test_sessions_can_share_a_provider() {
    let chain = Arc::new(SyntheticChain::mainnet_like(100_000));
    let mut first = DateRangeResolver::new(Arc::clone(&chain));
    let mut second = DateRangeResolver::new(Arc::clone(&chain));

    let a = first.resolve_date(date(2024, 1, 5)).await.unwrap();
    let b = second.resolve_date(date(2024, 1, 5)).await.unwrap();

    assert_eq!(a, b);
    assert_eq!(
        chain.queries(),
        first.search().stats().provider_queries + second.search().stats().provider_queries
    );
}

#[tokio::test]
async fn test_sessions_can_borrow_a_provider() {
    let chain = SyntheticChain::mainnet_like(100_000);
    let mut first = DateRangeResolver::new(&chain);
    let mut second = DateRangeResolver::new(&chain);

    let a = first.resolve_date(date(2024, 1, 6)).await.unwrap();
    let b = second.resolve_date(date(2024, 1, 7)).await.unwrap();

    assert_eq!(b.start_block, a.end_block + 1);
    assert_eq!(
        chain.queries(),
        first.search().stats().provider_queries + second.search().stats().provider_queries
    );
}

// ============================================================================
// Mapping table rows
// ============================================================================

#[tokio::test]
async fn test_resolve_pending_rows() {
    let mut resolver = DateRangeResolver::new(SyntheticChain::mainnet_like(100_000));

    let rows = resolver
        .resolve_pending_rows(date(2023, 12, 31), date(2024, 1, 2))
        .await
        .unwrap();

    let dates: Vec<_> = rows.iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
    assert_eq!(rows[1].starting_block, rows[0].ending_block + 1);

    let up_to_date = resolver
        .resolve_pending_rows(date(2024, 1, 2), date(2024, 1, 2))
        .await
        .unwrap();
    assert!(up_to_date.is_empty());
}

#[test]
fn test_row_serializes_with_mapping_column_names() {
    let row = BlockDateRow {
        date: date(2024, 1, 1),
        starting_block: 18_908_895,
        ending_block: 18_916_006,
    };

    let json = serde_json::to_value(row).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "date": "2024-01-01",
            "starting_block": 18_908_895,
            "ending_block": 18_916_006,
        })
    );
}
