// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known block numbers and time constants
//!
//! This module centralizes magic constants used throughout the blockdate crate.

use alloy_primitives::BlockNumber;

/// Block number of the genesis block
pub const GENESIS_BLOCK: BlockNumber = 0;

/// First block sampled by the search
///
/// The genesis block of most EVM chains carries a zero timestamp, which would
/// break strict growth of timestamps against every later block. The block
/// after it is sampled instead and stands in for genesis in resolved ranges.
pub const FIRST_USABLE_BLOCK: BlockNumber = 1;

/// Number of seconds in a UTC day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Offset of the last whole second of a UTC day from its start
///
/// 23:59:59.999999 truncated to whole seconds.
pub const LAST_SECOND_OF_DAY: i64 = SECONDS_PER_DAY - 1;
