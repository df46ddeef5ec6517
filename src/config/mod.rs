// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for block range resolution
//!
//! # Example: Using defaults
//!
//! ```rust
//! use blockdate::ResolverConfig;
//!
//! // Ranges starting at the provider's first usable block include block 0
//! let config = ResolverConfig::default();
//! assert!(config.include_genesis);
//! assert_eq!(config.effective_start_block(1, Some(1)), 0);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use blockdate::ResolverConfigBuilder;
//! use alloy_chains::NamedChain;
//!
//! let config = ResolverConfigBuilder::new()
//!     .chain(NamedChain::Arbitrum)
//!     .include_genesis(false)
//!     .build();
//! assert_eq!(config.chain, Some(NamedChain::Arbitrum));
//! ```

use alloy_chains::NamedChain;
use alloy_primitives::BlockNumber;

pub mod constants;

use constants::GENESIS_BLOCK;

/// Configuration for [`DateRangeResolver`](crate::DateRangeResolver)
///
/// Use [`ResolverConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Chain the resolver runs against, used to label logs and spans
    /// Default: None
    pub chain: Option<NamedChain>,

    /// Whether a range starting at the provider's first usable block is
    /// widened to include genesis
    /// Default: true
    pub include_genesis: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            chain: None,
            include_genesis: true,
        }
    }
}

impl ResolverConfig {
    /// Maps a resolved start block to the block reported to callers.
    ///
    /// `first_block` is the first point the provider actually served. When it
    /// stands in for an excluded genesis block, a range starting there is
    /// extended back to genesis. A provider that serves genesis itself needs
    /// no substitution.
    pub fn effective_start_block(
        &self,
        start_block: BlockNumber,
        first_block: Option<BlockNumber>,
    ) -> BlockNumber {
        match first_block {
            Some(first)
                if self.include_genesis && first != GENESIS_BLOCK && start_block == first =>
            {
                GENESIS_BLOCK
            }
            _ => start_block,
        }
    }
}

/// Builder for [`ResolverConfig`]
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Label logs and spans with a chain
    pub fn chain(mut self, chain: NamedChain) -> Self {
        self.config.chain = Some(chain);
        self
    }

    /// Choose whether ranges starting at the first usable block include genesis
    pub fn include_genesis(mut self, include: bool) -> Self {
        self.config.include_genesis = include;
        self
    }

    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
