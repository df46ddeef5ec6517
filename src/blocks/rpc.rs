// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-backed block data source.
//!
//! [`AlloyBlockDataProvider`] adapts any alloy [`Provider`] to the
//! [`BlockDataProvider`] and [`ContractCodeProvider`] capabilities. It reads
//! headers through alloy's network-agnostic response traits, so the same
//! adapter works for `Ethereum`, `AnyNetwork` and OP-stack networks.
//!
//! # Examples
//!
//! ```rust,ignore
//! use alloy_provider::ProviderBuilder;
//! use blockdate::{AlloyBlockDataProvider, DateRangeResolver};
//!
//! let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
//! let mut resolver = DateRangeResolver::new(AlloyBlockDataProvider::new(provider));
//! ```

use alloy_consensus::BlockHeader;
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_network::{BlockResponse, Ethereum, Network};
use alloy_primitives::{Address, BlockNumber};
use alloy_provider::Provider;
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::{trace, Instrument};

use super::deployment::ContractCodeProvider;
use crate::config::constants::FIRST_USABLE_BLOCK;
use crate::errors::RpcError;
use crate::search::{BlockDataProvider, Point};
use crate::tracing::spans;

/// Serves block points and code presence from an alloy provider.
///
/// Every query is a single `eth_getBlockByNumber` or `eth_getCode` call.
/// Retries and rate limiting belong to the provider's transport stack.
#[derive(Debug, Clone)]
pub struct AlloyBlockDataProvider<P, N = Ethereum> {
    provider: P,
    first_usable_block: BlockNumber,
    _network: PhantomData<fn() -> N>,
}

impl<P, N> AlloyBlockDataProvider<P, N>
where
    P: Provider<N>,
    N: Network,
{
    /// Wraps `provider`, sampling block 1 as the first usable block.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            first_usable_block: FIRST_USABLE_BLOCK,
            _network: PhantomData,
        }
    }

    /// Sets the block returned by [`first_point`](BlockDataProvider::first_point).
    ///
    /// Use `0` for chains whose genesis block carries a real timestamp. The
    /// resolver only widens ranges to genesis when the first point is not
    /// genesis itself.
    pub fn with_first_usable_block(mut self, block: BlockNumber) -> Self {
        self.first_usable_block = block;
        self
    }

    /// The wrapped alloy provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn get_point(&self, block: BlockNumberOrTag) -> Result<Point, RpcError> {
        let response = self
            .provider
            .get_block_by_number(block)
            .await
            .map_err(|e| RpcError::get_block_failed(block, e))?
            .ok_or(RpcError::BlockNotFound { block })?;

        let header = response.header();
        let point = block_point(header.number(), header.timestamp())?;
        trace!(point = %point, "Fetched block point");
        Ok(point)
    }
}

/// Builds a point from header fields, rejecting timestamps beyond `i64::MAX`.
fn block_point(number: BlockNumber, timestamp: u64) -> Result<Point, RpcError> {
    let y = i64::try_from(timestamp)
        .map_err(|_| RpcError::InvalidBlockTimestamp { number, timestamp })?;
    Ok(Point::new(number, y))
}

#[async_trait]
impl<P, N> BlockDataProvider for AlloyBlockDataProvider<P, N>
where
    P: Provider<N>,
    N: Network,
{
    async fn first_point(&self) -> Result<Point, RpcError> {
        let block = BlockNumberOrTag::Number(self.first_usable_block);
        self.get_point(block)
            .instrument(spans::get_block_point(block))
            .await
    }

    async fn last_point(&self) -> Result<Point, RpcError> {
        let block = BlockNumberOrTag::Latest;
        self.get_point(block)
            .instrument(spans::get_block_point(block))
            .await
    }

    async fn point_at(&self, x: BlockNumber) -> Result<Point, RpcError> {
        let block = BlockNumberOrTag::Number(x);
        self.get_point(block)
            .instrument(spans::get_block_point(block))
            .await
    }
}

#[async_trait]
impl<P, N> ContractCodeProvider for AlloyBlockDataProvider<P, N>
where
    P: Provider<N>,
    N: Network,
{
    async fn latest_block_number(&self) -> Result<BlockNumber, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| RpcError::chain_connection_failed("eth_blockNumber", e))
    }

    async fn has_code_at(
        &self,
        address: Address,
        block_number: BlockNumber,
    ) -> Result<bool, RpcError> {
        let code = async {
            self.provider
                .get_code_at(address)
                .block_id(BlockId::number(block_number))
                .await
        }
        .instrument(spans::has_code_at(address, block_number))
        .await
        .map_err(|e| RpcError::get_code_failed(address, block_number, e))?;
        Ok(!code.is_empty())
    }
}
