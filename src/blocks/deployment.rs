// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Locating the block a contract was deployed in.
//!
//! Code presence at an address is monotonic in block number (absent before
//! deployment, present after), so the deployment block is found by binary
//! search over `eth_getCode` lookups. Block timestamps are not involved.

use alloy_primitives::{Address, BlockNumber};
use async_trait::async_trait;
use tracing::{debug, info, Instrument};

use crate::config::constants::GENESIS_BLOCK;
use crate::errors::{DeploymentSearchError, RpcError};
use crate::tracing::spans;

/// Answers whether an address holds contract code at a given block.
#[async_trait]
pub trait ContractCodeProvider: Send + Sync {
    /// The current chain head.
    async fn latest_block_number(&self) -> Result<BlockNumber, RpcError>;

    /// Returns true if `address` has non-empty code at `block_number`.
    async fn has_code_at(
        &self,
        address: Address,
        block_number: BlockNumber,
    ) -> Result<bool, RpcError>;
}

/// Finds contract deployment blocks by binary search over code presence.
///
/// # Examples
///
/// ```rust,ignore
/// use blockdate::{AlloyBlockDataProvider, DeploymentBlockFinder};
///
/// let finder = DeploymentBlockFinder::new(AlloyBlockDataProvider::new(provider));
/// let block = finder.find_deployment_block(contract, None).await?;
/// println!("{contract} was deployed in block {block}");
/// ```
#[derive(Debug, Clone)]
pub struct DeploymentBlockFinder<C> {
    code: C,
}

impl<C: ContractCodeProvider> DeploymentBlockFinder<C> {
    pub fn new(code: C) -> Self {
        Self { code }
    }

    /// Returns the first block at which `address` has code.
    ///
    /// The search covers `[0, latest_block]`; `None` searches up to the
    /// current chain head.
    ///
    /// # Errors
    ///
    /// - [`DeploymentSearchError::NotDeployed`] if there is no code at the
    ///   upper end of the range
    /// - [`DeploymentSearchError::Rpc`] if a code lookup fails
    pub async fn find_deployment_block(
        &self,
        address: Address,
        latest_block: Option<BlockNumber>,
    ) -> Result<BlockNumber, DeploymentSearchError> {
        let span = spans::find_deployment_block(address, latest_block);
        async move {
            let upper = match latest_block {
                Some(block) => block,
                None => self.code.latest_block_number().await?,
            };

            if !self.code.has_code_at(address, upper).await? {
                return Err(DeploymentSearchError::NotDeployed {
                    address,
                    block_number: upper,
                });
            }

            let mut left = GENESIS_BLOCK;
            let mut right = upper;
            let mut code_checks = 1u32;
            while left < right {
                let mid = left + (right - left) / 2;
                code_checks += 1;
                if self.code.has_code_at(address, mid).await? {
                    right = mid;
                } else {
                    left = mid + 1;
                }
                debug!(left, right, "Narrowed deployment search");
            }

            info!(
                address = %address,
                deployment_block = left,
                code_checks,
                "Found contract deployment block"
            );
            Ok(left)
        }
        .instrument(span)
        .await
    }
}
