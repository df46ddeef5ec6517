// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for blockchain provider operations.
//!
//! Every provider query made by the search engine or the deployment finder
//! reports failures through [`RpcError`]. None of these errors are retried
//! by this crate; retry policy belongs to the provider stack.

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, BlockNumber};

/// Errors that can occur during blockchain RPC operations.
///
/// # Examples
///
/// ```rust
/// use alloy_eips::BlockNumberOrTag;
/// use blockdate::RpcError;
///
/// let error = RpcError::BlockNotFound {
///     block: BlockNumberOrTag::Latest,
/// };
/// assert_eq!(error.to_string(), "Block not found: latest");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Block was not found at the specified block number or tag.
    ///
    /// This can occur if the block number is beyond the chain tip, if there
    /// was a chain reorganization, or if the provider hasn't synced that block.
    #[error("Block not found: {block}")]
    BlockNotFound {
        /// The block number or tag that wasn't found
        block: BlockNumberOrTag,
    },

    /// Failed to fetch block details.
    ///
    /// This is different from `BlockNotFound` - it indicates the RPC call itself
    /// failed, not that the block doesn't exist.
    #[error("Failed to fetch block {block} details")]
    GetBlockFailed {
        /// The block number or tag we tried to fetch
        block: BlockNumberOrTag,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch contract code at a block.
    #[error("Failed to fetch code of {address} at block {block_number}")]
    GetCodeFailed {
        /// The contract address
        address: Address,
        /// The block the code was requested at
        block_number: BlockNumber,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A block header carried a timestamp that does not fit in an `i64`.
    #[error("Block {number} has out-of-range timestamp {timestamp}")]
    InvalidBlockTimestamp {
        /// The block number
        number: BlockNumber,
        /// The raw header timestamp
        timestamp: u64,
    },

    /// The RPC endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// Failed to connect to the blockchain or execute an RPC call.
    ///
    /// This is a catch-all for RPC failures that don't fit other categories,
    /// such as network errors, timeouts, or provider downtime.
    #[error("Chain connection failed during {operation}")]
    ChainConnectionFailed {
        /// Description of the operation that failed
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RpcError {
    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block: impl Into<BlockNumberOrTag>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block: block.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetCodeFailed` error from any error type.
    pub fn get_code_failed(
        address: Address,
        block_number: BlockNumber,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetCodeFailed {
            address,
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `ChainConnectionFailed` error from any error type.
    pub fn chain_connection_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ChainConnectionFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }
}
