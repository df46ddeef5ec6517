// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for contract deployment block lookups.

use alloy_primitives::{Address, BlockNumber};

use super::RpcError;

/// Errors that can occur while searching for a contract's deployment block.
#[derive(Debug, thiserror::Error)]
pub enum DeploymentSearchError {
    /// The address has no code at the upper end of the searched range.
    #[error("No code at {address} as of block {block_number}")]
    NotDeployed {
        /// The contract address
        address: Address,
        /// The block the search was bounded by
        block_number: BlockNumber,
    },

    /// The provider failed while probing code presence.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}
