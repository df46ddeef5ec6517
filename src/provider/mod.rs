// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction for runtime chain selection
//!
//! [`AlloyBlockDataProvider`](crate::AlloyBlockDataProvider) is generic over
//! `Provider<N: Network>`. When the chain is only known at runtime (an RPC URL
//! from the environment, say), [`create_http_provider`] builds a provider over
//! `AnyNetwork`, which serves block headers for every EVM chain.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockdate::{create_http_provider, AlloyBlockDataProvider, DateRangeResolver};
//! use alloy_network::AnyNetwork;
//!
//! let provider = create_http_provider("https://arb1.arbitrum.io/rpc")?;
//! let source = AlloyBlockDataProvider::<_, AnyNetwork>::new(provider);
//! let mut resolver = DateRangeResolver::new(source);
//! ```

use alloy_network::AnyNetwork;
use alloy_provider::{ProviderBuilder, RootProvider};

use crate::errors::RpcError;

/// Type-erased HTTP provider over `AnyNetwork`
pub type AnyHttpProvider = RootProvider<AnyNetwork>;

/// Create an HTTP provider for `url`
///
/// Recommended fillers are disabled; the resolver only reads blocks and code.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(url: &str) -> Result<AnyHttpProvider, RpcError> {
    let url: url::Url = url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<AnyNetwork>()
        .connect_http(url))
}
