// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The data source a search samples points from.

use alloy_primitives::BlockNumber;
use async_trait::async_trait;
use std::sync::Arc;

use super::point::Point;
use crate::errors::RpcError;

/// Supplies `(block number, timestamp)` points on demand.
///
/// Each call is one round trip to the underlying node. Failures are returned
/// as-is; implementations may retry internally but the search never does.
///
/// A provider may be shared between independent search sessions by wrapping
/// it in an [`Arc`] or lending it by reference. The sessions themselves must not
/// be shared.
#[async_trait]
pub trait BlockDataProvider: Send + Sync {
    /// The first usable point of the chain.
    ///
    /// The genesis block of most chains is excluded because its timestamp is
    /// degenerate and would break strict growth against every other block;
    /// implementations return the block after it instead. Chains whose genesis
    /// carries a real timestamp may return genesis itself.
    async fn first_point(&self) -> Result<Point, RpcError>;

    /// The most recently produced point at query time.
    async fn last_point(&self) -> Result<Point, RpcError>;

    /// The point for block `x`.
    async fn point_at(&self, x: BlockNumber) -> Result<Point, RpcError>;
}

#[async_trait]
impl<'a, T: BlockDataProvider + ?Sized> BlockDataProvider for &'a T {
    async fn first_point(&self) -> Result<Point, RpcError> {
        (**self).first_point().await
    }

    async fn last_point(&self) -> Result<Point, RpcError> {
        (**self).last_point().await
    }

    async fn point_at(&self, x: BlockNumber) -> Result<Point, RpcError> {
        (**self).point_at(x).await
    }
}

#[async_trait]
impl<T: BlockDataProvider + ?Sized> BlockDataProvider for Arc<T> {
    async fn first_point(&self) -> Result<Point, RpcError> {
        (**self).first_point().await
    }

    async fn last_point(&self) -> Result<Point, RpcError> {
        (**self).last_point().await
    }

    async fn point_at(&self, x: BlockNumber) -> Result<Point, RpcError> {
        (**self).point_at(x).await
    }
}
