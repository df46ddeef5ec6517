// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bracketing values of a monotonic function that is sampled one point at a time.
//!
//! This module provides:
//! - [`Point`] and [`Bracket`], the sampled values and the bounds built from them
//! - [`BlockDataProvider`], the data source capability the search samples from
//! - [`SearchCache`], the per-session record of sampled points
//! - [`MonotonicRangeSearch`], the interpolation search engine

mod cache;
mod engine;
mod interpolate;
mod point;
mod provider;

pub use cache::{best_bracket, SearchCache};
pub use engine::{MonotonicRangeSearch, SearchStats};
pub use point::{Bracket, Point};
pub use provider::BlockDataProvider;
