// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Linear estimates of where a target value is reached.

use alloy_primitives::BlockNumber;

use super::point::Point;

/// Estimates the block number at which the line through `a` and `b` reaches
/// `target`, rounded half away from zero.
///
/// `target` may lie outside `[a.y, b.y]`, in which case the line is
/// extrapolated. Returns `None` unless `a.y < b.y`.
pub(crate) fn interpolate(a: Point, b: Point, target: i64) -> Option<i128> {
    let dy = i128::from(b.y) - i128::from(a.y);
    if dy <= 0 {
        return None;
    }
    let dx = i128::from(b.x) - i128::from(a.x);
    let offset = (i128::from(target) - i128::from(a.y)).saturating_mul(dx);
    Some(i128::from(a.x).saturating_add(div_round(offset, dy)))
}

/// Division rounding half away from zero. `den` must be positive.
fn div_round(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let remainder = num % den;
    if remainder.unsigned_abs() * 2 >= den.unsigned_abs() {
        quotient + num.signum()
    } else {
        quotient
    }
}

/// Moves `estimate` strictly inside the open interval `(lower, upper)`.
///
/// Estimates on or beyond an end are nudged to the nearest interior block.
/// Callers guarantee `upper - lower >= 2`, so the interval is never empty.
pub(crate) fn clamp_inside(estimate: i128, lower: BlockNumber, upper: BlockNumber) -> BlockNumber {
    debug_assert!(
        upper.saturating_sub(lower) >= 2,
        "no interior block in ({lower}, {upper})"
    );
    let low = i128::from(lower) + 1;
    let high = i128::from(upper) - 1;
    // Within [lower + 1, upper - 1], so the cast is lossless.
    estimate.max(low).min(high) as BlockNumber
}
