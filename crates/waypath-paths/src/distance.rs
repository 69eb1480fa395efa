use std::f64::consts::SQRT_2;

use waypath_core::Pos;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Chebyshev (L∞) distance between two positions.
#[inline]
pub fn chebyshev(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

/// Octile distance: the cost of the cheapest 8-way route on an open grid
/// where orthogonal steps cost 1 and diagonal steps cost √2.
#[inline]
pub fn octile(a: Pos, b: Pos) -> f64 {
    let dr = (a.row - b.row).abs();
    let dc = (a.col - b.col).abs();
    f64::from(dr.max(dc)) + (SQRT_2 - 1.0) * f64::from(dr.min(dc))
}
