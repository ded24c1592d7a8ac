//! Error-free transformations.
//!
//! Every function in this module returns its result as a pair (or a short, fixed size
//! expansion) of floating point numbers whose *exact* sum equals the exact result of the
//! operation. The first element is always the rounded floating point result, the remaining
//! elements hold the rounding error.
//!
//! Tuples are ordered from the most significant to the least significant component, e.g.
//! `two_two_sum` returns `(x3, x2, x1, x0)` where `x3` is the largest component.
//!
//! The functions assume round-to-nearest IEEE 754 arithmetic and finite inputs whose
//! intermediate products neither overflow nor underflow.

/// Recovers the roundoff error of `x = a + b`, given that `|a| >= |b|`.
#[inline]
pub fn fast_two_sum_tail(a: f64, b: f64, x: f64) -> f64 {
    let b_virtual = x - a;
    b - b_virtual
}

/// Computes `a + b` exactly, given that `|a| >= |b|`.
#[inline]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    (x, fast_two_sum_tail(a, b, x))
}

/// Recovers the roundoff error of `x = a + b` without any requirement on the magnitudes.
#[inline]
pub fn two_sum_tail(a: f64, b: f64, x: f64) -> f64 {
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Computes `a + b` exactly.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    (x, two_sum_tail(a, b, x))
}

/// Recovers the roundoff error of `x = a - b`.
#[inline]
pub fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let b_virtual = a - x;
    let a_virtual = x + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Computes `a - b` exactly.
#[inline]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

/// Splits `a` into two halves with at most `p/2` significant bits each (`p` being the
/// precision the splitter was derived for), returned as `(high, low)`.
///
/// `high + low == a` holds exactly and `high` and `low` carry opposite or equal signs as
/// needed.
#[inline]
pub fn split(a: f64, splitter: f64) -> (f64, f64) {
    let c = splitter * a;
    let a_big = c - a;
    let a_high = c - a_big;
    let a_low = a - a_high;
    (a_high, a_low)
}

/// Recovers the roundoff error of `x = a * b`.
#[inline]
pub fn two_product_tail(a: f64, b: f64, x: f64, splitter: f64) -> f64 {
    let (a_high, a_low) = split(a, splitter);
    let (b_high, b_low) = split(b, splitter);
    let err1 = x - a_high * b_high;
    let err2 = err1 - a_low * b_high;
    let err3 = err2 - a_high * b_low;
    a_low * b_low - err3
}

/// Computes `a * b` exactly.
#[inline]
pub fn two_product(a: f64, b: f64, splitter: f64) -> (f64, f64) {
    let x = a * b;
    (x, two_product_tail(a, b, x, splitter))
}

/// Computes `a * b` exactly where `b` has already been split into `(b_high, b_low)`.
///
/// Used when the same factor multiplies many components, as in expansion scaling.
#[inline]
pub fn two_product_presplit(a: f64, b: f64, b_high: f64, b_low: f64, splitter: f64) -> (f64, f64) {
    let x = a * b;
    let (a_high, a_low) = split(a, splitter);
    let err1 = x - a_high * b_high;
    let err2 = err1 - a_low * b_high;
    let err3 = err2 - a_high * b_low;
    (x, a_low * b_low - err3)
}

/// Computes `a * a` exactly. Cheaper than `two_product(a, a)`.
#[inline]
pub fn square(a: f64, splitter: f64) -> (f64, f64) {
    let x = a * a;
    let (a_high, a_low) = split(a, splitter);
    let err1 = x - a_high * a_high;
    let err3 = err1 - (a_high + a_high) * a_low;
    (x, a_low * a_low - err3)
}

/// Adds a scalar to a two component expansion.
#[inline]
pub fn two_one_sum(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_sum(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

/// Subtracts a scalar from a two component expansion.
#[inline]
pub fn two_one_diff(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

/// Adds two two component expansions.
#[inline]
pub fn two_two_sum(a1: f64, a0: f64, b1: f64, b0: f64) -> (f64, f64, f64, f64) {
    let (j, zero, x0) = two_one_sum(a1, a0, b0);
    let (x3, x2, x1) = two_one_sum(j, zero, b1);
    (x3, x2, x1, x0)
}

/// Subtracts two two component expansions.
#[inline]
pub fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> (f64, f64, f64, f64) {
    let (j, zero, x0) = two_one_diff(a1, a0, b0);
    let (x3, x2, x1) = two_one_diff(j, zero, b1);
    (x3, x2, x1, x0)
}
