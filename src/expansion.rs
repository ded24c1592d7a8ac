use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::arithmetic::{
    fast_two_sum, split, square, two_product, two_product_presplit, two_sum, two_two_diff,
    two_two_sum,
};

/// An exact representation of a real number as a sum of floating point components.
///
/// The components are *non-overlapping*: the highest set bit of each component is lower
/// than the lowest set bit of the next component. They are sorted by increasing magnitude
/// and never contain zero, the empty expansion represents zero. As a consequence, the
/// sign of an expansion is the sign of its last component.
///
/// `N` is the inline capacity. Every expression evaluated by this crate has a known
/// maximum expansion length, choosing `N` accordingly keeps evaluation free of heap
/// allocations. Exceeding `N` is not an error, the storage spills to the heap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expansion<const N: usize> {
    components: SmallVec<[f64; N]>,
}

impl<const N: usize> Expansion<N> {
    /// Returns the expansion representing zero.
    #[inline]
    pub fn zero() -> Self {
        Expansion {
            components: SmallVec::new(),
        }
    }

    /// Creates an expansion from components given in increasing magnitude.
    ///
    /// Zero components are dropped. The remaining components must be non-overlapping.
    pub fn from_components(components: &[f64]) -> Self {
        let result = Expansion {
            components: components.iter().copied().filter(|c| *c != 0.0).collect(),
        };
        debug_assert!(result.is_nonoverlapping());
        result
    }

    /// Computes `a * b - c * d` exactly. The result has at most four components.
    #[inline]
    pub fn difference_of_products(a: f64, b: f64, c: f64, d: f64, splitter: f64) -> Self {
        let (ab1, ab0) = two_product(a, b, splitter);
        let (cd1, cd0) = two_product(c, d, splitter);
        two_two_diff(ab1, ab0, cd1, cd0).into()
    }

    /// Computes `a * b + c * d` exactly. The result has at most four components.
    #[inline]
    pub fn sum_of_products(a: f64, b: f64, c: f64, d: f64, splitter: f64) -> Self {
        let (ab1, ab0) = two_product(a, b, splitter);
        let (cd1, cd0) = two_product(c, d, splitter);
        two_two_sum(ab1, ab0, cd1, cd0).into()
    }

    /// Computes `a * a + b * b` exactly. The result has at most four components.
    #[inline]
    pub fn sum_of_squares(a: f64, b: f64, splitter: f64) -> Self {
        let (aa1, aa0) = square(a, splitter);
        let (bb1, bb0) = square(b, splitter);
        two_two_sum(aa1, aa0, bb1, bb0).into()
    }

    /// Returns the number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if this expansion represents exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the components in increasing order of magnitude.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    /// Returns the largest component.
    ///
    /// Its sign is the sign of the represented value and it approximates the value to within
    /// the magnitude of the remaining components. Returns `0.0` for the zero expansion.
    #[inline]
    pub fn most_significant(&self) -> f64 {
        self.components.last().copied().unwrap_or(0.0)
    }

    /// Returns the sign of the represented value, compared to zero.
    #[inline]
    pub fn sign(&self) -> Ordering {
        self.most_significant()
            .partial_cmp(&0.0)
            .unwrap_or(Ordering::Equal)
    }

    /// Approximates the represented value by naively summing all components.
    ///
    /// The result is only used as a magnitude estimate, never to decide a sign.
    pub fn estimate(&self) -> f64 {
        self.components.iter().sum()
    }

    /// Returns the negated expansion. Negation is exact.
    pub fn negate(&self) -> Self {
        Expansion {
            components: self.components.iter().map(|c| -c).collect(),
        }
    }

    /// Copies the components into an expansion with a different inline capacity.
    pub fn resize<const M: usize>(&self) -> Expansion<M> {
        Expansion {
            components: self.components.iter().copied().collect(),
        }
    }

    /// Adds a scalar to this expansion.
    ///
    /// The result has at most `self.len() + 1` components.
    pub fn grow<const M: usize>(&self, b: f64) -> Expansion<M> {
        let mut h = SmallVec::new();
        let mut q = b;
        for &enow in &self.components {
            let (q_new, hh) = two_sum(q, enow);
            push_nonzero(&mut h, hh);
            q = q_new;
        }
        push_nonzero(&mut h, q);
        Expansion { components: h }
    }

    /// Adds two expansions.
    ///
    /// Both inputs are merged by magnitude and then swept up with exact additions. The
    /// result has at most `self.len() + other.len()` components.
    pub fn sum<const M: usize, const R: usize>(&self, other: &Expansion<M>) -> Expansion<R> {
        let mut merged = MagnitudeMerge {
            e: self.as_slice(),
            f: other.as_slice(),
        };
        let mut h = SmallVec::new();

        let Some(mut q) = merged.next() else {
            return Expansion::zero();
        };

        if merged.both_pending() {
            // Both heads are at least as large as q, so the cheaper sum applies.
            if let Some(next) = merged.next() {
                let (q_new, hh) = fast_two_sum(next, q);
                push_nonzero(&mut h, hh);
                q = q_new;
            }
        }

        for next in merged {
            let (q_new, hh) = two_sum(q, next);
            push_nonzero(&mut h, hh);
            q = q_new;
        }

        push_nonzero(&mut h, q);
        Expansion { components: h }
    }

    /// Multiplies this expansion by a scalar.
    ///
    /// `b` is split only once. The result has at most `2 * self.len()` components.
    pub fn scale<const M: usize>(&self, b: f64, splitter: f64) -> Expansion<M> {
        let mut components = self.components.iter();
        let Some(&first) = components.next() else {
            return Expansion::zero();
        };

        let mut h = SmallVec::new();
        let (b_high, b_low) = split(b, splitter);
        let (mut q, hh) = two_product_presplit(first, b, b_high, b_low, splitter);
        push_nonzero(&mut h, hh);

        for &enow in components {
            let (product1, product0) = two_product_presplit(enow, b, b_high, b_low, splitter);
            let (sum, hh) = two_sum(q, product0);
            push_nonzero(&mut h, hh);
            let (q_new, hh) = fast_two_sum(product1, sum);
            push_nonzero(&mut h, hh);
            q = q_new;
        }

        push_nonzero(&mut h, q);
        Expansion { components: h }
    }

    /// Returns an equivalent expansion with as few components as possible.
    ///
    /// The largest component of the result approximates the value to within one ulp.
    pub fn compress(&self) -> Self {
        let Some((&last, rest)) = self.components.split_last() else {
            return Self::zero();
        };

        // Downward sweep, collects the large halves in decreasing order.
        let mut large: SmallVec<[f64; N]> = SmallVec::new();
        let mut q = last;
        for &enow in rest.iter().rev() {
            let (q_new, small) = fast_two_sum(q, enow);
            if small != 0.0 {
                large.push(q_new);
                q = small;
            } else {
                q = q_new;
            }
        }

        let mut h = SmallVec::new();
        for &g in large.iter().rev() {
            let (q_new, small) = fast_two_sum(g, q);
            push_nonzero(&mut h, small);
            q = q_new;
        }
        push_nonzero(&mut h, q);
        Expansion { components: h }
    }

    /// Checks the representation invariant: no zero components and every component lies
    /// strictly below the lowest set bit of its successor.
    pub fn is_nonoverlapping(&self) -> bool {
        self.components.iter().all(|c| *c != 0.0 && c.is_finite())
            && self
                .components
                .windows(2)
                .all(|pair| pair[0].abs() < lowest_set_bit(pair[1]))
    }
}

impl<const N: usize> From<(f64, f64)> for Expansion<N> {
    /// Converts `(high, low)` as returned by the two term error-free transformations.
    #[inline]
    fn from((x1, x0): (f64, f64)) -> Self {
        Self::from_components(&[x0, x1])
    }
}

impl<const N: usize> From<(f64, f64, f64, f64)> for Expansion<N> {
    /// Converts `(x3, x2, x1, x0)` as returned by `two_two_sum` and `two_two_diff`.
    #[inline]
    fn from((x3, x2, x1, x0): (f64, f64, f64, f64)) -> Self {
        Self::from_components(&[x0, x1, x2, x3])
    }
}

#[inline]
fn push_nonzero<const N: usize>(h: &mut SmallVec<[f64; N]>, value: f64) {
    if value != 0.0 {
        h.push(value);
    }
}

/// Yields the components of two expansions in increasing order of magnitude.
struct MagnitudeMerge<'a> {
    e: &'a [f64],
    f: &'a [f64],
}

impl MagnitudeMerge<'_> {
    fn both_pending(&self) -> bool {
        !self.e.is_empty() && !self.f.is_empty()
    }
}

impl Iterator for MagnitudeMerge<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match (self.e.split_first(), self.f.split_first()) {
            (Some((&enow, e_rest)), Some((&fnow, f_rest))) => {
                // Takes e if |enow| < |fnow|, without computing absolute values.
                if (fnow > enow) == (fnow > -enow) {
                    self.e = e_rest;
                    Some(enow)
                } else {
                    self.f = f_rest;
                    Some(fnow)
                }
            }
            (Some((&enow, e_rest)), None) => {
                self.e = e_rest;
                Some(enow)
            }
            (None, Some((&fnow, f_rest))) => {
                self.f = f_rest;
                Some(fnow)
            }
            (None, None) => None,
        }
    }
}

/// Returns the value of the lowest set bit of a finite, non-zero float.
fn lowest_set_bit(value: f64) -> f64 {
    const MANTISSA_BITS: u32 = 52;
    let bits = value.abs().to_bits();
    let biased_exponent = (bits >> MANTISSA_BITS) as i32;
    let mut mantissa = bits & ((1 << MANTISSA_BITS) - 1);
    let exponent = if biased_exponent == 0 {
        -1074
    } else {
        mantissa |= 1 << MANTISSA_BITS;
        biased_exponent - 1075
    };
    let lowest = exponent + mantissa.trailing_zeros() as i32;
    if lowest >= -1022 {
        f64::from_bits(((lowest + 1023) as u64) << MANTISSA_BITS)
    } else {
        f64::from_bits(1u64 << (lowest + 1074))
    }
}

#[cfg(test)]
mod test {
    use super::{lowest_set_bit, Expansion};
    use crate::arithmetic::two_product;
    use approx::assert_relative_eq;
    use rand::distributions::{Distribution, Uniform};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SPLITTER: f64 = 134217729.0;
    const SEED: &[u8; 32] = b"lS4TeG3FzbBmv3BOBHLwJo8jYe1KknQ7";

    /// Exact value of an expansion with integral components.
    fn exact_value<const N: usize>(expansion: &Expansion<N>) -> i128 {
        expansion
            .as_slice()
            .iter()
            .map(|&c| {
                assert_eq!(c.fract(), 0.0);
                c as i128
            })
            .sum()
    }

    /// Builds an expansion of a few large integers with widely varying magnitudes.
    fn random_integer_expansion(rng: &mut StdRng) -> (Expansion<8>, i128) {
        let base = Uniform::new_inclusive(-(1i64 << 50), 1i64 << 50);
        let mut expansion = Expansion::<8>::zero();
        let mut expected = 0i128;
        for _ in 0..rng.gen_range(0..6) {
            let value = (base.sample(rng) as i128) << rng.gen_range(0..30);
            expansion = expansion.grow(value as f64);
            expected += value as i128;
        }
        (expansion, expected)
    }

    #[test]
    fn test_lowest_set_bit() {
        assert_eq!(lowest_set_bit(1.0), 1.0);
        assert_eq!(lowest_set_bit(-12.0), 4.0);
        assert_eq!(lowest_set_bit(1.0 + f64::EPSILON), f64::EPSILON);
        assert_eq!(lowest_set_bit(f64::MIN_POSITIVE), f64::MIN_POSITIVE);
        let smallest_subnormal = f64::from_bits(1);
        assert_eq!(lowest_set_bit(smallest_subnormal * 6.0), smallest_subnormal * 2.0);
    }

    #[test]
    fn test_grow() {
        let mut rng = StdRng::from_seed(*SEED);
        for _ in 0..200 {
            let (expansion, expected) = random_integer_expansion(&mut rng);
            assert!(expansion.is_nonoverlapping());
            assert_eq!(exact_value(&expansion), expected);
        }
    }

    #[test]
    fn test_grow_loses_nothing() {
        let e = Expansion::<2>::zero().grow::<2>(1.0);
        let e: Expansion<2> = e.grow(f64::EPSILON / 4.0);
        assert_eq!(e.as_slice(), &[f64::EPSILON / 4.0, 1.0]);
        assert!(e.is_nonoverlapping());
    }

    #[test]
    fn test_sum() {
        let mut rng = StdRng::from_seed(*SEED);
        for _ in 0..500 {
            let (e, e_value) = random_integer_expansion(&mut rng);
            let (f, f_value) = random_integer_expansion(&mut rng);
            let sum: Expansion<16> = e.sum(&f);
            assert!(sum.is_nonoverlapping());
            assert!(sum.len() <= e.len() + f.len());
            assert_eq!(exact_value(&sum), e_value + f_value);
        }
    }

    #[test]
    fn test_sum_cancels_to_zero() {
        let e: Expansion<4> = (1.0e30, 3.0).into();
        let sum: Expansion<8> = e.sum(&e.negate());
        assert!(sum.is_zero());
        assert_eq!(sum.most_significant(), 0.0);

        let zero = Expansion::<4>::zero();
        let same: Expansion<8> = zero.sum(&e);
        assert_eq!(same.as_slice(), e.as_slice());
    }

    #[test]
    fn test_scale() {
        let mut rng = StdRng::from_seed(*SEED);
        let factor = Uniform::new_inclusive(-(1i64 << 30), 1i64 << 30);
        for _ in 0..500 {
            let (e, e_value) = random_integer_expansion(&mut rng);
            let b = factor.sample(&mut rng);
            let scaled: Expansion<16> = e.scale(b as f64, SPLITTER);
            assert!(scaled.is_nonoverlapping());
            assert!(scaled.len() <= 2 * e.len());
            assert_eq!(exact_value(&scaled), e_value * b as i128);
        }
    }

    #[test]
    fn test_scale_by_zero() {
        let e: Expansion<4> = (1.0e30, 3.0).into();
        let scaled: Expansion<8> = e.scale(0.0, SPLITTER);
        assert!(scaled.is_zero());
    }

    #[test]
    fn test_scale_fraction() {
        // 0.1 * 0.1 is not representable, the expansion keeps the rounding error.
        let e: Expansion<2> = Expansion::from_components(&[0.1]);
        let scaled: Expansion<4> = e.scale(0.1, SPLITTER);
        let (high, low) = two_product(0.1, 0.1, SPLITTER);
        assert_eq!(scaled.as_slice(), &[low, high]);
    }

    #[test]
    fn test_compress() {
        let mut rng = StdRng::from_seed(*SEED);
        for _ in 0..500 {
            let (e, e_value) = random_integer_expansion(&mut rng);
            let (f, f_value) = random_integer_expansion(&mut rng);
            let sum: Expansion<16> = e.sum(&f);
            let compressed = sum.compress();
            assert!(compressed.is_nonoverlapping());
            assert!(compressed.len() <= sum.len());
            assert_eq!(exact_value(&compressed), e_value + f_value);
            if !compressed.is_zero() {
                assert_relative_eq!(
                    compressed.most_significant(),
                    (e_value + f_value) as f64,
                    max_relative = 2.0 * f64::EPSILON
                );
            }
        }
    }

    #[test]
    fn test_estimate() {
        let e = Expansion::<4>::from_components(&[1.0e-20, 1.0, 1.0e20]);
        assert_relative_eq!(e.estimate(), 1.0e20);
        assert_eq!(Expansion::<4>::zero().estimate(), 0.0);
    }

    #[test]
    fn test_products() {
        let big = 2.0f64.powi(40) + 1.0;
        // big^2 - (big - 1)(big + 1) == 1
        let e: Expansion<4> =
            Expansion::difference_of_products(big, big, big - 1.0, big + 1.0, SPLITTER);
        assert_eq!(exact_value(&e), 1);
        assert!(e.is_nonoverlapping());

        let e: Expansion<4> = Expansion::sum_of_products(big, big, big, -big, SPLITTER);
        assert!(e.is_zero());

        let e: Expansion<4> = Expansion::sum_of_squares(big, -big, SPLITTER);
        let big_i128 = (1i128 << 40) + 1;
        assert_eq!(exact_value(&e), 2 * big_i128 * big_i128);
    }

    #[test]
    fn test_sign() {
        use std::cmp::Ordering;

        let e: Expansion<4> = (-1.0e30, 3.0).into();
        assert_eq!(e.sign(), Ordering::Less);
        assert_eq!(e.negate().sign(), Ordering::Greater);
        assert_eq!(Expansion::<4>::zero().sign(), Ordering::Equal);
    }

    #[test]
    fn test_from_components_drops_zeros() {
        let e: Expansion<4> = (8.0, 0.0, 1.0, 0.0).into();
        assert_eq!(e.as_slice(), &[1.0, 8.0]);
        assert_eq!(e.len(), 2);
        assert_eq!(e.most_significant(), 8.0);
    }

    #[test]
    fn test_overlapping_is_detected() {
        let e = Expansion::<4> {
            components: [3.0, 6.0].into_iter().collect(),
        };
        assert!(!e.is_nonoverlapping());

        let e = Expansion::<4> {
            components: [4.0, 1.0].into_iter().collect(),
        };
        assert!(!e.is_nonoverlapping());
    }
}
