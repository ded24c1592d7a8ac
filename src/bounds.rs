use once_cell::sync::OnceCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unit roundoff of a stored `f64`, `2^-53`.
const F64_UNIT_ROUNDOFF: f64 = f64::EPSILON / 2.0;

static BOUNDS: OnceCell<ErrorBounds> = OnceCell::new();

/// Machine dependent constants used by the adaptive predicates.
///
/// The error bound coefficients are a-priori bounds relative to the *permanent* of each
/// predicate's expression (the same expression with all terms replaced by their absolute
/// values). A stage of a predicate may only return its approximation if it lies further
/// away from zero than `coefficient * permanent`.
///
/// The table is computed once per process, see [initialize] and [bounds]. Custom tables
/// can be created with [ErrorBounds::measure] or [ErrorBounds::from_epsilon] and injected
/// into an [AdaptiveKernel](crate::AdaptiveKernel).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct ErrorBounds {
    /// The largest power of two such that `1.0 + epsilon == 1.0` in round-to-nearest
    /// arithmetic. This is `2^-53` for IEEE 754 doubles.
    pub epsilon: f64,
    /// Used to split floats into two halves of at most `p/2` bits, `2^ceil(p/2) + 1`.
    pub splitter: f64,
    /// Bound on the error of the result of a tail corrected estimate.
    pub result_err_bound: f64,
    /// orient2d, floating point estimate.
    pub ccw_err_bound_a: f64,
    /// orient2d, expansion of the rounded differences.
    pub ccw_err_bound_b: f64,
    /// orient2d, first order tail correction.
    pub ccw_err_bound_c: f64,
    /// incircle, floating point estimate.
    pub icc_err_bound_a: f64,
    /// incircle, expansion of the rounded differences.
    pub icc_err_bound_b: f64,
    /// incircle, first order tail correction.
    pub icc_err_bound_c: f64,
    /// `true` if the measurement observed rounding to a wider precision than `f64`.
    ///
    /// The bounds are derived from the `f64` unit roundoff in that case.
    pub extended_precision: bool,
}

impl ErrorBounds {
    /// Measures the floating point unit and derives all bounds from the result.
    ///
    /// Epsilon is found by halving until adding it to one has no effect any more. The
    /// splitter is doubled every other halving.
    pub fn measure() -> Self {
        let mut every_other = true;
        let mut epsilon = 1.0f64;
        let mut splitter = 1.0f64;
        let mut check = 1.0f64;
        loop {
            let last_check = check;
            epsilon *= 0.5;
            if every_other {
                splitter *= 2.0;
            }
            every_other = !every_other;
            check = std::hint::black_box(1.0 + epsilon);
            if check == 1.0 || check == last_check {
                break;
            }
        }
        splitter += 1.0;

        if epsilon < F64_UNIT_ROUNDOFF {
            log::warn!(
                "measured epsilon {:e} is below the f64 unit roundoff, extended precision \
                 rounding detected",
                epsilon
            );
            return ErrorBounds {
                extended_precision: true,
                ..Self::from_epsilon(F64_UNIT_ROUNDOFF)
            };
        }

        let result = Self::from_epsilon(epsilon);
        debug_assert_eq!(result.splitter, splitter);
        result
    }

    /// Derives all constants from a given epsilon, which must be a power of two.
    pub fn from_epsilon(epsilon: f64) -> Self {
        // epsilon == 2^-precision
        let precision = -epsilon.log2().round() as i32;
        let splitter = 2.0f64.powi((precision + 1) / 2) + 1.0;

        ErrorBounds {
            epsilon,
            splitter,
            result_err_bound: (3.0 + 8.0 * epsilon) * epsilon,
            ccw_err_bound_a: (3.0 + 16.0 * epsilon) * epsilon,
            ccw_err_bound_b: (2.0 + 12.0 * epsilon) * epsilon,
            ccw_err_bound_c: (9.0 + 64.0 * epsilon) * epsilon * epsilon,
            icc_err_bound_a: (10.0 + 96.0 * epsilon) * epsilon,
            icc_err_bound_b: (4.0 + 48.0 * epsilon) * epsilon,
            icc_err_bound_c: (44.0 + 576.0 * epsilon) * epsilon * epsilon,
            extended_precision: false,
        }
    }

    fn log_constants(&self) {
        log::info!("epsilon: {:e}", self.epsilon);
        log::info!("splitter: {}", self.splitter);
        log::info!("result error bound: {:e}", self.result_err_bound);
        log::info!(
            "orient2d error bounds: A {:e}, B {:e}, C {:e}",
            self.ccw_err_bound_a,
            self.ccw_err_bound_b,
            self.ccw_err_bound_c
        );
        log::info!(
            "incircle error bounds: A {:e}, B {:e}, C {:e}",
            self.icc_err_bound_a,
            self.icc_err_bound_b,
            self.icc_err_bound_c
        );
        if self.extended_precision {
            log::info!("extended precision rounding compensated");
        }
    }
}

/// Initializes the process wide error bound table and returns it.
///
/// Calling this function is optional, the predicates initialize the table lazily. It is
/// idempotent and thread safe: the table is measured exactly once. If `verbose` is set,
/// the constants are logged with level `info`.
pub fn initialize(verbose: bool) -> &'static ErrorBounds {
    let bounds = bounds();
    if verbose {
        bounds.log_constants();
    }
    bounds
}

/// Returns the process wide error bound table, measuring it on first use.
#[inline]
pub fn bounds() -> &'static ErrorBounds {
    BOUNDS.get_or_init(|| {
        let bounds = ErrorBounds::measure();
        log::debug!("error bound table initialized (epsilon {:e})", bounds.epsilon);
        bounds
    })
}
