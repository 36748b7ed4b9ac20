//! Integer division with explicit rounding, used for bounds reasoning.
//!
//! Linear sums are computed in `i128`: a sum of `i64` coefficients times `i32` values cannot
//! overflow it for any number of terms a model can hold.

/// `numerator / denominator` rounded towards negative infinity.
pub(crate) fn div_floor(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    if (numerator % denominator != 0) && ((numerator < 0) != (denominator < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// `numerator / denominator` rounded towards positive infinity.
pub(crate) fn div_ceil(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    if (numerator % denominator != 0) && ((numerator < 0) == (denominator < 0)) {
        quotient + 1
    } else {
        quotient
    }
}

/// Converts a bound to `i64`, saturating at the extremes.
///
/// Domains only hold `i32` values, so a saturated bound prunes exactly like the exact one.
pub(crate) fn saturating_i64(value: i128) -> i64 {
    value.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}
