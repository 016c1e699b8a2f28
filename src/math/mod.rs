//! Miscellaneous math functions for general use

/// Round `value` to `digits` decimal digits, with ties going to the even
/// neighbour. Negative `digits` round to tens, hundreds, etc.
#[must_use]
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if digits < 0 {
        let scale = 10_f64.powi(digits.checked_neg().unwrap_or(i32::MAX));
        // Coarser than the largest representable magnitude: everything is zero
        if !scale.is_finite() {
            return 0_f64.copysign(value);
        }
        return (value / scale).round_ties_even() * scale;
    }
    let scale = 10_f64.powi(digits);
    let scaled = value * scale;
    // Beyond the representable precision, rounding is a no-op
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

/// `Some(value)` if `value` is finite, `None` otherwise
#[must_use]
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

// ----- T E S T S ---------------------------------------------------------------------
