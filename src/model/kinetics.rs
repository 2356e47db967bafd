//! Shared kinetic functions and numeric guards
//!
//! Kinetic functions guard their own singularities: saturation denominators
//! can reach zero and the Goldbeter-Koshland discriminant can go negative,
//! and the policy for these expected edge cases is coercion to zero inside
//! the function, never recovery in the driver.

/// Coerce NaN and infinities to zero.
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Clamp to zero from below.
pub fn non_negative(x: f64) -> f64 {
    x.max(0.0)
}

fn b_term(a1: f64, a2: f64, a3: f64, a4: f64) -> f64 {
    a2 - a1 + a3 * a2 + a4 * a1
}

/// Goldbeter-Koshland function for zero-order ultrasensitive switches,
/// as used by the generic cell-cycle model (Csikász-Nagy et al. 2006).
///
/// `a1`/`a2` are the activating and inhibiting rates, `a3`/`a4` their
/// saturation constants. Degenerate arguments (all-zero inhibition, a
/// negative discriminant) yield 0 rather than NaN.
pub fn goldbeter_koshland(a1: f64, a2: f64, a3: f64, a4: f64) -> f64 {
    let b = b_term(a1, a2, a3, a4);
    let discriminant = b * b - 4.0 * (a2 - a1) * a4 * a1;
    finite_or_zero(2.0 * a4 * a1 / (b + discriminant.sqrt()))
}
