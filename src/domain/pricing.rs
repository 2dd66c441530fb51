//! Final price computation.

/// Rounds to two decimal places, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Applies a percentage surcharge factor (1.04 = +4%) to a multiplier.
pub fn apply_surcharge(multiplier: f64, factor: f64) -> f64 {
    round_to_cents(multiplier * factor)
}

/// `base_cost × multiplier`, rounded to cents. Zero and negative costs pass
/// through unchanged in sign.
pub fn compute_final_price(base_cost: f64, multiplier: f64) -> f64 {
    round_to_cents(base_cost * multiplier)
}
