/// Decimal places kept for reported measurements.
pub const DECIMAL_PLACES: i32 = 3;

/// Round `value` to [`DECIMAL_PLACES`].
pub fn round(value: f64) -> f64 {
    let factor = 10f64.powi(DECIMAL_PLACES);
    (value * factor).round() / factor
}
