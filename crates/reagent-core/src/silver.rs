use fixed::types::U64F64;

/// Unsigned 64.64 fixed-point currency. Exact for every whole-silver price and
/// for the products and sums the resolver forms from them.
pub type Silver = U64F64;

/// Convert an f64 to Silver. NaN and negative values become zero; values past
/// the representable range saturate.
#[inline]
pub fn f64_to_silver(v: f64) -> Silver {
    if v.is_nan() || v <= 0.0 {
        return Silver::ZERO;
    }
    Silver::saturating_from_num(v)
}

/// Convert Silver to f64. Use only for display and serialization.
#[inline]
pub fn silver_to_f64(v: Silver) -> f64 {
    v.to_num::<f64>()
}

/// `quantity * unit_price`, saturating at [`Silver::MAX`].
#[inline]
pub fn cost_of(quantity: u64, unit_price: Silver) -> Silver {
    unit_price.saturating_mul_int(u128::from(quantity))
}
