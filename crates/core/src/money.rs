//! Currency arithmetic.
//!
//! Amounts are carried as `f64` major units (`10.99`) because that is what
//! the JSON contract exposes. Every aggregate amount is passed through
//! [`round_to_cents`] so binary representation error never leaks out
//! (`10.99 * 3` is `32.97`, not `32.970000000000006`).

/// Round an amount to two decimal places (scale by 100, round, unscale).
///
/// Halves round away from zero, which for the non-negative amounts a cart
/// or order can hold is round-half-up on the cent boundary.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Sum `price * quantity` over `lines` and round the result to cents.
pub fn line_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i64)>,
{
    let raw: f64 = lines
        .into_iter()
        .map(|(price, quantity)| price * quantity as f64)
        .sum();
    round_to_cents(raw)
}
