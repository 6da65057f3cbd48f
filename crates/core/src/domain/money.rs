use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary amount in the wave's single currency
pub type Money = Decimal;

/// Parcel weight in kilograms
pub type Weight = Decimal;

/// Rounds a value half away from zero to `dp` decimal places.
///
/// The result always carries exactly `dp` fractional digits, so `5.5` rounded
/// to three places renders as `5.500`.
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Sums decimals without intermediate rounding, saturating at
/// `Decimal::MAX` / `Decimal::MIN` instead of overflowing
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}
