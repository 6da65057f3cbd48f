use crate::domain::money::{round_half_away, sum};
use crate::domain::{Money, Wave, Weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregate profitability of a single wave
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfitReport {
    /// Number of parcels across all trips
    pub total_parcels: usize,

    /// Total parcel weight
    pub total_weight: Weight,

    /// Sum of parcel prices
    pub total_revenue: Money,

    /// Sum of wave costs
    pub total_costs: Money,

    /// Revenue minus costs, may be negative
    pub net_profit: Money,

    /// Net profit as a percentage of revenue
    pub profit_rate: Decimal,

    /// True only when net profit is strictly positive
    pub is_profitable: bool,
}

/// Per-trip revenue and load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripSummary {
    pub trip_id: u64,
    pub parcels: usize,
    pub weight: Weight,
    pub revenue: Money,
}

/// Precision applied when aggregates leave the calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoundingPolicy {
    /// Decimal places for money and the profit rate
    pub money_dp: u32,

    /// Decimal places for weight
    pub weight_dp: u32,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            money_dp: 2,
            weight_dp: 3,
        }
    }
}

/// Computes wave profitability.
///
/// Sums are accumulated in full decimal precision and rounded half away from
/// zero only once per aggregate. Net profit is the difference of the already
/// rounded revenue and costs, so `net_profit == total_revenue - total_costs`
/// holds exactly for every report within the decimal range.
///
/// The calculator never panics. Aggregates that leave the range of
/// `Decimal` saturate at `Decimal::MAX` or `Decimal::MIN`, and a profit rate
/// too large to represent saturates by the sign of the net profit.
#[derive(Debug, Clone, Default)]
pub struct ProfitCalculator {
    policy: RoundingPolicy,
}

impl ProfitCalculator {
    /// Creates a calculator with the given rounding policy
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Computes the profit report for a wave
    pub fn compute_wave_profit(&self, wave: &Wave) -> ProfitReport {
        let money_dp = self.policy.money_dp;

        let total_parcels = wave.parcel_count();
        let total_weight = round_half_away(sum(wave.parcels().map(|p| p.weight)), self.policy.weight_dp);
        let total_revenue = round_half_away(sum(wave.parcels().map(|p| p.price)), money_dp);
        let total_costs = round_half_away(sum(wave.costs.iter().map(|c| c.amount)), money_dp);

        // Both operands are already at money_dp, the difference is exact
        let net_profit = round_half_away(total_revenue.saturating_sub(total_costs), money_dp);

        let profit_rate = if total_revenue > Decimal::ZERO {
            let rate = net_profit
                .checked_div(total_revenue)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or_else(|| saturate_like(net_profit));
            round_half_away(rate, money_dp)
        } else {
            round_half_away(Decimal::ZERO, money_dp)
        };

        let is_profitable = net_profit > Decimal::ZERO;

        debug!(
            "Wave {}: {} parcels, revenue {}, costs {}, net {} ({}%)",
            wave.id, total_parcels, total_revenue, total_costs, net_profit, profit_rate
        );

        ProfitReport {
            total_parcels,
            total_weight,
            total_revenue,
            total_costs,
            net_profit,
            profit_rate,
            is_profitable,
        }
    }

    /// Summarizes load and revenue per trip, in trip order
    pub fn trip_breakdown(&self, wave: &Wave) -> Vec<TripSummary> {
        wave.trips
            .iter()
            .map(|trip| TripSummary {
                trip_id: trip.id,
                parcels: trip.parcels.len(),
                weight: round_half_away(sum(trip.parcels.iter().map(|p| p.weight)), self.policy.weight_dp),
                revenue: round_half_away(sum(trip.parcels.iter().map(|p| p.price)), self.policy.money_dp),
            })
            .collect()
    }
}

/// Bound of the decimal range on the side of `value`'s sign
fn saturate_like(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Computes the profit report for a wave using the default rounding policy
pub fn compute_wave_profit(wave: &Wave) -> ProfitReport {
    ProfitCalculator::default().compute_wave_profit(wave)
}
