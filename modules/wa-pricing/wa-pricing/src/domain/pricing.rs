//! Price formula: category base rate, single-step volume discount, optional
//! currency conversion.
//!
//! All arithmetic is exact decimal. Rounding happens once, when amounts are
//! formatted into the fixed-point strings of a [`Quote`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use wa_pricing_sdk::models::{Currency, MessageCategory, Quote, QuoteRequest};

/// Decimal places of `Quote::total_cost`.
pub const TOTAL_COST_DP: u32 = 2;
/// Decimal places of `Quote::cost_per_message`.
pub const UNIT_COST_DP: u32 = 4;
/// Decimal places of `Quote::exchange_rate`.
pub const EXCHANGE_RATE_DP: u32 = 2;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PricingTableError {
    #[error("rate for '{category}' must not be negative")]
    NegativeRate { category: &'static str },

    #[error("tier #{index}: discount must be within [0, 1)")]
    DiscountOutOfRange { index: usize },

    #[error("tier #{index}: upper bound must be greater than the previous one")]
    TiersNotIncreasing { index: usize },

    #[error("tier #{index}: only the last tier may be unbounded")]
    UnboundedTierNotLast { index: usize },

    #[error("the last tier must be unbounded (no 'up_to')")]
    MissingUnboundedTier,

    #[error("BRL exchange rate must be positive")]
    NonPositiveExchangeRate,

    #[error("amount overflows decimal range")]
    Overflow,
}

/// Base USD rate of one message category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRate {
    pub usd_rate: Decimal,
    /// Whether the volume tiers apply to this category.
    #[serde(default)]
    pub volume_discount: bool,
}

/// Inclusive upper bound and the discount applied to the whole volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<u64>,
    pub discount: Decimal,
}

impl VolumeTier {
    #[must_use]
    pub const fn bounded(up_to: u64, discount: Decimal) -> Self {
        Self {
            up_to: Some(up_to),
            discount,
        }
    }

    #[must_use]
    pub const fn unbounded(discount: Decimal) -> Self {
        Self {
            up_to: None,
            discount,
        }
    }

    fn contains(&self, volume: u64) -> bool {
        self.up_to.is_none_or(|bound| volume <= bound)
    }
}

/// Read-only pricing constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingTable {
    pub marketing: CategoryRate,
    pub utility: CategoryRate,
    pub authentication: CategoryRate,
    /// Ordered by `up_to`; the last tier is unbounded.
    pub tiers: Vec<VolumeTier>,
    /// BRL per USD.
    pub brl_exchange_rate: Decimal,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            marketing: CategoryRate {
                usd_rate: Decimal::new(625, 4),
                volume_discount: false,
            },
            utility: CategoryRate {
                usd_rate: Decimal::new(80, 4),
                volume_discount: true,
            },
            authentication: CategoryRate {
                usd_rate: Decimal::new(315, 4),
                volume_discount: true,
            },
            tiers: vec![
                VolumeTier::bounded(250_000, Decimal::ZERO),
                VolumeTier::bounded(2_000_000, Decimal::new(5, 2)),
                VolumeTier::bounded(17_000_000, Decimal::new(10, 2)),
                VolumeTier::bounded(35_000_000, Decimal::new(15, 2)),
                VolumeTier::bounded(70_000_000, Decimal::new(20, 2)),
                VolumeTier::unbounded(Decimal::new(25, 2)),
            ],
            brl_exchange_rate: Decimal::new(535, 2),
        }
    }
}

impl PricingTable {
    /// Check the table is usable by [`PricingTable::quote`].
    ///
    /// # Errors
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), PricingTableError> {
        for category in MessageCategory::ALL {
            if self.rate(category).usd_rate.is_sign_negative() {
                return Err(PricingTableError::NegativeRate {
                    category: category.as_str(),
                });
            }
        }

        let last = self.tiers.len().saturating_sub(1);
        let mut previous: Option<u64> = None;
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.discount.is_sign_negative() || tier.discount >= Decimal::ONE {
                return Err(PricingTableError::DiscountOutOfRange { index });
            }
            match tier.up_to {
                Some(bound) => {
                    if previous.is_some_and(|p| bound <= p) {
                        return Err(PricingTableError::TiersNotIncreasing { index });
                    }
                    previous = Some(bound);
                }
                None if index != last => {
                    return Err(PricingTableError::UnboundedTierNotLast { index });
                }
                None => {}
            }
        }
        if self.tiers.last().is_none_or(|t| t.up_to.is_some()) {
            return Err(PricingTableError::MissingUnboundedTier);
        }

        if self.brl_exchange_rate <= Decimal::ZERO {
            return Err(PricingTableError::NonPositiveExchangeRate);
        }
        Ok(())
    }

    #[must_use]
    pub fn rate(&self, category: MessageCategory) -> &CategoryRate {
        match category {
            MessageCategory::Marketing => &self.marketing,
            MessageCategory::Utility => &self.utility,
            MessageCategory::Authentication => &self.authentication,
        }
    }

    /// Discount of the first tier whose bound covers `volume`.
    #[must_use]
    pub fn discount_for(&self, volume: u64) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| tier.contains(volume))
            .map_or(Decimal::ZERO, |tier| tier.discount)
    }

    /// Per-message USD rate after the volume discount, unrounded.
    #[must_use]
    pub fn effective_rate(&self, category: MessageCategory, volume: u64) -> Decimal {
        let rate = self.rate(category);
        if rate.volume_discount {
            rate.usd_rate * (Decimal::ONE - self.discount_for(volume))
        } else {
            rate.usd_rate
        }
    }

    /// Exchange rate from USD into `currency`, `None` for USD itself.
    #[must_use]
    pub fn exchange_rate(&self, currency: Currency) -> Option<Decimal> {
        match currency {
            Currency::Usd => None,
            Currency::Brl => Some(self.brl_exchange_rate),
        }
    }

    /// Compute a quote. The request's volume is assumed already validated.
    ///
    /// # Errors
    /// Returns [`PricingTableError::Overflow`] when the amount does not fit
    /// the decimal range.
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, PricingTableError> {
        let unit_usd = self.effective_rate(request.message_category, request.volume);
        let total_usd = unit_usd
            .checked_mul(Decimal::from(request.volume))
            .ok_or(PricingTableError::Overflow)?;

        let (total, unit, exchange_rate) = match self.exchange_rate(request.currency) {
            None => (total_usd, unit_usd, None),
            Some(fx) => (
                total_usd
                    .checked_mul(fx)
                    .ok_or(PricingTableError::Overflow)?,
                unit_usd.checked_mul(fx).ok_or(PricingTableError::Overflow)?,
                Some(format_fixed(fx, EXCHANGE_RATE_DP)),
            ),
        };

        Ok(Quote {
            total_cost: format_fixed(total, TOTAL_COST_DP),
            cost_per_message: format_fixed(unit, UNIT_COST_DP),
            volume: request.volume,
            currency: request.currency,
            exchange_rate,
        })
    }
}

/// Round half away from zero and render with exactly `dp` decimal places.
#[must_use]
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(volume: u64, category: MessageCategory, currency: Currency) -> QuoteRequest {
        QuoteRequest {
            country: "Brazil".to_owned(),
            volume,
            message_category: category,
            currency,
        }
    }

    fn quote(volume: u64, category: MessageCategory, currency: Currency) -> Quote {
        PricingTable::default()
            .quote(&request(volume, category, currency))
            .unwrap()
    }

    #[test]
    fn default_table_is_valid() {
        assert_eq!(PricingTable::default().validate(), Ok(()));
    }

    #[test]
    fn utility_in_brl_converts_total_and_unit() {
        let q = quote(10_000, MessageCategory::Utility, Currency::Brl);
        assert_eq!(q.total_cost, "428.00");
        assert_eq!(q.cost_per_message, "0.0428");
        assert_eq!(q.exchange_rate.as_deref(), Some("5.35"));
        assert_eq!(q.volume, 10_000);
        assert_eq!(q.currency, Currency::Brl);
    }

    #[test]
    fn authentication_in_ten_percent_tier() {
        let table = PricingTable::default();
        assert_eq!(
            table.effective_rate(MessageCategory::Authentication, 3_000_000),
            Decimal::new(2835, 5)
        );

        let q = quote(3_000_000, MessageCategory::Authentication, Currency::Usd);
        assert_eq!(q.total_cost, "85050.00");
        assert_eq!(q.cost_per_message, "0.0284");
        assert_eq!(q.exchange_rate, None);
    }

    #[test]
    fn marketing_small_volume_in_usd() {
        let q = quote(100, MessageCategory::Marketing, Currency::Usd);
        assert_eq!(q.total_cost, "6.25");
        assert_eq!(q.cost_per_message, "0.0625");
        assert_eq!(q.exchange_rate, None);
    }

    #[test]
    fn marketing_never_discounted() {
        let table = PricingTable::default();
        for volume in [1, 250_001, 3_000_000, 40_000_000, 1_000_000_000] {
            assert_eq!(
                table.effective_rate(MessageCategory::Marketing, volume),
                Decimal::new(625, 4)
            );
        }
    }

    #[test]
    fn tier_bounds_are_inclusive_on_the_lower_tier() {
        let table = PricingTable::default();
        let cases = [
            (250_000, 0),
            (250_001, 5),
            (2_000_000, 5),
            (2_000_001, 10),
            (17_000_000, 10),
            (17_000_001, 15),
            (35_000_000, 15),
            (35_000_001, 20),
            (70_000_000, 20),
            (70_000_001, 25),
        ];
        for (volume, percent) in cases {
            assert_eq!(
                table.discount_for(volume),
                Decimal::new(percent, 2),
                "volume {volume}"
            );
        }
    }

    #[test]
    fn discounted_rate_is_non_increasing_in_volume() {
        let table = PricingTable::default();
        let volumes = [
            1,
            1_000,
            250_000,
            250_001,
            1_999_999,
            2_000_001,
            16_000_000,
            17_000_001,
            35_000_001,
            70_000_001,
            500_000_000,
        ];
        for category in [MessageCategory::Utility, MessageCategory::Authentication] {
            let rates: Vec<Decimal> = volumes
                .iter()
                .map(|v| table.effective_rate(category, *v))
                .collect();
            assert!(rates.windows(2).all(|w| w[1] <= w[0]), "{category}");
        }
    }

    #[test]
    fn brl_amounts_match_converted_usd_amounts() {
        let table = PricingTable::default();
        let fx = Decimal::new(535, 2);
        let categories = [
            MessageCategory::Marketing,
            MessageCategory::Utility,
            MessageCategory::Authentication,
        ];
        let volumes = [1, 777, 250_000, 250_001, 3_000_000, 20_000_000, 40_000_000, 80_000_000];
        for category in categories {
            for volume in volumes {
                let unit = table.effective_rate(category, volume);
                let brl = quote(volume, category, Currency::Brl);
                assert_eq!(
                    brl.total_cost,
                    format_fixed(unit * Decimal::from(volume) * fx, TOTAL_COST_DP),
                    "{category} total at {volume}"
                );
                assert_eq!(
                    brl.cost_per_message,
                    format_fixed(unit * fx, UNIT_COST_DP),
                    "{category} unit at {volume}"
                );
            }
        }
    }

    #[test]
    fn brl_unit_cost_in_fifteen_percent_utility_tier() {
        // 0.0080 * 0.85 * 5.35 = 0.03638
        let q = quote(20_000_000, MessageCategory::Utility, Currency::Brl);
        assert_eq!(q.cost_per_message, "0.0364");
        assert_eq!(q.total_cost, "727600.00");
    }

    #[test]
    fn format_rounds_half_away_from_zero() {
        assert_eq!(format_fixed(Decimal::new(2835, 5), 4), "0.0284");
        assert_eq!(format_fixed(Decimal::new(125, 3), 2), "0.13");
        assert_eq!(format_fixed(Decimal::new(428, 0), 2), "428.00");
        assert_eq!(format_fixed(Decimal::new(-125, 3), 2), "-0.13");
    }

    #[test]
    fn validate_rejects_negative_rate() {
        let mut table = PricingTable::default();
        table.utility.usd_rate = Decimal::new(-1, 2);
        assert_eq!(
            table.validate(),
            Err(PricingTableError::NegativeRate {
                category: "utility"
            })
        );
    }

    #[test]
    fn validate_rejects_full_discount() {
        let mut table = PricingTable::default();
        table.tiers[2].discount = Decimal::ONE;
        assert_eq!(
            table.validate(),
            Err(PricingTableError::DiscountOutOfRange { index: 2 })
        );
    }

    #[test]
    fn validate_rejects_unordered_tiers() {
        let mut table = PricingTable::default();
        table.tiers[1].up_to = Some(100);
        assert_eq!(
            table.validate(),
            Err(PricingTableError::TiersNotIncreasing { index: 1 })
        );
    }

    #[test]
    fn validate_requires_trailing_unbounded_tier() {
        let mut table = PricingTable::default();
        table.tiers.pop();
        assert_eq!(
            table.validate(),
            Err(PricingTableError::MissingUnboundedTier)
        );

        let mut table = PricingTable::default();
        table.tiers[0].up_to = None;
        assert_eq!(
            table.validate(),
            Err(PricingTableError::UnboundedTierNotLast { index: 0 })
        );

        let mut table = PricingTable::default();
        table.tiers.clear();
        assert_eq!(
            table.validate(),
            Err(PricingTableError::MissingUnboundedTier)
        );
    }

    #[test]
    fn validate_rejects_zero_exchange_rate() {
        let table = PricingTable {
            brl_exchange_rate: Decimal::ZERO,
            ..PricingTable::default()
        };
        assert_eq!(
            table.validate(),
            Err(PricingTableError::NonPositiveExchangeRate)
        );
    }

    #[test]
    fn table_deserializes_from_partial_config() {
        let json = serde_json::json!({
            "brl_exchange_rate": "5.10",
            "marketing": { "usd_rate": "0.07" }
        });
        let table: PricingTable = serde_json::from_value(json).unwrap();
        assert_eq!(table.brl_exchange_rate, Decimal::new(510, 2));
        assert_eq!(table.marketing.usd_rate, Decimal::new(7, 2));
        assert!(!table.marketing.volume_discount);
        assert_eq!(table.tiers.len(), 6);
    }
}
