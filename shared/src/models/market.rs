//! Simulated commodity market prices
//!
//! There is no live feed behind these numbers. Each request draws a fresh
//! fluctuation around a fixed base price; nothing carries over between calls.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::timestamp;

/// Fixed USD → INR conversion rate (83.5)
pub const EXCHANGE_RATE_USD_INR: Decimal = Decimal::from_parts(835, 0, 0, false, 1);

/// Largest relative move from the base price in either direction
pub const MAX_FLUCTUATION: f64 = 0.15;

/// Moves beyond this fraction are labelled as a trend
pub const TREND_THRESHOLD: f64 = 0.02;

pub const CURRENCY_USD: &str = "USD";
pub const CURRENCY_INR: &str = "INR";

/// A tracked commodity and its reference price
#[derive(Debug, Clone, PartialEq)]
pub struct Commodity {
    pub name: &'static str,
    pub base_price_usd: Decimal,
    pub unit: &'static str,
}

/// Commodities quoted by the market endpoint
pub fn commodities() -> Vec<Commodity> {
    vec![
        Commodity { name: "wheat", base_price_usd: Decimal::new(650, 2), unit: "per bushel" },
        Commodity { name: "corn", base_price_usd: Decimal::new(480, 2), unit: "per bushel" },
        Commodity { name: "soybeans", base_price_usd: Decimal::new(1320, 2), unit: "per bushel" },
        Commodity { name: "rice", base_price_usd: Decimal::new(1540, 2), unit: "per cwt" },
        Commodity { name: "cotton", base_price_usd: Decimal::new(72, 2), unit: "per lb" },
        Commodity { name: "sugarcane", base_price_usd: Decimal::new(3500, 2), unit: "per ton" },
        Commodity { name: "turmeric", base_price_usd: Decimal::new(185, 2), unit: "per kg" },
        Commodity { name: "coffee", base_price_usd: Decimal::new(210, 2), unit: "per lb" },
    ]
}

/// Direction label for a simulated move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Stable,
}

impl MarketTrend {
    pub fn from_fluctuation(fluctuation: f64) -> Self {
        if fluctuation > TREND_THRESHOLD {
            MarketTrend::Bullish
        } else if fluctuation < -TREND_THRESHOLD {
            MarketTrend::Bearish
        } else {
            MarketTrend::Stable
        }
    }
}

/// A simulated quote in both currencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub id: Uuid,
    pub commodity: String,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price_inr: Decimal,
    pub currency_usd: String,
    pub currency_inr: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,
    pub market_trend: MarketTrend,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}

/// Quote a commodity at a given fluctuation.
///
/// The move is truncated toward zero at cent precision, so the quote never
/// leaves `base × [1 - |fluctuation|, 1 + |fluctuation|]`.
pub fn price_at(commodity: &Commodity, fluctuation: f64) -> MarketPrice {
    let fluctuation = fluctuation.clamp(-MAX_FLUCTUATION, MAX_FLUCTUATION);
    let factor = Decimal::from_f64_retain(fluctuation).unwrap_or(Decimal::ZERO);

    let movement = (commodity.base_price_usd * factor)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let current_price_usd = commodity.base_price_usd + movement;

    MarketPrice {
        id: Uuid::new_v4(),
        commodity: commodity.name.to_string(),
        unit: commodity.unit.to_string(),
        base_price_usd: commodity.base_price_usd,
        current_price_usd,
        current_price_inr: (current_price_usd * EXCHANGE_RATE_USD_INR).round_dp(2),
        currency_usd: CURRENCY_USD.to_string(),
        currency_inr: CURRENCY_INR.to_string(),
        exchange_rate: EXCHANGE_RATE_USD_INR,
        change_percent: (factor * Decimal::ONE_HUNDRED).round_dp(2),
        market_trend: MarketTrend::from_fluctuation(fluctuation),
        last_updated: Utc::now(),
    }
}

/// Draw a fresh quote for one commodity
pub fn simulate_price<R: Rng + ?Sized>(commodity: &Commodity, rng: &mut R) -> MarketPrice {
    let fluctuation = rng.gen_range(-MAX_FLUCTUATION..=MAX_FLUCTUATION);
    price_at(commodity, fluctuation)
}

/// Draw fresh quotes for every tracked commodity
pub fn simulate_market<R: Rng + ?Sized>(rng: &mut R) -> Vec<MarketPrice> {
    commodities()
        .iter()
        .map(|commodity| simulate_price(commodity, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn within_band(price: &MarketPrice) -> bool {
        let fraction = Decimal::from_f64_retain(MAX_FLUCTUATION).unwrap();
        let low = price.base_price_usd * (Decimal::ONE - fraction);
        let high = price.base_price_usd * (Decimal::ONE + fraction);
        price.current_price_usd >= low && price.current_price_usd <= high
    }

    #[test]
    fn test_flat_market_is_stable() {
        let wheat = &commodities()[0];
        let price = price_at(wheat, 0.0);
        assert_eq!(price.current_price_usd, wheat.base_price_usd);
        assert_eq!(price.change_percent, Decimal::ZERO);
        assert_eq!(price.market_trend, MarketTrend::Stable);
    }

    #[test]
    fn test_dual_currency_fields() {
        let corn = &commodities()[1];
        let price = price_at(corn, 0.10);
        assert_eq!(price.current_price_usd, Decimal::new(528, 2));
        assert_eq!(price.current_price_inr, Decimal::new(44088, 2));
        assert_eq!(price.change_percent, Decimal::new(1000, 2));
        assert_eq!(price.market_trend, MarketTrend::Bullish);

        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["exchange_rate"], 83.5);
        assert_eq!(json["currency_usd"], "USD");
        assert_eq!(json["currency_inr"], "INR");
        assert_eq!(json["market_trend"], "bullish");
    }

    #[test]
    fn test_includes_indian_crops() {
        let names: Vec<_> = commodities().iter().map(|c| c.name).collect();
        assert!(names.contains(&"sugarcane"));
        assert!(names.contains(&"turmeric"));
    }

    #[test]
    fn test_seeded_market_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            for price in simulate_market(&mut rng) {
                assert!(within_band(&price), "{:?}", price);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_price_within_band(index in 0usize..8, fluctuation in -0.15f64..=0.15) {
            let commodity = &commodities()[index];
            let price = price_at(commodity, fluctuation);
            prop_assert!(within_band(&price));
        }

        #[test]
        fn prop_change_percent_matches_price(index in 0usize..8, fluctuation in -0.15f64..=0.15) {
            let commodity = &commodities()[index];
            let price = price_at(commodity, fluctuation);

            let implied = (price.current_price_usd / price.base_price_usd - Decimal::ONE)
                * Decimal::ONE_HUNDRED;
            // One cent of truncation on the price plus half a basis point on the percent
            let tolerance = Decimal::ONE / price.base_price_usd + Decimal::new(5, 3);
            prop_assert!((implied - price.change_percent).abs() <= tolerance);
        }
    }
}
