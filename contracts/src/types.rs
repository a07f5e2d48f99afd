//! Common types shared by the FundMe contract and its price feed.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::price_converter::USD_SCALE;

/// Default minimum contribution in whole USD
pub const DEFAULT_MINIMUM_USD: u64 = 50;

/// FundMe configuration, fixed at construction
#[odra::odra_type]
pub struct FundMeConfig {
    /// Minimum contribution value in USD (scaled by 1e18)
    pub minimum_usd: U256,
}

impl Default for FundMeConfig {
    fn default() -> Self {
        Self {
            minimum_usd: U256::from(DEFAULT_MINIMUM_USD) * U256::from(USD_SCALE),
        }
    }
}

/// Round data reported by a price feed
#[odra::odra_type]
#[derive(Default)]
pub struct RoundData {
    /// Round identifier
    pub round_id: u64,
    /// Price answer, scaled by the feed's decimals
    pub answer: U256,
    /// Timestamp when the round started
    pub started_at: u64,
    /// Timestamp of the last update in this round
    pub updated_at: u64,
    /// Round in which the answer was computed
    pub answered_in_round: u64,
}
