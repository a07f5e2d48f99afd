//! Price feed integration.
//!
//! The FundMe contract only needs two things from a feed: the latest answer
//! and its decimal precision. Any contract exposing `decimals() -> u8` and
//! `latest_round_data() -> RoundData` can serve as the oracle, including
//! `MockV3Aggregator` on local networks.

use odra::prelude::*;
use odra::casper_types::{RuntimeArgs, U256};
use odra::CallDef;

use crate::price_converter::RateSource;
use crate::types::RoundData;

/// `RateSource` backed by an on-chain price feed contract.
pub struct FeedRateSource<'a> {
    env: &'a odra::ContractEnv,
    feed: Address,
}

impl<'a> FeedRateSource<'a> {
    pub fn new(env: &'a odra::ContractEnv, feed: Address) -> Self {
        Self { env, feed }
    }
}

impl RateSource for FeedRateSource<'_> {
    fn latest_answer(&self) -> U256 {
        let call_def = CallDef::new("latest_round_data", false, RuntimeArgs::new());
        self.env
            .call_contract::<RoundData>(self.feed, call_def)
            .answer
    }

    fn decimals(&self) -> u8 {
        let call_def = CallDef::new("decimals", false, RuntimeArgs::new());
        self.env.call_contract::<u8>(self.feed, call_def)
    }
}
