//! Mock price feed for local networks and tests.
//!
//! Reports a configurable answer with fixed decimals and keeps per-round
//! history the way a production aggregator does.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::errors::FundMeError;
use crate::price_converter::PRICE_DECIMALS;
use crate::types::RoundData;

/// Decimals used by CSPR/USD feeds on development networks
pub const DEFAULT_DECIMALS: u8 = 8;

/// Starting answer on development networks ($2000 with 8 decimals)
pub const DEFAULT_INITIAL_ANSWER: u64 = 200_000_000_000;

/// Emitted whenever a new answer is recorded
#[odra::event]
pub struct AnswerUpdated {
    pub current: U256,
    pub round_id: u64,
    pub updated_at: u64,
}

/// Mock aggregator contract
#[odra::module(events = [AnswerUpdated])]
pub struct MockV3Aggregator {
    /// Decimals of every answer
    decimals: Var<u8>,
    /// Latest answer
    latest_answer: Var<U256>,
    /// Timestamp of the latest answer
    latest_timestamp: Var<u64>,
    /// Latest round id
    latest_round: Var<u64>,
    /// Round history
    rounds: Mapping<u64, RoundData>,
}

#[odra::module]
impl MockV3Aggregator {
    /// Initialize with feed decimals and a first answer
    pub fn init(&mut self, decimals: u8, initial_answer: U256) {
        if decimals > PRICE_DECIMALS {
            self.env().revert(FundMeError::InvalidConfig);
        }
        self.decimals.set(decimals);
        self.latest_round.set(0);
        self.update_answer(initial_answer);
    }

    /// Record a new answer in a new round
    pub fn update_answer(&mut self, answer: U256) {
        let now = self.env().get_block_time();
        let round_id = self.latest_round() + 1;

        self.latest_answer.set(answer);
        self.latest_timestamp.set(now);
        self.latest_round.set(round_id);
        self.rounds.set(
            &round_id,
            RoundData {
                round_id,
                answer,
                started_at: now,
                updated_at: now,
                answered_in_round: round_id,
            },
        );

        self.env().emit_event(AnswerUpdated {
            current: answer,
            round_id,
            updated_at: now,
        });
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(DEFAULT_DECIMALS)
    }

    pub fn latest_answer(&self) -> U256 {
        self.latest_answer.get().unwrap_or_default()
    }

    pub fn latest_timestamp(&self) -> u64 {
        self.latest_timestamp.get().unwrap_or(0)
    }

    pub fn latest_round(&self) -> u64 {
        self.latest_round.get().unwrap_or(0)
    }

    /// Latest round data
    pub fn latest_round_data(&self) -> RoundData {
        self.get_round_data(self.latest_round())
    }

    /// Data for a given round; unknown rounds read as zeroed
    pub fn get_round_data(&self, round_id: u64) -> RoundData {
        self.rounds.get(&round_id).unwrap_or_default()
    }
}
