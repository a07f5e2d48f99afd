//! FundMe Contract
//!
//! Accepts CSPR contributions worth at least a minimum USD value and lets the
//! owner withdraw everything.
//!
//! ## Ledger
//!
//! - `address_to_amount_funded`: cumulative motes per funder
//! - `funders`: one slot per accepted contribution, in insertion order
//!   (a funder appears once per contribution)
//! - `total_funded`: running sum of the ledger, equal to the contract purse
//!   while no withdrawal is in flight
//!
//! ## Withdrawal
//!
//! `withdraw` and `cheaper_withdraw` leave identical state. The first reads
//! the funder list from storage on every iteration, the second loads it once.
//! Both commit every reset before paying the owner, so a contract owner that
//! calls back into FundMe from `receive_payout` sees an empty ledger.

use odra::prelude::*;
use odra::casper_types::{RuntimeArgs, U256, U512};
use odra::CallDef;

use crate::errors::FundMeError;
use crate::price_converter::{self, u256_to_u512, u512_to_u256, NATIVE_DECIMALS};
use crate::price_feed::FeedRateSource;
use crate::types::FundMeConfig;

/// Entry point a contract owner must expose to receive payouts
pub const RECEIVE_PAYOUT_ENTRY_POINT: &str = "receive_payout";

/// Emitted for every accepted contribution
#[odra::event]
pub struct Funded {
    pub funder: Address,
    pub amount: U256,
    pub usd_value: U256,
}

/// Emitted when the owner drains the contract
#[odra::event]
pub struct Withdrawn {
    pub recipient: Address,
    pub amount: U512,
    pub funders_reset: u32,
}

/// FundMe Contract
#[odra::module(events = [Funded, Withdrawn])]
pub struct FundMe {
    /// Deployer, immutable
    owner: Var<Address>,
    /// Price feed contract, immutable
    price_feed: Var<Address>,
    /// Contribution rules
    config: Var<FundMeConfig>,
    /// Cumulative contribution per funder
    address_to_amount_funded: Mapping<Address, U256>,
    /// Funder list: index -> funder
    funders: Mapping<u32, Address>,
    /// Funder list length
    funders_count: Var<u32>,
    /// Sum of all ledger entries
    total_funded: Var<U256>,
}

#[odra::module]
impl FundMe {
    /// Initialize with the price feed address; the caller becomes owner
    pub fn init(&mut self, price_feed: Address) {
        let owner = self.env().caller();
        self.owner.set(owner);
        self.price_feed.set(price_feed);
        self.config.set(FundMeConfig::default());
        self.funders_count.set(0);
        self.total_funded.set(U256::zero());
    }

    // ========== Contribution ==========

    /// Contribute the attached CSPR
    #[odra(payable)]
    pub fn fund(&mut self) {
        let funder = self.env().caller();
        let amount = unwrap_or_revert(&self.env(), u512_to_u256(self.env().attached_value()));

        let usd_value = self.get_conversion_rate(amount);
        if usd_value < self.get_minimum_usd() {
            self.env().revert(FundMeError::InsufficientContribution);
        }

        let funded = self.get_address_to_amount_funded(funder);
        let funded = self.checked_add(funded, amount);
        let total = self.checked_add(self.get_total_funded(), amount);

        self.address_to_amount_funded.set(&funder, funded);
        let index = self.get_funders_count();
        self.funders.set(&index, funder);
        self.funders_count.set(index + 1);
        self.total_funded.set(total);

        self.env().emit_event(Funded {
            funder,
            amount,
            usd_value,
        });
    }

    // ========== Withdrawal (Owner Only) ==========

    /// Withdraw everything, reading each funder slot from storage
    pub fn withdraw(&mut self) {
        self.require_owner();

        let mut index = 0u32;
        while index < self.get_funders_count() {
            if let Some(funder) = self.funders.get(&index) {
                self.address_to_amount_funded.set(&funder, U256::zero());
            }
            index += 1;
        }

        self.reset_and_pay_out();
    }

    /// Withdraw everything, loading the funder list once
    pub fn cheaper_withdraw(&mut self) {
        self.require_owner();

        let funders = self.load_funders();
        for funder in funders.iter() {
            self.address_to_amount_funded.set(funder, U256::zero());
        }

        self.reset_and_pay_out();
    }

    // ========== View Functions ==========

    /// Get owner address
    pub fn get_owner(&self) -> Address {
        match self.owner.get() {
            Some(owner) => owner,
            None => self.env().revert(FundMeError::InvalidConfig),
        }
    }

    /// Check if account is the owner
    pub fn is_owner(&self, account: Address) -> bool {
        self.owner.get() == Some(account)
    }

    /// Get price feed address
    pub fn get_price_feed(&self) -> Address {
        match self.price_feed.get() {
            Some(feed) => feed,
            None => self.env().revert(FundMeError::PriceUnavailable),
        }
    }

    /// Get cumulative amount funded by `funder`
    pub fn get_address_to_amount_funded(&self, funder: Address) -> U256 {
        self.address_to_amount_funded.get(&funder).unwrap_or_default()
    }

    /// Get funder at `index` in the funder list
    pub fn get_funder(&self, index: u32) -> Address {
        if index >= self.get_funders_count() {
            self.env().revert(FundMeError::IndexOutOfRange);
        }
        match self.funders.get(&index) {
            Some(funder) => funder,
            None => self.env().revert(FundMeError::IndexOutOfRange),
        }
    }

    /// Get funder list length
    pub fn get_funders_count(&self) -> u32 {
        self.funders_count.get().unwrap_or(0)
    }

    /// Get sum of all ledger entries
    pub fn get_total_funded(&self) -> U256 {
        self.total_funded.get().unwrap_or_default()
    }

    /// Get minimum contribution in USD (scaled by 1e18)
    pub fn get_minimum_usd(&self) -> U256 {
        self.config.get().unwrap_or_default().minimum_usd
    }

    /// Get USD value (scaled by 1e18) of `amount` motes at the current price
    pub fn get_conversion_rate(&self, amount: U256) -> U256 {
        let env = self.env();
        let source = FeedRateSource::new(&env, self.get_price_feed());
        unwrap_or_revert(
            &env,
            price_converter::get_conversion_rate(amount, &source, NATIVE_DECIMALS),
        )
    }

    // ========== Internal Functions ==========

    fn require_owner(&self) {
        if !self.is_owner(self.env().caller()) {
            self.env().revert(FundMeError::NotOwner);
        }
    }

    fn load_funders(&self) -> Vec<Address> {
        let count = self.get_funders_count();
        (0..count).filter_map(|index| self.funders.get(&index)).collect()
    }

    /// Clear the funder list and total, then pay the whole purse to the owner.
    fn reset_and_pay_out(&mut self) {
        let funders_reset = self.get_funders_count();
        let tracked = u256_to_u512(self.get_total_funded());

        self.funders_count.set(0);
        self.total_funded.set(U256::zero());

        let balance = self.env().self_balance();
        // Purse desync guard: the purse must cover every tracked contribution
        if balance < tracked {
            self.env().revert(FundMeError::TransferFailed);
        }

        let owner = self.get_owner();
        if !balance.is_zero() {
            self.pay_out(owner, balance);
        }

        self.env().emit_event(Withdrawn {
            recipient: owner,
            amount: balance,
            funders_reset,
        });
    }

    fn pay_out(&self, recipient: Address, amount: U512) {
        if recipient.is_contract() {
            let call_def = CallDef::new(RECEIVE_PAYOUT_ENTRY_POINT, true, RuntimeArgs::new())
                .with_amount(amount);
            let accepted: bool = self.env().call_contract(recipient, call_def);
            if !accepted {
                self.env().revert(FundMeError::TransferFailed);
            }
        } else {
            self.env().transfer_tokens(&recipient, &amount);
        }
    }

    fn checked_add(&self, a: U256, b: U256) -> U256 {
        unwrap_or_revert(&self.env(), a.checked_add(b).ok_or(FundMeError::AmountOverflow))
    }
}

fn unwrap_or_revert<T>(env: &odra::ContractEnv, result: Result<T, FundMeError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => env.revert(error),
    }
}
