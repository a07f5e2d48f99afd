//! FundMe Contracts
//!
//! Casper crowdfunding ledger with a USD-denominated minimum contribution.
//!
//! ## Architecture
//!
//! - **FundMe**: Contribution ledger, owner-gated withdrawal
//! - **FeedRateSource**: Cross-contract reads from the CSPR/USD oracle
//! - **MockV3Aggregator**: Configurable price feed for local networks
//! - **price_converter**: Motes to USD conversion over any `RateSource`
//!
//! ## Lifecycle
//!
//! Contributions accumulate until the owner withdraws. A withdrawal zeroes
//! every funder's entry, clears the funder list and pays the whole purse to
//! the owner in one atomic call, after which funding starts over.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod price_converter;
pub mod price_feed;

// Contract modules
pub mod fund_me;
pub mod mock_aggregator;
