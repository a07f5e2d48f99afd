//! Price conversion between native CSPR amounts and USD.
//!
//! The rate source reports USD per whole native unit with its own decimal
//! precision. The rate is first normalized to 18 decimals and then applied to
//! the raw amount:
//!
//! ```text
//! price     = answer * 10^(18 - feed_decimals)
//! usd_value = amount * price / 10^native_decimals
//! ```
//!
//! `usd_value` is scaled by 1e18. All arithmetic is checked; an amount that
//! would overflow is rejected instead of wrapping.

use odra::casper_types::{U256, U512};
use crate::errors::FundMeError;

/// USD scale (1e18)
pub const USD_SCALE: u128 = 1_000_000_000_000_000_000;

/// Decimals every rate is normalized to
pub const PRICE_DECIMALS: u8 = 18;

/// CSPR decimals (1 CSPR = 1e9 motes)
pub const NATIVE_DECIMALS: u8 = 9;

/// A source of the native/USD exchange rate.
pub trait RateSource {
    /// Latest answer, scaled by `decimals()`
    fn latest_answer(&self) -> U256;
    /// Decimal precision of `latest_answer()`
    fn decimals(&self) -> u8;
}

/// Read the current price from `source`, normalized to 18 decimals.
pub fn get_price<S: RateSource>(source: &S) -> Result<U256, FundMeError> {
    let decimals = source.decimals();
    if decimals > PRICE_DECIMALS {
        return Err(FundMeError::PriceUnavailable);
    }

    let answer = source.latest_answer();
    if answer.is_zero() {
        return Err(FundMeError::PriceUnavailable);
    }

    answer
        .checked_mul(pow10(PRICE_DECIMALS - decimals))
        .ok_or(FundMeError::AmountOverflow)
}

/// USD value (scaled by 1e18) of `amount` raw native units.
pub fn get_conversion_rate<S: RateSource>(
    amount: U256,
    source: &S,
    native_decimals: u8,
) -> Result<U256, FundMeError> {
    let price = get_price(source)?;
    let value = amount
        .checked_mul(price)
        .ok_or(FundMeError::AmountOverflow)?;
    Ok(value / pow10(native_decimals))
}

/// Convert an attached U512 amount into U256, rejecting values above 256 bits.
pub fn u512_to_u256(value: U512) -> Result<U256, FundMeError> {
    if value.bits() > 256 {
        return Err(FundMeError::AmountOverflow);
    }
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    Ok(U256::from_little_endian(&bytes[..32]))
}

/// Convert U256 to U512
pub fn u256_to_u512(value: U256) -> U512 {
    let mut bytes = [0u8; 32];
    value.to_little_endian(&mut bytes);
    U512::from_little_endian(&bytes)
}

fn pow10(exponent: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exponent))
}
