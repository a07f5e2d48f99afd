//! Contract error definitions.

use odra::prelude::*;

/// FundMe errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FundMeError {
    // Contribution errors (1xx)
    InsufficientContribution = 100,
    AmountOverflow = 101,

    // Oracle errors (2xx)
    PriceUnavailable = 200,

    // Access control errors (3xx)
    NotOwner = 300,

    // Payout errors (4xx)
    TransferFailed = 400,

    // Read accessor errors (5xx)
    IndexOutOfRange = 500,

    // Configuration errors (9xx)
    InvalidConfig = 900,
}

impl FundMeError {
    pub const fn message(&self) -> &'static str {
        match self {
            FundMeError::InsufficientContribution => "Didn't send enough: contribution below minimum USD value",
            FundMeError::AmountOverflow => "Amount overflows ledger arithmetic",
            FundMeError::PriceUnavailable => "Price feed unavailable or invalid",
            FundMeError::NotOwner => "Unauthorized: caller is not owner",
            FundMeError::TransferFailed => "Payout to owner failed",
            FundMeError::IndexOutOfRange => "Funder index out of range",
            FundMeError::InvalidConfig => "Invalid configuration parameter",
        }
    }
}

impl core::fmt::Display for FundMeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<FundMeError> for OdraError {
    fn from(error: FundMeError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
