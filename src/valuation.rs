//! Fixed-point valuation of staked balances.
//!
//! A price feed answers an integer `price` scaled by `10^decimals`. The value of
//! `amount` token units is `floor(amount * price / 10^decimals)`, computed in
//! U256 with checked arithmetic. Flooring is applied per token before summing,
//! so a user's total never exceeds the exact sum of their positions.

use odra::casper_types::U256;

use crate::errors::FarmError;

/// Price answer of one feed
#[odra::odra_type]
pub struct PriceQuote {
    pub price: U256,
    pub decimals: u8,
}

/// `floor(amount * price / 10^decimals)`
pub fn token_value(amount: U256, quote: &PriceQuote) -> Result<U256, FarmError> {
    if amount.is_zero() {
        return Ok(U256::zero());
    }
    let scale = U256::from(10u8)
        .checked_pow(U256::from(quote.decimals))
        .ok_or(FarmError::Overflow)?;
    let gross = amount
        .checked_mul(quote.price)
        .ok_or(FarmError::Overflow)?;
    Ok(gross / scale)
}

pub fn accumulate(total: U256, value: U256) -> Result<U256, FarmError> {
    total.checked_add(value).ok_or(FarmError::Overflow)
}
