//! Farm error codes
//!
//! Shared by the farm and its submodules. Codes are part of the contract ABI
//! and must not be renumbered.

use odra::prelude::*;

#[odra::odra_error]
pub enum FarmError {
    /// Caller is not the farm owner
    Unauthorized = 1,
    /// Stake attempted on a token that is not whitelisted
    AssetNotAllowed = 2,
    /// Token is already on the whitelist
    AlreadyAllowed = 3,
    /// Caller has no balance of the token to withdraw
    NothingToUnstake = 4,
    /// Token is staked but has no price feed
    AssetNotPriced = 5,
    /// Price feed gave no usable answer
    OracleUnavailable = 6,
    /// Token custody or reward transfer cannot complete
    TransferFailed = 7,
    /// Index past the end of the whitelist or staker roster
    IndexOutOfRange = 8,
    /// Stake of zero units
    ZeroAmount = 9,
    /// Valuation arithmetic overflowed U256
    Overflow = 10,
}
