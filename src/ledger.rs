//! Per-user, per-token staking balances and the staker roster.
//!
//! Invariants kept by every mutation:
//! - `unique_tokens[user]` equals the number of tokens with a positive balance
//! - a user enters the roster on their first stake and never leaves it
//!
//! Custody (moving the actual tokens) is done by the farm; this module only
//! does the bookkeeping.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::errors::FarmError;

#[odra::module]
pub struct StakingLedger {
    // Keyed by (asset, user)
    balances: Mapping<(Address, Address), U256>,
    unique_tokens: Mapping<Address, u32>,

    // Append-only roster
    stakers: Mapping<u32, Address>,
    staker_count: Var<u32>,
    has_staked: Mapping<Address, bool>,
}

impl StakingLedger {
    /// Add `amount` to the user's balance of `asset` and return the new balance
    pub(crate) fn credit(&mut self, user: &Address, asset: &Address, amount: U256) -> U256 {
        let key = (*asset, *user);
        let current = self.balances.get(&key).unwrap_or_default();
        let updated = current
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(FarmError::Overflow));

        if current.is_zero() && !updated.is_zero() {
            let count = self.unique_tokens.get(user).unwrap_or_default();
            self.unique_tokens.set(user, count + 1);
        }
        if !self.has_staked.get(user).unwrap_or_default() {
            let index = self.staker_count.get_or_default();
            self.stakers.set(&index, *user);
            self.staker_count.set(index + 1);
            self.has_staked.set(user, true);
        }

        self.balances.set(&key, updated);
        updated
    }

    /// Zero the user's balance of `asset` and return what it held.
    /// Reverts with `NothingToUnstake` when the balance is already zero.
    pub(crate) fn release(&mut self, user: &Address, asset: &Address) -> U256 {
        let key = (*asset, *user);
        let amount = self.balances.get(&key).unwrap_or_default();
        if amount.is_zero() {
            self.env().revert(FarmError::NothingToUnstake);
        }

        self.balances.set(&key, U256::zero());
        let count = self.unique_tokens.get(user).unwrap_or_default();
        self.unique_tokens.set(user, count.saturating_sub(1));
        amount
    }
}

#[odra::module]
impl StakingLedger {
    pub fn balance_of(&self, user: &Address, asset: &Address) -> U256 {
        self.balances.get(&(*asset, *user)).unwrap_or_default()
    }

    pub fn unique_token_count(&self, user: &Address) -> u32 {
        self.unique_tokens.get(user).unwrap_or_default()
    }

    pub fn staker_at(&self, index: u32) -> Option<Address> {
        if index >= self.staker_count() {
            return None;
        }
        self.stakers.get(&index)
    }

    pub fn staker_count(&self) -> u32 {
        self.staker_count.get_or_default()
    }
}
