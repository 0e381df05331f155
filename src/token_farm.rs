//! Token Farm Contract
//!
//! A multi-token staking farm on Casper.
//! - Owner whitelists CEP-18 tokens and points each one at a price feed
//! - Users stake any whitelisted token and unstake their full balance at once
//! - Owner runs a reward pass paying every staker DAPP equal to the value of
//!   everything they have staked
//!
//! ## Units
//! - Balances: smallest unit of each staked token (U256), no decimal scaling
//! - Value: `amount * price / 10^decimals`, floored, in the feed's quote unit
//!
//! ## Reward pass
//! All-or-nothing: if any staker cannot be valued or paid, the whole pass
//! reverts. Stakers whose value is zero are skipped.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;

use crate::errors::FarmError;
use crate::ledger::StakingLedger;
use crate::ownership::OwnershipGuard;
use crate::price_feed::PriceFeedContractRef;
use crate::registry::AssetRegistry;
use crate::tokens::Cep18TokenContractRef;
use crate::valuation::{self, PriceQuote};

// ==========================================
// Events
// ==========================================

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U256;

    #[odra::event]
    pub struct TokenAllowed {
        pub asset: Address,
        pub index: u32,
    }

    #[odra::event]
    pub struct PriceFeedSet {
        pub asset: Address,
        pub price_feed: Address,
        pub previous_price_feed: Option<Address>,
    }

    #[odra::event]
    pub struct Staked {
        pub user: Address,
        pub asset: Address,
        pub amount: U256,
        pub new_balance: U256,
    }

    #[odra::event]
    pub struct Unstaked {
        pub user: Address,
        pub asset: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct RewardIssued {
        pub user: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct OwnershipTransferred {
        pub previous_owner: Option<Address>,
        pub new_owner: Address,
    }
}

// ==========================================
// Contract
// ==========================================

#[odra::module(
    events = [
        events::TokenAllowed,
        events::PriceFeedSet,
        events::Staked,
        events::Unstaked,
        events::RewardIssued,
        events::OwnershipTransferred
    ],
    errors = FarmError
)]
pub struct TokenFarm {
    ownership: SubModule<OwnershipGuard>,
    registry: SubModule<AssetRegistry>,
    ledger: SubModule<StakingLedger>,
    reward_token: Var<Address>,
}

#[odra::module]
impl TokenFarm {
    // ==========================================
    // Initialization
    // ==========================================

    /// Initialize the farm. The deployer becomes the owner.
    pub fn init(&mut self, reward_token: Address) {
        let deployer = self.env().caller();
        self.ownership.init(deployer);
        self.reward_token.set(reward_token);
    }

    // ==========================================
    // Admin Functions
    // ==========================================

    /// Whitelist a token for staking (owner only).
    /// Reverts with `AlreadyAllowed` if it is already whitelisted.
    pub fn add_allowed_token(&mut self, asset: Address) {
        self.ownership.require_owner();
        let index = self.registry.add_allowed_token(asset);
        self.env().emit_event(events::TokenAllowed { asset, index });
    }

    /// Set or replace the price feed of a token (owner only)
    pub fn set_price_feed(&mut self, asset: Address, price_feed: Address) {
        self.ownership.require_owner();
        let previous_price_feed = self.registry.set_price_feed(asset, price_feed);
        self.env().emit_event(events::PriceFeedSet {
            asset,
            price_feed,
            previous_price_feed,
        });
    }

    /// Hand the farm to a new owner (owner only)
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.ownership.require_owner();
        let previous_owner = self.ownership.set_owner(new_owner);
        self.env().emit_event(events::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    /// Pay every staker reward tokens equal to their total staked value
    /// (owner only). Rewards come from the farm's own reward token balance.
    pub fn issue_rewards(&mut self) {
        self.ownership.require_owner();
        let reward_token = self.reward_token_address();

        for index in 0..self.ledger.staker_count() {
            let Some(user) = self.ledger.staker_at(index) else {
                continue;
            };
            let amount = or_revert(&self.env(), self.total_value_of(&user));
            if amount.is_zero() {
                continue;
            }
            self.push_tokens(reward_token, user, amount);
            self.env().emit_event(events::RewardIssued { user, amount });
        }
    }

    // ==========================================
    // User Functions
    // ==========================================

    /// Stake `amount` of a whitelisted token.
    /// Requires a prior `approve` of the farm on the token contract.
    pub fn stake(&mut self, asset: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(FarmError::ZeroAmount);
        }
        if !self.registry.is_allowed(&asset) {
            self.env().revert(FarmError::AssetNotAllowed);
        }
        let user = self.env().caller();

        self.pull_tokens(asset, user, amount);
        let new_balance = self.ledger.credit(&user, &asset, amount);

        self.env().emit_event(events::Staked {
            user,
            asset,
            amount,
            new_balance,
        });
    }

    /// Withdraw the caller's entire balance of `asset`.
    /// The balance is cleared before the token transfer is made.
    pub fn unstake(&mut self, asset: Address) {
        let user = self.env().caller();

        let amount = self.ledger.release(&user, &asset);
        self.push_tokens(asset, user, amount);

        self.env().emit_event(events::Unstaked {
            user,
            asset,
            amount,
        });
    }

    // ==========================================
    // View Functions
    // ==========================================

    pub fn is_allowed(&self, asset: Address) -> bool {
        self.registry.is_allowed(&asset)
    }

    pub fn price_feed_of(&self, asset: Address) -> Option<Address> {
        self.registry.price_feed_of(&asset)
    }

    /// Whitelisted token at `index`, in the order tokens were added
    pub fn allowed_token_at(&self, index: u32) -> Address {
        self.registry
            .allowed_token_at(index)
            .unwrap_or_else(|| self.env().revert(FarmError::IndexOutOfRange))
    }

    pub fn allowed_token_count(&self) -> u32 {
        self.registry.allowed_token_count()
    }

    pub fn balance_of(&self, user: Address, asset: Address) -> U256 {
        self.ledger.balance_of(&user, &asset)
    }

    pub fn unique_token_count(&self, user: Address) -> u32 {
        self.ledger.unique_token_count(&user)
    }

    /// Staker at `index`, in order of first stake
    pub fn staker_at(&self, index: u32) -> Address {
        self.ledger
            .staker_at(index)
            .unwrap_or_else(|| self.env().revert(FarmError::IndexOutOfRange))
    }

    pub fn staker_count(&self) -> u32 {
        self.ledger.staker_count()
    }

    /// Current price and decimals of a token's feed
    pub fn token_price(&self, asset: Address) -> PriceQuote {
        or_revert(&self.env(), self.quote_of(&asset))
    }

    /// Value of `amount` units of `asset` at the current price
    pub fn token_value(&self, asset: Address, amount: U256) -> U256 {
        or_revert(&self.env(), self.value_of(&asset, amount))
    }

    /// Value of everything `user` has staked
    pub fn total_value(&self, user: Address) -> U256 {
        or_revert(&self.env(), self.total_value_of(&user))
    }

    pub fn reward_token(&self) -> Option<Address> {
        self.reward_token.get()
    }

    pub fn owner(&self) -> Option<Address> {
        self.ownership.owner()
    }

    // ==========================================
    // Valuation
    // ==========================================

    fn quote_of(&self, asset: &Address) -> Result<PriceQuote, FarmError> {
        let feed_addr = self
            .registry
            .price_feed_of(asset)
            .ok_or(FarmError::AssetNotPriced)?;
        let feed = PriceFeedContractRef::new(self.env().clone(), feed_addr);

        let price = feed
            .latest_answer()
            .filter(|price| !price.is_zero())
            .ok_or(FarmError::OracleUnavailable)?;
        Ok(PriceQuote {
            price,
            decimals: feed.decimals(),
        })
    }

    fn value_of(&self, asset: &Address, amount: U256) -> Result<U256, FarmError> {
        let quote = self.quote_of(asset)?;
        valuation::token_value(amount, &quote)
    }

    // Zero balances are skipped before any feed lookup, so tokens the user
    // never staked need no feed.
    fn total_value_of(&self, user: &Address) -> Result<U256, FarmError> {
        let mut total = U256::zero();
        for index in 0..self.registry.allowed_token_count() {
            let Some(asset) = self.registry.allowed_token_at(index) else {
                continue;
            };
            let balance = self.ledger.balance_of(user, &asset);
            if balance.is_zero() {
                continue;
            }
            let value = self.value_of(&asset, balance)?;
            total = valuation::accumulate(total, value)?;
        }
        Ok(total)
    }

    // ==========================================
    // Custody
    // ==========================================

    /// Move `amount` of `asset` from `user` into the farm
    fn pull_tokens(&mut self, asset: Address, user: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env().clone(), asset);
        let self_address = self.env().self_address();

        if token.allowance(user, self_address) < amount || token.balance_of(user) < amount {
            self.env().revert(FarmError::TransferFailed);
        }
        token.transfer_from(user, self_address, amount);
    }

    /// Move `amount` of `asset` from the farm to `recipient`
    fn push_tokens(&mut self, asset: Address, recipient: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env().clone(), asset);
        let self_address = self.env().self_address();

        if token.balance_of(self_address) < amount {
            self.env().revert(FarmError::TransferFailed);
        }
        token.transfer(recipient, amount);
    }

    fn reward_token_address(&self) -> Address {
        self.reward_token
            .get()
            .unwrap_or_else(|| self.env().revert(FarmError::TransferFailed))
    }
}

fn or_revert<T>(env: &ContractEnv, result: Result<T, FarmError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => env.revert(error),
    }
}
