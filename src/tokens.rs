//! CEP-18 tokens used with the farm
//!
//! - `Cep18Token`: the external interface the farm uses for custody and payouts
//! - DAPP: reward token, whole supply minted to the deployer
//! - `MockToken`: stakeable test token with faucet mint
//! - `ProbeToken`: test token that reads the farm from inside `transfer`

use alloc::string::String;
use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;
use odra_modules::cep18::events::{
    Burn, DecreaseAllowance, IncreaseAllowance, Mint, SetAllowance, Transfer, TransferFrom,
};
use odra_modules::cep18_token::Cep18;

use crate::token_farm::TokenFarmContractRef;

/// Subset of the CEP-18 interface the farm calls on staked and reward tokens
#[odra::external_contract]
pub trait Cep18Token {
    fn balance_of(&self, owner: Address) -> U256;
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    fn transfer(&mut self, recipient: Address, amount: U256);
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256);
}

/// 1,000,000 DAPP with 18 decimals
pub const DAPP_INITIAL_SUPPLY: u128 = 1_000_000_000_000_000_000_000_000;

/// DAPP: farm reward token
#[odra::module(
    events = [
        Mint,
        Burn,
        SetAllowance,
        IncreaseAllowance,
        DecreaseAllowance,
        Transfer,
        TransferFrom
    ]
)]
pub struct DappToken {
    token: SubModule<Cep18>,
}

#[odra::module]
impl DappToken {
    /// Mint the full supply to the deployer
    pub fn init(&mut self) {
        self.token.init(
            "DAPP".to_string(),
            "Dapp Token".to_string(),
            18u8,
            U256::from(DAPP_INITIAL_SUPPLY),
        );
    }

    pub fn name(&self) -> String {
        self.token.name()
    }

    pub fn symbol(&self) -> String {
        self.token.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.token.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.token.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.token.balance_of(&owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.token.allowance(&owner, &spender)
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) {
        self.token.transfer(&recipient, &amount);
    }

    pub fn approve(&mut self, spender: Address, amount: U256) {
        self.token.approve(&spender, &amount);
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) {
        self.token.transfer_from(&owner, &recipient, &amount);
    }
}

/// Stakeable test token. Anyone can call `faucet_mint`.
#[odra::module(
    events = [
        Mint,
        Burn,
        SetAllowance,
        IncreaseAllowance,
        DecreaseAllowance,
        Transfer,
        TransferFrom
    ]
)]
pub struct MockToken {
    token: SubModule<Cep18>,
}

#[odra::module]
impl MockToken {
    pub fn init(&mut self, symbol: String, name: String) {
        self.token.init(symbol, name, 18u8, U256::zero());
    }

    pub fn name(&self) -> String {
        self.token.name()
    }

    pub fn symbol(&self) -> String {
        self.token.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.token.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.token.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.token.balance_of(&owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.token.allowance(&owner, &spender)
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) {
        self.token.transfer(&recipient, &amount);
    }

    pub fn approve(&mut self, spender: Address, amount: U256) {
        self.token.approve(&spender, &amount);
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) {
        self.token.transfer_from(&owner, &recipient, &amount);
    }

    pub fn faucet_mint(&mut self, to: Address, amount: U256) {
        self.token.raw_mint(&to, &amount);
    }
}

/// Test token that calls back into the farm while paying out.
///
/// When the configured farm sends tokens, `transfer` moves them first and then
/// records the recipient's farm balance and unique token count for this token.
#[odra::module(
    events = [
        Mint,
        Burn,
        SetAllowance,
        IncreaseAllowance,
        DecreaseAllowance,
        Transfer,
        TransferFrom
    ]
)]
pub struct ProbeToken {
    token: SubModule<Cep18>,
    farm: Var<Address>,
    observed_balance: Var<Option<U256>>,
    observed_unique_count: Var<Option<u32>>,
}

#[odra::module]
impl ProbeToken {
    pub fn init(&mut self, farm: Address) {
        self.token.init("PROBE".to_string(), "Probe Token".to_string(), 18u8, U256::zero());
        self.farm.set(farm);
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.token.balance_of(&owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.token.allowance(&owner, &spender)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) {
        self.token.approve(&spender, &amount);
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) {
        self.token.transfer_from(&owner, &recipient, &amount);
    }

    pub fn faucet_mint(&mut self, to: Address, amount: U256) {
        self.token.raw_mint(&to, &amount);
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) {
        self.token.transfer(&recipient, &amount);

        let Some(farm_addr) = self.farm.get() else {
            return;
        };
        if self.env().caller() != farm_addr {
            return;
        }
        let farm = TokenFarmContractRef::new(self.env().clone(), farm_addr);
        let this = self.env().self_address();
        self.observed_balance.set(Some(farm.balance_of(recipient, this)));
        self.observed_unique_count.set(Some(farm.unique_token_count(recipient)));
    }

    /// Farm balance seen during the last payout from the farm
    pub fn observed_balance(&self) -> Option<U256> {
        self.observed_balance.get().flatten()
    }

    /// Unique token count seen during the last payout from the farm
    pub fn observed_unique_count(&self) -> Option<u32> {
        self.observed_unique_count.get().flatten()
    }
}
