//! Token Farm x Casper — Multi-token Staking Farm (Odra)
//!
//! This crate implements a staking farm on Casper using Odra framework.
//! - TokenFarm: whitelisted multi-token staking with price-feed valuation and
//!   DAPP reward issuance
//! - DAPP: reward token; MockToken / ProbeToken: test tokens
//! - MockPriceFeed: settable price feed for tests and development networks

#![cfg_attr(target_arch = "wasm32", no_std)]

extern crate alloc;

pub mod errors;
pub mod ownership;
pub mod registry;
pub mod ledger;
pub mod valuation;
pub mod price_feed;
pub mod tokens;
pub mod token_farm;
