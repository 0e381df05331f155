//! Whitelist of stakeable tokens and their price feeds.
//!
//! The whitelist is an insertion-ordered arena (`index -> token`) with a
//! separate membership flag, so enumeration order is exactly insertion order
//! and membership checks stay O(1). Neither structure ever shrinks.

use odra::prelude::*;

use crate::errors::FarmError;

#[odra::module]
pub struct AssetRegistry {
    allowed_tokens: Mapping<u32, Address>,
    allowed_count: Var<u32>,
    allowed: Mapping<Address, bool>,
    price_feeds: Mapping<Address, Address>,
}

impl AssetRegistry {
    /// Append a token to the whitelist and return its index.
    /// Reverts with `AlreadyAllowed` on a duplicate.
    pub(crate) fn add_allowed_token(&mut self, asset: Address) -> u32 {
        if self.is_allowed(&asset) {
            self.env().revert(FarmError::AlreadyAllowed);
        }
        let index = self.allowed_count.get_or_default();
        self.allowed_tokens.set(&index, asset);
        self.allowed.set(&asset, true);
        self.allowed_count.set(index + 1);
        index
    }

    /// Point `asset` at `price_feed`, returning the feed it replaced
    pub(crate) fn set_price_feed(&mut self, asset: Address, price_feed: Address) -> Option<Address> {
        let previous = self.price_feeds.get(&asset);
        self.price_feeds.set(&asset, price_feed);
        previous
    }
}

#[odra::module]
impl AssetRegistry {
    pub fn is_allowed(&self, asset: &Address) -> bool {
        self.allowed.get(asset).unwrap_or_default()
    }

    pub fn price_feed_of(&self, asset: &Address) -> Option<Address> {
        self.price_feeds.get(asset)
    }

    pub fn allowed_token_at(&self, index: u32) -> Option<Address> {
        if index >= self.allowed_token_count() {
            return None;
        }
        self.allowed_tokens.get(&index)
    }

    pub fn allowed_token_count(&self) -> u32 {
        self.allowed_count.get_or_default()
    }
}
