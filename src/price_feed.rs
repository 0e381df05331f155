//! Price Feed External Contract Interface
//!
//! The farm reads prices through this interface only. Any contract exposing
//! `latest_answer` and `decimals` entry points can be registered as a feed.
//!
//! An answer of `None` means the feed has no current price; the farm treats it,
//! and a zero answer, as an outage rather than as a zero price.

use odra::prelude::*;
use odra::casper_types::U256;

/// Price Feed External Contract Interface
#[odra::external_contract]
pub trait PriceFeed {
    /// Latest price scaled by `10^decimals()`, or None if not available
    fn latest_answer(&self) -> Option<U256>;

    /// Number of decimals in `latest_answer`
    fn decimals(&self) -> u8;
}

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U256;

    #[odra::event]
    pub struct AnswerUpdated {
        pub answer: Option<U256>,
    }
}

/// Settable price feed for tests and development networks.
/// Anyone can update the answer.
#[odra::module(events = [events::AnswerUpdated])]
pub struct MockPriceFeed {
    decimals: Var<u8>,
    answer: Var<Option<U256>>,
}

#[odra::module]
impl MockPriceFeed {
    pub fn init(&mut self, decimals: u8, initial_answer: U256) {
        self.decimals.set(decimals);
        self.answer.set(Some(initial_answer));
    }

    pub fn latest_answer(&self) -> Option<U256> {
        self.answer.get().flatten()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn update_answer(&mut self, answer: U256) {
        self.answer.set(Some(answer));
        self.env().emit_event(events::AnswerUpdated {
            answer: Some(answer),
        });
    }

    /// Simulate an outage: `latest_answer` returns None until the next update
    pub fn clear_answer(&mut self) {
        self.answer.set(None);
        self.env().emit_event(events::AnswerUpdated { answer: None });
    }
}
