//! Single-owner access control for privileged farm entry points.

use odra::prelude::*;

use crate::errors::FarmError;

/// Holds the privileged identity. Every privileged farm call starts with
/// `require_owner`.
#[odra::module]
pub struct OwnershipGuard {
    owner: Var<Address>,
}

#[odra::module]
impl OwnershipGuard {
    pub fn init(&mut self, owner: Address) {
        self.owner.set(owner);
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }
}

impl OwnershipGuard {
    /// Revert with `Unauthorized` unless the caller is the owner
    pub(crate) fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(FarmError::Unauthorized);
        }
    }

    /// Replace the owner, returning the previous one. Caller checks are the
    /// responsibility of the enclosing contract.
    pub(crate) fn set_owner(&mut self, new_owner: Address) -> Option<Address> {
        let previous = self.owner.get();
        self.owner.set(new_owner);
        previous
    }
}
