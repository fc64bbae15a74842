multiversx_sc::imports!();

/// Privileged singleton control.
///
/// The owner starts as the deployer. Once ownership moves to the committee
/// contract itself, or is renounced, privileged endpoints are only reachable
/// through executed agendas.
#[multiversx_sc::module]
pub trait OwnableModule {
    #[endpoint(transferOwnership)]
    fn transfer_ownership(&self, new_owner: ManagedAddress) {
        self.require_owner();
        require!(!new_owner.is_zero(), "New owner is the zero address");
        self.set_owner_internal(new_owner);
    }

    #[endpoint(renounceOwnership)]
    fn renounce_ownership(&self) {
        self.require_owner();
        self.set_owner_internal(ManagedAddress::zero());
    }

    fn set_owner_internal(&self, new_owner: ManagedAddress) {
        let previous = self.governance_owner().get();
        self.governance_owner().set(&new_owner);
        self.ownership_transferred_event(&previous, &new_owner);
    }

    fn require_owner(&self) {
        let caller = self.blockchain().get_caller();
        let owner = self.governance_owner().get();
        require!(
            !owner.is_zero() && caller == owner,
            "Caller is not the owner"
        );
    }

    /// Parameter setters answer only to the committee contract itself, i.e.
    /// to a custom agenda operation that calls back into the committee.
    fn require_self_call(&self) {
        require!(
            self.blockchain().get_caller() == self.blockchain().get_sc_address(),
            "Only callable through an executed agenda"
        );
    }

    #[view(getOwner)]
    #[storage_mapper("governanceOwner")]
    fn governance_owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[event("ownershipTransferred")]
    fn ownership_transferred_event(
        &self,
        #[indexed] previous_owner: &ManagedAddress,
        #[indexed] new_owner: &ManagedAddress,
    );
}
