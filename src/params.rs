multiversx_sc::imports!();

/// Upper bound for notice and voting periods: one year
pub const MAX_PERIOD_SECONDS: u64 = 365 * 86_400;

// ============================================================
// Parameter Registry
// Policy knobs consulted by agenda creation and reward accrual.
// Setters are self-call only: governance amends its own rules
// through executed agendas and nowhere else.
// ============================================================

#[multiversx_sc::module]
pub trait ParamsModule: crate::ownable::OwnableModule {
    #[endpoint(setCreateAgendaFees)]
    fn set_create_agenda_fees(&self, fee: BigUint) {
        self.require_self_call();
        self.apply_creation_fee(fee);
    }

    #[endpoint(setMinimumNoticePeriodSeconds)]
    fn set_minimum_notice_period_seconds(&self, seconds: u64) {
        self.require_self_call();
        if let Err(err) = self.apply_minimum_notice_period(seconds) {
            sc_panic!(err);
        }
    }

    #[endpoint(setMinimumVotingPeriodSeconds)]
    fn set_minimum_voting_period_seconds(&self, seconds: u64) {
        self.require_self_call();
        if let Err(err) = self.apply_minimum_voting_period(seconds) {
            sc_panic!(err);
        }
    }

    #[endpoint(setStakingAddress)]
    fn set_staking_address(&self, address: ManagedAddress) {
        self.require_self_call();
        if let Err(err) = self.apply_staking_address(address) {
            sc_panic!(err);
        }
    }

    // ========================================================
    // INTERNAL: validated setters shared by endpoints and the
    // agenda dispatcher
    // ========================================================

    fn apply_creation_fee(&self, fee: BigUint) {
        self.create_agenda_fees().set(&fee);
        self.creation_fee_changed_event(&fee);
    }

    fn apply_minimum_notice_period(&self, seconds: u64) -> Result<(), &'static str> {
        if seconds > MAX_PERIOD_SECONDS {
            return Err("Notice period too long");
        }
        self.minimum_notice_period_seconds().set(seconds);
        self.minimum_notice_period_changed_event(seconds);
        Ok(())
    }

    fn apply_minimum_voting_period(&self, seconds: u64) -> Result<(), &'static str> {
        if seconds == 0 {
            return Err("Voting period must be positive");
        }
        if seconds > MAX_PERIOD_SECONDS {
            return Err("Voting period too long");
        }
        self.minimum_voting_period_seconds().set(seconds);
        self.minimum_voting_period_changed_event(seconds);
        Ok(())
    }

    fn apply_staking_address(&self, address: ManagedAddress) -> Result<(), &'static str> {
        if address.is_zero() {
            return Err("Staking address is the zero address");
        }
        self.staking_address().set(&address);
        self.staking_address_changed_event(&address);
        Ok(())
    }

    /// Raw rate write. Callers settle member rewards first.
    fn write_activity_reward_per_second(&self, rate: BigUint) {
        self.activity_reward_per_second().set(&rate);
        self.activity_reward_changed_event(&rate);
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(createAgendaFees)]
    #[storage_mapper("createAgendaFees")]
    fn create_agenda_fees(&self) -> SingleValueMapper<BigUint>;

    #[view(minimumNoticePeriodSeconds)]
    #[storage_mapper("minimumNoticePeriodSeconds")]
    fn minimum_notice_period_seconds(&self) -> SingleValueMapper<u64>;

    #[view(minimumVotingPeriodSeconds)]
    #[storage_mapper("minimumVotingPeriodSeconds")]
    fn minimum_voting_period_seconds(&self) -> SingleValueMapper<u64>;

    #[view(activityRewardPerSecond)]
    #[storage_mapper("activityRewardPerSecond")]
    fn activity_reward_per_second(&self) -> SingleValueMapper<BigUint>;

    /// External collaborator answering `getStake(address)`
    #[view(stakingAddress)]
    #[storage_mapper("stakingAddress")]
    fn staking_address(&self) -> SingleValueMapper<ManagedAddress>;

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("creationFeeChanged")]
    fn creation_fee_changed_event(&self, fee: &BigUint);

    #[event("minimumNoticePeriodChanged")]
    fn minimum_notice_period_changed_event(&self, #[indexed] seconds: u64);

    #[event("minimumVotingPeriodChanged")]
    fn minimum_voting_period_changed_event(&self, #[indexed] seconds: u64);

    #[event("activityRewardChanged")]
    fn activity_reward_changed_event(&self, rate: &BigUint);

    #[event("stakingAddressChanged")]
    fn staking_address_changed_event(&self, #[indexed] address: &ManagedAddress);
}
