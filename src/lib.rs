#![no_std]

multiversx_sc::imports!();

pub mod agenda_store;
pub mod dispatch;
pub mod lifecycle;
pub mod ownable;
pub mod params;
pub mod roster;
pub mod staking_proxy;
pub mod types;
pub mod vote_tally;

// ============================================================
// Contract
// A bounded committee votes on agendas. Accepted agendas run
// one operation: a change to the committee itself (parameters,
// roster, ownership, agenda status) or an opaque call to an
// external target.
// ============================================================

#[multiversx_sc::contract]
pub trait DaoCommittee:
    ownable::OwnableModule
    + params::ParamsModule
    + roster::RosterModule
    + agenda_store::AgendaStoreModule
    + vote_tally::VoteTallyModule
    + dispatch::DispatchModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        staking_address: ManagedAddress,
        create_agenda_fees: BigUint,
        minimum_notice_period_seconds: u64,
        minimum_voting_period_seconds: u64,
        activity_reward_per_second: BigUint,
        max_member: u32,
    ) {
        let deployer = self.blockchain().get_caller();
        self.governance_owner().set(&deployer);

        self.apply_creation_fee(create_agenda_fees);
        let configured = self
            .apply_staking_address(staking_address)
            .and_then(|_| self.apply_minimum_notice_period(minimum_notice_period_seconds))
            .and_then(|_| self.apply_minimum_voting_period(minimum_voting_period_seconds))
            .and_then(|_| self.apply_max_member(max_member));
        if let Err(err) = configured {
            sc_panic!(err);
        }
        self.write_activity_reward_per_second(activity_reward_per_second);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // VIEWS
    // ========================================================

    /// (creation fee, minimum notice, minimum voting, reward per second,
    /// max member)
    #[view(getParameters)]
    fn get_parameters(&self) -> MultiValue5<BigUint, u64, u64, BigUint, u32> {
        (
            self.create_agenda_fees().get(),
            self.minimum_notice_period_seconds().get(),
            self.minimum_voting_period_seconds().get(),
            self.activity_reward_per_second().get(),
            self.max_member(),
        )
            .into()
    }
}
