multiversx_sc::imports!();

use crate::lifecycle;
use crate::types::{AgendaStatus, VoteChoice, VoteRecord};

#[multiversx_sc::module]
pub trait VoteTallyModule:
    crate::ownable::OwnableModule
    + crate::params::ParamsModule
    + crate::roster::RosterModule
    + crate::agenda_store::AgendaStoreModule
{
    // ========================================================
    // ENDPOINT: castVote
    // One vote per member per agenda. The first vote at or
    // after notice end opens the voting window.
    // ========================================================

    #[endpoint(castVote)]
    fn cast_vote(&self, agenda_id: u64, choice: VoteChoice, memo: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        require!(self.is_member(&caller), "Not a member");

        let mut agenda = self.load_agenda(agenda_id);
        let now = self.blockchain().get_block_timestamp();
        if lifecycle::can_start_voting(&agenda, now) {
            lifecycle::start_voting(&mut agenda, now, self.member_slots().len());
            self.agenda_voting_started_event(agenda_id, agenda.voting_end_at);
        }

        require!(
            agenda.status == AgendaStatus::Voting,
            "Agenda is not in voting"
        );
        require!(!self.has_voted(agenda_id, &caller), "Already voted");

        match choice {
            VoteChoice::Yes => agenda.count_yes += 1,
            VoteChoice::No => agenda.count_no += 1,
            VoteChoice::Abstain => agenda.count_abstain += 1,
        }

        self.vote_record(agenda_id, &caller).set(VoteRecord {
            has_voted: true,
            choice,
        });
        self.agendas(agenda_id).set(&agenda);

        self.vote_cast_event(agenda_id, &caller, choice, &memo);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(hasVoted)]
    fn has_voted(&self, agenda_id: u64, voter: &ManagedAddress) -> bool {
        !self.vote_record(agenda_id, voter).is_empty()
            && self.vote_record(agenda_id, voter).get().has_voted
    }

    /// (is current member, has voted, choice). Choice reads Abstain
    /// when no vote was cast.
    #[view(getVoteRecord)]
    fn get_vote_record(
        &self,
        agenda_id: u64,
        voter: &ManagedAddress,
    ) -> MultiValue3<bool, bool, VoteChoice> {
        let is_voter = self.is_member(voter);
        if self.vote_record(agenda_id, voter).is_empty() {
            return (is_voter, false, VoteChoice::Abstain).into();
        }
        let record = self.vote_record(agenda_id, voter).get();
        (is_voter, record.has_voted, record.choice).into()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("voteRecord")]
    fn vote_record(
        &self,
        agenda_id: u64,
        voter: &ManagedAddress,
    ) -> SingleValueMapper<VoteRecord>;

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] agenda_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] choice: VoteChoice,
        memo: &ManagedBuffer,
    );
}
