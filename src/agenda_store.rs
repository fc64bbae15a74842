multiversx_sc::imports!();

use crate::lifecycle;
use crate::params::MAX_PERIOD_SECONDS;
use crate::types::{Agenda, AgendaOperation, AgendaResult, AgendaStatus};

// ============================================================
// Agenda Store
// Owns agenda records. Every read goes through the lazy
// lifecycle projection; mutating entry points persist it.
// ============================================================

#[multiversx_sc::module]
pub trait AgendaStoreModule:
    crate::ownable::OwnableModule + crate::params::ParamsModule + crate::roster::RosterModule
{
    // ========================================================
    // ENDPOINT: createAgenda
    // Fee-gated. Anyone can propose.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(createAgenda)]
    fn create_agenda(
        &self,
        target: ManagedAddress,
        notice_period_seconds: u64,
        voting_period_seconds: u64,
        operation: AgendaOperation<Self::Api>,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().egld_value().clone_value();
        require!(
            payment >= self.create_agenda_fees().get(),
            "Insufficient agenda fee"
        );

        require!(
            notice_period_seconds >= self.minimum_notice_period_seconds().get(),
            "Notice period below minimum"
        );
        require!(
            voting_period_seconds >= self.minimum_voting_period_seconds().get(),
            "Voting period below minimum"
        );
        require!(voting_period_seconds > 0, "Voting period must be positive");
        require!(
            notice_period_seconds <= MAX_PERIOD_SECONDS
                && voting_period_seconds <= MAX_PERIOD_SECONDS,
            "Period too long"
        );

        match &operation {
            AgendaOperation::Custom { function, .. } => {
                require!(!target.is_zero(), "Target is the zero address");
                require!(!function.is_empty(), "Empty function name");
            }
            _ => {
                require!(
                    target == self.blockchain().get_sc_address(),
                    "Committee operations must target the committee"
                );
            }
        }

        let agenda_id = self.agenda_count().get() + 1;
        let now = self.blockchain().get_block_timestamp();
        let notice_end_at = now + notice_period_seconds;

        let agenda = Agenda {
            id: agenda_id,
            creator: caller.clone(),
            created_at: now,
            notice_end_at,
            voting_period_seconds,
            voting_started_at: 0,
            voting_end_at: 0,
            roster_capacity: 0,
            executed_at: 0,
            count_yes: 0,
            count_no: 0,
            count_abstain: 0,
            status: AgendaStatus::Notice,
            result: AgendaResult::None,
            executed: false,
            execution_failed: false,
            target: target.clone(),
            operation,
        };

        self.agendas(agenda_id).set(&agenda);
        self.agenda_count().set(agenda_id);

        self.agenda_created_event(agenda_id, &caller, &target, notice_end_at, voting_period_seconds);

        agenda_id
    }

    // ========================================================
    // ENDPOINT: endAgendaVoting
    // Persists the catch-up once the window has closed.
    // ========================================================

    #[endpoint(endAgendaVoting)]
    fn end_agenda_voting(&self, agenda_id: u64) {
        let agenda = self.load_agenda(agenda_id);
        require!(
            agenda.status.is_terminal() || agenda.status == AgendaStatus::WaitingExec,
            "Voting has not ended"
        );
    }

    // ========================================================
    // ENDPOINT: setAgendaStatus
    // Administrative override. Bypasses the transition table.
    // ========================================================

    #[endpoint(setAgendaStatus)]
    fn set_agenda_status(&self, agenda_id: u64, status: AgendaStatus, result: AgendaResult) {
        self.require_owner();
        if let Err(err) = self.apply_agenda_status(agenda_id, status, result) {
            sc_panic!(err);
        }
    }

    fn apply_agenda_status(
        &self,
        agenda_id: u64,
        status: AgendaStatus,
        result: AgendaResult,
    ) -> Result<(), &'static str> {
        if self.agendas(agenda_id).is_empty() {
            return Err("Agenda does not exist");
        }

        let mut agenda = self.agendas(agenda_id).get();
        let previous_status = agenda.status;
        if status == AgendaStatus::Voting && agenda.voting_end_at == 0 {
            // Forced open before any vote: give it a full window from now
            let now = self.blockchain().get_block_timestamp();
            lifecycle::start_voting(&mut agenda, now, self.member_slots().len());
        }
        agenda.status = status;
        agenda.result = result;
        self.agendas(agenda_id).set(&agenda);

        self.agenda_status_overridden_event(agenda_id, status, result, previous_status);
        Ok(())
    }

    // ========================================================
    // INTERNAL: lazy catch-up
    // ========================================================

    /// Loads an agenda projected to the current block, persisting and
    /// logging any transition the clock has made due.
    fn load_agenda(&self, agenda_id: u64) -> Agenda<Self::Api> {
        require!(
            !self.agendas(agenda_id).is_empty(),
            "Agenda does not exist"
        );

        let mut agenda = self.agendas(agenda_id).get();
        let previous_status = agenda.status;
        let now = self.blockchain().get_block_timestamp();
        if lifecycle::advance(&mut agenda, now) {
            self.agendas(agenda_id).set(&agenda);
            if previous_status == AgendaStatus::Notice {
                self.agenda_notice_expired_event(agenda_id, agenda.notice_end_at);
            } else {
                self.agenda_voting_ended_event(agenda_id, agenda.status, agenda.result);
            }
        }
        agenda
    }

    /// Read-only twin of `load_agenda` for views.
    fn projected_agenda(&self, agenda_id: u64) -> Agenda<Self::Api> {
        require!(
            !self.agendas(agenda_id).is_empty(),
            "Agenda does not exist"
        );

        let mut agenda = self.agendas(agenda_id).get();
        let now = self.blockchain().get_block_timestamp();
        lifecycle::advance(&mut agenda, now);
        agenda
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getAgenda)]
    fn get_agenda(&self, agenda_id: u64) -> Agenda<Self::Api> {
        self.projected_agenda(agenda_id)
    }

    #[view(getAgendaStatus)]
    fn get_agenda_status(&self, agenda_id: u64) -> AgendaStatus {
        if self.agendas(agenda_id).is_empty() {
            return AgendaStatus::None;
        }
        self.projected_agenda(agenda_id).status
    }

    #[view(getAgendaResult)]
    fn get_agenda_result(&self, agenda_id: u64) -> AgendaResult {
        if self.agendas(agenda_id).is_empty() {
            return AgendaResult::None;
        }
        self.projected_agenda(agenda_id).result
    }

    #[view(getQuorum)]
    fn get_quorum(&self) -> u64 {
        lifecycle::quorum(self.member_slots().len())
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getAgendaCount)]
    #[storage_mapper("agendaCount")]
    fn agenda_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("agendas")]
    fn agendas(&self, agenda_id: u64) -> SingleValueMapper<Agenda<Self::Api>>;

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("agendaCreated")]
    fn agenda_created_event(
        &self,
        #[indexed] agenda_id: u64,
        #[indexed] creator: &ManagedAddress,
        #[indexed] target: &ManagedAddress,
        #[indexed] notice_end_at: u64,
        voting_period_seconds: u64,
    );

    #[event("agendaVotingStarted")]
    fn agenda_voting_started_event(
        &self,
        #[indexed] agenda_id: u64,
        #[indexed] voting_end_at: u64,
    );

    /// No vote opened the window before it would have closed
    #[event("agendaNoticeExpired")]
    fn agenda_notice_expired_event(&self, #[indexed] agenda_id: u64, notice_end_at: u64);

    #[event("agendaVotingEnded")]
    fn agenda_voting_ended_event(
        &self,
        #[indexed] agenda_id: u64,
        #[indexed] status: AgendaStatus,
        #[indexed] result: AgendaResult,
    );

    /// Breaks the normal ordering; kept apart from regular transitions
    #[event("agendaStatusOverridden")]
    fn agenda_status_overridden_event(
        &self,
        #[indexed] agenda_id: u64,
        #[indexed] status: AgendaStatus,
        #[indexed] result: AgendaResult,
        previous_status: AgendaStatus,
    );
}
