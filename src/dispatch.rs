multiversx_sc::imports!();

use crate::types::{Agenda, AgendaOperation, AgendaResult, AgendaStatus};

// ============================================================
// Execution Dispatcher
// One attempt per agenda. The executed flag is written before
// the operation runs, so nothing the operation does can get
// the same agenda executed twice. Failures finalize the agenda
// to Ended/Rejected and mark it failed for good; a status
// override cannot reopen it. A second attempt needs a new agenda.
// ============================================================

#[multiversx_sc::module]
pub trait DispatchModule:
    crate::ownable::OwnableModule
    + crate::params::ParamsModule
    + crate::roster::RosterModule
    + crate::agenda_store::AgendaStoreModule
{
    /// Returns `true` when a committee operation was applied and `false`
    /// when it failed. Custom operations finish in the callback.
    #[endpoint(executeAgenda)]
    fn execute_agenda(&self, agenda_id: u64) -> bool {
        let agenda = self.begin_execution(agenda_id);
        let target = agenda.target;
        match agenda.operation {
            AgendaOperation::Custom {
                function,
                arguments,
            } => {
                self.agenda_dispatched_event(agenda_id, &target, &function);
                let mut call = self.tx().to(&target).raw_call(function);
                for argument in arguments.iter() {
                    call = call.argument(&*argument);
                }
                call.callback(self.callbacks().agenda_execution_callback(agenda_id))
                    .async_call_and_exit()
            }
            operation => match self.apply_operation(operation) {
                Ok(()) => {
                    self.agenda_executed_event(agenda_id, &target);
                    true
                }
                Err(reason) => {
                    self.finalize_failed_execution(agenda_id, &ManagedBuffer::from(reason));
                    false
                }
            },
        }
    }

    #[callback]
    fn agenda_execution_callback(
        &self,
        agenda_id: u64,
        #[call_result] result: ManagedAsyncCallResult<IgnoreValue>,
    ) {
        match result {
            ManagedAsyncCallResult::Ok(_) => {
                let target = self.agendas(agenda_id).get().target;
                self.agenda_executed_event(agenda_id, &target);
            }
            ManagedAsyncCallResult::Err(err) => {
                self.finalize_failed_execution(agenda_id, &err.err_msg);
            }
        }
    }

    /// Checks the agenda may run and persists it as executed. Anything
    /// dispatched afterwards sees the flag already set.
    fn begin_execution(&self, agenda_id: u64) -> Agenda<Self::Api> {
        let mut agenda = self.load_agenda(agenda_id);
        require!(!agenda.executed, "Agenda already executed");
        require!(!agenda.execution_failed, "Agenda execution already attempted");
        require!(
            agenda.status == AgendaStatus::WaitingExec,
            "Agenda is not waiting for execution"
        );

        agenda.executed = true;
        agenda.executed_at = self.blockchain().get_block_timestamp();
        agenda.status = AgendaStatus::Executed;
        self.agendas(agenda_id).set(&agenda);
        agenda
    }

    // ========================================================
    // INTERNAL: committee operations
    // Same validated helpers the owner endpoints use.
    // ========================================================

    fn apply_operation(
        &self,
        operation: AgendaOperation<Self::Api>,
    ) -> Result<(), &'static str> {
        match operation {
            AgendaOperation::SetCreateAgendaFees(fee) => {
                self.apply_creation_fee(fee);
                Ok(())
            }
            AgendaOperation::SetMinimumNoticePeriod(seconds) => {
                self.apply_minimum_notice_period(seconds)
            }
            AgendaOperation::SetMinimumVotingPeriod(seconds) => {
                self.apply_minimum_voting_period(seconds)
            }
            AgendaOperation::SetActivityRewardPerSecond(rate) => {
                self.apply_activity_reward_rate(rate);
                Ok(())
            }
            AgendaOperation::SetMaxMember(max_member) => self.apply_max_member(max_member),
            AgendaOperation::ReduceMemberSlot(slot) => self.apply_reduce_member_slot(slot),
            AgendaOperation::RegisterOperatorByOwner {
                candidate,
                candidate_contract,
                name,
            } => self.add_candidate(candidate, candidate_contract, name),
            AgendaOperation::SetAgendaStatus {
                agenda_id,
                status,
                result,
            } => self.apply_agenda_status(agenda_id, status, result),
            AgendaOperation::SetStakingAddress(address) => self.apply_staking_address(address),
            AgendaOperation::TransferOwnership(new_owner) => {
                if new_owner.is_zero() {
                    return Err("New owner is the zero address");
                }
                self.set_owner_internal(new_owner);
                Ok(())
            }
            AgendaOperation::RenounceOwnership => {
                self.set_owner_internal(ManagedAddress::zero());
                Ok(())
            }
            AgendaOperation::Custom { .. } => Err("Custom operation needs a target call"),
        }
    }

    fn finalize_failed_execution(&self, agenda_id: u64, reason: &ManagedBuffer) {
        self.agendas(agenda_id).update(|agenda| {
            agenda.executed = false;
            agenda.execution_failed = true;
            agenda.executed_at = 0;
            agenda.status = AgendaStatus::Ended;
            agenda.result = AgendaResult::Rejected;
        });
        self.agenda_execution_failed_event(agenda_id, reason);
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("agendaDispatched")]
    fn agenda_dispatched_event(
        &self,
        #[indexed] agenda_id: u64,
        #[indexed] target: &ManagedAddress,
        function: &ManagedBuffer,
    );

    #[event("agendaExecuted")]
    fn agenda_executed_event(&self, #[indexed] agenda_id: u64, #[indexed] target: &ManagedAddress);

    #[event("agendaExecutionFailed")]
    fn agenda_execution_failed_event(&self, #[indexed] agenda_id: u64, reason: &ManagedBuffer);
}
