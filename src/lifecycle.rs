//! Agenda state machine.
//!
//! Nothing here touches storage or the clock: every entry point loads an
//! agenda, projects it forward with [`advance`] against the current block
//! timestamp, and only then applies its own effect. Views run the same
//! projection in memory, so a status read is never behind the clock.

use multiversx_sc::api::ManagedTypeApi;

use crate::types::{Agenda, AgendaResult, AgendaStatus};

/// Yes votes needed for acceptance: strict majority of the roster capacity.
pub fn quorum(roster_capacity: usize) -> u64 {
    roster_capacity as u64 / 2 + 1
}

/// Final verdict of a closed voting window.
///
/// Yes reaching quorum accepts. Otherwise the agenda is rejected when
/// total participation reached quorum, and dismissed when it did not.
pub fn evaluate_result(yes: u64, no: u64, abstain: u64, roster_capacity: usize) -> AgendaResult {
    let quorum = quorum(roster_capacity);
    if yes >= quorum {
        AgendaResult::Accepted
    } else if yes + no + abstain >= quorum {
        AgendaResult::Rejected
    } else {
        AgendaResult::Dismissed
    }
}

/// True when a vote cast at `now` would open the voting window.
pub fn can_start_voting<M: ManagedTypeApi>(agenda: &Agenda<M>, now: u64) -> bool {
    agenda.status == AgendaStatus::Notice && now >= agenda.notice_end_at
}

/// NOTICE → VOTING. Fixes the window and the capacity the verdict will be
/// measured against, so later roster changes cannot move the result.
pub fn start_voting<M: ManagedTypeApi>(agenda: &mut Agenda<M>, now: u64, roster_capacity: usize) {
    agenda.status = AgendaStatus::Voting;
    agenda.voting_started_at = now;
    agenda.voting_end_at = now + agenda.voting_period_seconds;
    agenda.roster_capacity = roster_capacity as u32;
}

/// Projects time-triggered transitions up to `now`. Returns `true` when the
/// agenda changed, so callers know to persist it and emit the transition.
///
/// Idempotent: a second call with the same `now` is a no-op.
pub fn advance<M: ManagedTypeApi>(agenda: &mut Agenda<M>, now: u64) -> bool {
    match agenda.status {
        AgendaStatus::Notice => {
            // Nobody voted in time for a full window to fit
            if now >= agenda.notice_end_at + agenda.voting_period_seconds {
                agenda.status = AgendaStatus::Ended;
                agenda.result = AgendaResult::Dismissed;
                return true;
            }
            false
        }
        AgendaStatus::Voting => {
            if now < agenda.voting_end_at {
                return false;
            }
            let result = evaluate_result(
                agenda.count_yes,
                agenda.count_no,
                agenda.count_abstain,
                agenda.roster_capacity as usize,
            );
            agenda.result = result;
            agenda.status = if result == AgendaResult::Accepted {
                AgendaStatus::WaitingExec
            } else {
                AgendaStatus::Ended
            };
            true
        }
        _ => false,
    }
}
