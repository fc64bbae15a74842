multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Agenda Status — lifecycle states
// ============================================================

#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug,
)]
pub enum AgendaStatus {
    None,
    /// Created, waiting for the notice period to elapse.
    Notice,
    /// First vote landed after notice end. Window is running.
    Voting,
    /// Accepted. Waiting for someone to call executeAgenda.
    WaitingExec,
    /// Operation dispatched. Terminal state.
    Executed,
    /// Rejected, dismissed or failed at execution. Terminal state.
    Ended,
}

impl AgendaStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgendaStatus::Executed | AgendaStatus::Ended)
    }
}

#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug,
)]
pub enum AgendaResult {
    None,
    Accepted,
    /// Enough members took part but the yes side did not reach quorum,
    /// or the operation failed when executed.
    Rejected,
    /// Participation stayed below quorum.
    Dismissed,
}

#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug,
)]
pub enum VoteChoice {
    Abstain,
    Yes,
    No,
}

// ============================================================
// Agenda Operation — what runs when an agenda is executed
// ============================================================

/// Known kinds are applied by the committee on itself. `Custom` is an
/// opaque call forwarded to the agenda target.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub enum AgendaOperation<M: ManagedTypeApi> {
    SetCreateAgendaFees(BigUint<M>),
    SetMinimumNoticePeriod(u64),
    SetMinimumVotingPeriod(u64),
    SetActivityRewardPerSecond(BigUint<M>),
    SetMaxMember(u32),
    ReduceMemberSlot(u32),
    RegisterOperatorByOwner {
        candidate: ManagedAddress<M>,
        candidate_contract: ManagedAddress<M>,
        name: ManagedBuffer<M>,
    },
    SetAgendaStatus {
        agenda_id: u64,
        status: AgendaStatus,
        result: AgendaResult,
    },
    SetStakingAddress(ManagedAddress<M>),
    TransferOwnership(ManagedAddress<M>),
    RenounceOwnership,
    Custom {
        function: ManagedBuffer<M>,
        arguments: ManagedVec<M, ManagedBuffer<M>>,
    },
}

// ============================================================
// Agenda — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Agenda<M: ManagedTypeApi> {
    pub id: u64,
    pub creator: ManagedAddress<M>,
    pub created_at: u64,
    pub notice_end_at: u64,
    pub voting_period_seconds: u64,
    /// 0 until the vote that opens the window
    pub voting_started_at: u64,
    /// 0 until the vote that opens the window
    pub voting_end_at: u64,
    /// Roster capacity when the window opened; quorum is measured against it
    pub roster_capacity: u32,
    pub executed_at: u64,
    pub count_yes: u64,
    pub count_no: u64,
    pub count_abstain: u64,
    pub status: AgendaStatus,
    pub result: AgendaResult,
    pub executed: bool,
    /// Set once an execution attempt failed. Never cleared.
    pub execution_failed: bool,
    pub target: ManagedAddress<M>,
    pub operation: AgendaOperation<M>,
}

// ============================================================
// Vote Record — one per (agenda, voter)
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VoteRecord {
    pub has_voted: bool,
    pub choice: VoteChoice,
}

// ============================================================
// Committee — candidates and member slots
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct CandidateInfo<M: ManagedTypeApi> {
    /// Contract the operator runs; reported back in views only
    pub candidate_contract: ManagedAddress<M>,
    pub name: ManagedBuffer<M>,
    pub registered_at: u64,
    pub member_slot: Option<u32>,
    pub member_joined_at: u64,
    /// Accrual resumes from here
    pub reward_checkpoint: u64,
    /// Reward settled but not yet claimed
    pub unclaimed_reward: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct MemberSlot<M: ManagedTypeApi> {
    pub index: u32,
    /// Zero address when the slot is empty
    pub occupant: ManagedAddress<M>,
    pub joined_at: u64,
    pub reward_checkpoint: u64,
}
