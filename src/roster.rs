multiversx_sc::imports!();

use crate::staking_proxy;
use crate::types::{CandidateInfo, MemberSlot};

/// Hard ceiling on committee capacity; bounds every loop over the slots
pub const MAX_MEMBER_LIMIT: u32 = 50;

// ============================================================
// Committee Roster
// Fixed-capacity ordered slots. A slot holds a registered
// candidate or the zero address. Members accrue an activity
// reward per second of tenure, settled lazily.
// ============================================================

#[multiversx_sc::module]
pub trait RosterModule: crate::ownable::OwnableModule + crate::params::ParamsModule {
    // ========================================================
    // ENDPOINT: registerCandidate
    // Self-service. The staking contract must report a stake.
    // ========================================================

    #[endpoint(registerCandidate)]
    fn register_candidate(&self, candidate_contract: ManagedAddress, name: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        require!(
            self.candidate_info(&caller).is_empty(),
            "Candidate already registered"
        );
        let stake = self.stake_of(&caller);
        require!(stake > 0u64, "No stake");

        if let Err(err) = self.add_candidate(caller, candidate_contract, name) {
            sc_panic!(err);
        }
    }

    #[endpoint(registerOperatorByOwner)]
    fn register_operator_by_owner(
        &self,
        candidate: ManagedAddress,
        candidate_contract: ManagedAddress,
        name: ManagedBuffer,
    ) {
        self.require_owner();
        if let Err(err) = self.add_candidate(candidate, candidate_contract, name) {
            sc_panic!(err);
        }
    }

    // ========================================================
    // ENDPOINT: changeMember
    // A candidate takes a slot. Empty slots are free to take;
    // an occupied slot needs strictly more stake than its holder.
    // ========================================================

    #[endpoint(changeMember)]
    fn change_member(&self, slot: u32) {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();
        require!(
            (slot as usize) < self.member_slots().len(),
            "Invalid member slot"
        );
        require!(
            !self.candidate_info(&caller).is_empty(),
            "Not a candidate"
        );

        let mut info = self.candidate_info(&caller).get();
        require!(info.member_slot.is_none(), "Already a member");

        let index = slot as usize + 1;
        let previous = self.member_slots().get(index);
        if !previous.is_zero() {
            let challenger_stake = self.stake_of(&caller);
            let occupant_stake = self.stake_of(&previous);
            require!(
                challenger_stake > occupant_stake,
                "Not enough stake to replace member"
            );
            self.vacate_member(&previous, now);
        }

        self.member_slots().set(index, &caller);
        info.member_slot = Some(slot);
        info.member_joined_at = now;
        info.reward_checkpoint = now;
        self.candidate_info(&caller).set(&info);

        self.member_changed_event(slot, &previous, &caller);
    }

    #[endpoint(retireMember)]
    fn retire_member(&self) {
        let caller = self.blockchain().get_caller();
        require!(self.is_member(&caller), "Not a member");

        let slot = self.candidate_info(&caller).get().member_slot.unwrap_or_default();
        let now = self.blockchain().get_block_timestamp();
        self.vacate_member(&caller, now);
        self.member_slots()
            .set(slot as usize + 1, &ManagedAddress::zero());
    }

    // ========================================================
    // ENDPOINT: claimActivityReward
    // Paid in EGLD from the committee balance (creation fees).
    // ========================================================

    #[endpoint(claimActivityReward)]
    fn claim_activity_reward(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            !self.candidate_info(&caller).is_empty(),
            "Not a candidate"
        );

        let now = self.blockchain().get_block_timestamp();
        let mut info = self.candidate_info(&caller).get();
        self.settle_reward(&mut info, now);

        let amount = info.unclaimed_reward.clone();
        require!(amount > 0u64, "Nothing to claim");
        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        require!(balance >= amount, "Insufficient reward balance");

        info.unclaimed_reward = BigUint::zero();
        self.candidate_info(&caller).set(&info);

        self.send().direct_egld(&caller, &amount);
        self.activity_reward_claimed_event(&caller, &amount);
    }

    // ========================================================
    // ENDPOINTS: capacity (owner or executed agenda)
    // ========================================================

    #[endpoint(setMaxMember)]
    fn set_max_member(&self, max_member: u32) {
        self.require_owner();
        if let Err(err) = self.apply_max_member(max_member) {
            sc_panic!(err);
        }
    }

    #[endpoint(reduceMemberSlot)]
    fn reduce_member_slot(&self, slot: u32) {
        self.require_owner();
        if let Err(err) = self.apply_reduce_member_slot(slot) {
            sc_panic!(err);
        }
    }

    #[endpoint(setActivityRewardPerSecond)]
    fn set_activity_reward_per_second(&self, rate: BigUint) {
        self.require_self_call();
        self.apply_activity_reward_rate(rate);
    }

    // ========================================================
    // INTERNAL: validated mutations shared with the dispatcher
    // ========================================================

    fn add_candidate(
        &self,
        candidate: ManagedAddress,
        candidate_contract: ManagedAddress,
        name: ManagedBuffer,
    ) -> Result<(), &'static str> {
        if candidate.is_zero() {
            return Err("Candidate is the zero address");
        }
        if !self.candidate_info(&candidate).is_empty() {
            return Err("Candidate already registered");
        }

        let now = self.blockchain().get_block_timestamp();
        let info = CandidateInfo {
            candidate_contract: candidate_contract.clone(),
            name: name.clone(),
            registered_at: now,
            member_slot: None,
            member_joined_at: 0,
            reward_checkpoint: now,
            unclaimed_reward: BigUint::zero(),
        };
        self.candidate_info(&candidate).set(&info);
        self.candidates().insert(candidate.clone());

        self.candidate_registered_event(&candidate, &candidate_contract, &name);
        Ok(())
    }

    /// Grows the roster with empty slots, or shrinks it by packing the
    /// occupants into the lowest slots first.
    fn apply_max_member(&self, max_member: u32) -> Result<(), &'static str> {
        if max_member == 0 {
            return Err("Capacity must be positive");
        }
        if max_member > MAX_MEMBER_LIMIT {
            return Err("Capacity exceeds member limit");
        }
        let target = max_member as usize;
        if target < self.occupied_slot_count() {
            return Err("Capacity below occupied slots");
        }

        let mut slots = self.member_slots();
        let previous = slots.len();
        if target > previous {
            for _ in previous..target {
                slots.push(&ManagedAddress::zero());
            }
        } else if target < previous {
            let mut write = 1usize;
            for read in 1..=previous {
                let occupant = slots.get(read);
                if occupant.is_zero() {
                    continue;
                }
                if read != write {
                    slots.set(write, &occupant);
                    self.candidate_info(&occupant)
                        .update(|info| info.member_slot = Some((write - 1) as u32));
                }
                write += 1;
            }
            for index in write..=target {
                slots.set(index, &ManagedAddress::zero());
            }
            while slots.len() > target {
                let last = slots.len();
                slots.swap_remove(last);
            }
        }

        self.max_member_changed_event(previous as u32, max_member);
        Ok(())
    }

    /// Drops exactly one slot. Its occupant is evicted and the last slot
    /// moves into its place, so capacity shrinks by one per call.
    fn apply_reduce_member_slot(&self, slot: u32) -> Result<(), &'static str> {
        let mut slots = self.member_slots();
        let capacity = slots.len();
        if capacity <= 1 {
            return Err("Cannot reduce below one slot");
        }
        if slot as usize >= capacity {
            return Err("Invalid member slot");
        }

        let index = slot as usize + 1;
        let occupant = slots.get(index);
        if !occupant.is_zero() {
            let now = self.blockchain().get_block_timestamp();
            self.vacate_member(&occupant, now);
        }

        slots.swap_remove(index);
        if index <= slots.len() {
            let moved = slots.get(index);
            if !moved.is_zero() {
                self.candidate_info(&moved)
                    .update(|info| info.member_slot = Some(slot));
            }
        }

        self.member_slot_reduced_event(slot, slots.len() as u32);
        Ok(())
    }

    /// Settles every member at the outgoing rate before switching, so
    /// tenure already served is paid at the rate that was in force.
    fn apply_activity_reward_rate(&self, rate: BigUint) {
        let now = self.blockchain().get_block_timestamp();
        for occupant in self.member_slots().iter() {
            if occupant.is_zero() {
                continue;
            }
            let mut info = self.candidate_info(&occupant).get();
            self.settle_reward(&mut info, now);
            self.candidate_info(&occupant).set(&info);
        }
        self.write_activity_reward_per_second(rate);
    }

    /// Clears membership on the candidate record. The caller owns the slot
    /// vector and decides what happens to the vacated slot.
    fn vacate_member(&self, member: &ManagedAddress, now: u64) {
        let mut info = self.candidate_info(member).get();
        let slot = info.member_slot.unwrap_or_default();
        self.settle_reward(&mut info, now);
        info.member_slot = None;
        self.candidate_info(member).set(&info);

        self.member_retired_event(member, slot);
    }

    fn settle_reward(&self, info: &mut CandidateInfo<Self::Api>, now: u64) {
        if info.member_slot.is_some() && now > info.reward_checkpoint {
            let elapsed = now - info.reward_checkpoint;
            info.unclaimed_reward += &self.activity_reward_per_second().get() * elapsed;
        }
        info.reward_checkpoint = now;
    }

    fn stake_of(&self, account: &ManagedAddress) -> BigUint {
        let staking_addr = self.staking_address().get();
        self.tx()
            .to(&staking_addr)
            .typed(staking_proxy::StakingProxy)
            .get_stake(account.clone())
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn occupied_slot_count(&self) -> usize {
        self.member_slots()
            .iter()
            .filter(|occupant| !occupant.is_zero())
            .count()
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(maxMember)]
    fn max_member(&self) -> u32 {
        self.member_slots().len() as u32
    }

    #[view(isMember)]
    fn is_member(&self, account: &ManagedAddress) -> bool {
        !self.candidate_info(account).is_empty()
            && self.candidate_info(account).get().member_slot.is_some()
    }

    #[view(isCandidate)]
    fn is_candidate(&self, account: &ManagedAddress) -> bool {
        !self.candidate_info(account).is_empty()
    }

    #[view(getCandidateInfo)]
    fn get_candidate_info(&self, account: &ManagedAddress) -> CandidateInfo<Self::Api> {
        require!(self.is_candidate(account), "Not a candidate");
        self.candidate_info(account).get()
    }

    #[view(getMembers)]
    fn get_members(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for occupant in self.member_slots().iter() {
            result.push(occupant);
        }
        result
    }

    #[view(getMemberSlot)]
    fn get_member_slot(&self, slot: u32) -> MemberSlot<Self::Api> {
        require!(
            (slot as usize) < self.member_slots().len(),
            "Invalid member slot"
        );
        let occupant = self.member_slots().get(slot as usize + 1);
        let (joined_at, reward_checkpoint) = if occupant.is_zero() {
            (0, 0)
        } else {
            let info = self.candidate_info(&occupant).get();
            (info.member_joined_at, info.reward_checkpoint)
        };
        MemberSlot {
            index: slot,
            occupant,
            joined_at,
            reward_checkpoint,
        }
    }

    #[view(getClaimableActivityReward)]
    fn get_claimable_activity_reward(&self, account: &ManagedAddress) -> BigUint {
        if !self.is_candidate(account) {
            return BigUint::zero();
        }
        let now = self.blockchain().get_block_timestamp();
        let mut info = self.candidate_info(account).get();
        self.settle_reward(&mut info, now);
        info.unclaimed_reward
    }

    #[view(getCandidates)]
    fn get_candidates(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for candidate in self.candidates().iter() {
            result.push(candidate);
        }
        result
    }

    // ========================================================
    // STORAGE
    // ========================================================

    /// Slot `i` lives at mapper index `i + 1`
    #[storage_mapper("memberSlots")]
    fn member_slots(&self) -> VecMapper<ManagedAddress>;

    #[storage_mapper("candidateInfo")]
    fn candidate_info(&self, candidate: &ManagedAddress) -> SingleValueMapper<CandidateInfo<Self::Api>>;

    #[storage_mapper("candidates")]
    fn candidates(&self) -> UnorderedSetMapper<ManagedAddress>;

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("candidateRegistered")]
    fn candidate_registered_event(
        &self,
        #[indexed] candidate: &ManagedAddress,
        #[indexed] candidate_contract: &ManagedAddress,
        name: &ManagedBuffer,
    );

    #[event("memberChanged")]
    fn member_changed_event(
        &self,
        #[indexed] slot: u32,
        #[indexed] previous: &ManagedAddress,
        #[indexed] new_member: &ManagedAddress,
    );

    #[event("memberRetired")]
    fn member_retired_event(&self, #[indexed] member: &ManagedAddress, #[indexed] slot: u32);

    #[event("maxMemberChanged")]
    fn max_member_changed_event(&self, #[indexed] previous: u32, #[indexed] max_member: u32);

    #[event("memberSlotReduced")]
    fn member_slot_reduced_event(&self, #[indexed] slot: u32, #[indexed] max_member: u32);

    #[event("activityRewardClaimed")]
    fn activity_reward_claimed_event(&self, #[indexed] member: &ManagedAddress, amount: &BigUint);
}
