#![allow(deprecated)]
//! Structured event publishing for the Election contract.

use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfficialAddedEvent {
    pub official: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateRegisteredEvent {
    pub candidate: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRegisteredEvent {
    pub voter: Address,
    pub timestamp: u64,
}

/// Carries the voter and the chosen candidate, not a count.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub voter: Address,
    pub candidate: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityVerifiedEvent {
    pub voter: Address,
    pub approved: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionClosedEvent {
    pub total_votes: u32,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: &Address) {
    let data = InitializedEvent {
        admin: admin.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((symbol_short!("INIT"),), data);
}

pub fn publish_official_added(env: &Env, official: &Address) {
    let data = OfficialAddedEvent {
        official: official.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("OFF_ADD"), official.clone()), data);
}

pub fn publish_candidate_registered(env: &Env, candidate: &Address) {
    let data = CandidateRegisteredEvent {
        candidate: candidate.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("CND_REG"), candidate.clone()), data);
}

pub fn publish_voter_registered(env: &Env, voter: &Address) {
    let data = VoterRegisteredEvent {
        voter: voter.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("VTR_REG"), voter.clone()), data);
}

pub fn publish_vote_cast(env: &Env, voter: &Address, candidate: &Address) {
    let data = VoteCastEvent {
        voter: voter.clone(),
        candidate: candidate.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("VOTE"), candidate.clone()), data);
}

pub fn publish_identity_verified(env: &Env, voter: &Address, approved: bool) {
    let data = IdentityVerifiedEvent {
        voter: voter.clone(),
        approved,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("ID_VRF"), voter.clone()), data);
}

pub fn publish_election_closed(env: &Env, total_votes: u32) {
    let data = ElectionClosedEvent {
        total_votes,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((symbol_short!("CLOSED"),), data);
}
