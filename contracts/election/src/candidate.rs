//! Candidate records and the registration-order sequence.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::DataKey;

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// A registered candidate. Only `vote_count` changes after registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub address: Address,
    pub name: String,
    pub age: u32,
    pub manifesto: String,
    pub vote_count: u32,
    pub registered_at: u64,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn candidate_key(candidate: &Address) -> DataKey {
    DataKey::Candidate(candidate.clone())
}

pub(crate) fn store(env: &Env, candidate: &Candidate) {
    let key = candidate_key(&candidate.address);
    env.storage().persistent().set(&key, candidate);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, candidate: &Address) -> Option<Candidate> {
    env.storage().persistent().get(&candidate_key(candidate))
}

pub(crate) fn exists(env: &Env, candidate: &Address) -> bool {
    env.storage().persistent().has(&candidate_key(candidate))
}

/// Registration order. Persistent rather than instance storage: it grows by
/// one entry per candidate.
pub(crate) fn order(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::CandidateOrder)
        .unwrap_or(Vec::new(env))
}

pub(crate) fn append_to_order(env: &Env, candidate: &Address) {
    let mut sequence = order(env);
    sequence.push_back(candidate.clone());
    env.storage()
        .persistent()
        .set(&DataKey::CandidateOrder, &sequence);
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::CandidateOrder, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// All candidate records, in registration order.
pub(crate) fn load_all(env: &Env) -> Vec<Candidate> {
    let mut all = Vec::new(env);
    for address in order(env).iter() {
        if let Some(candidate) = load(env, &address) {
            all.push_back(candidate);
        }
    }
    all
}
