//! Voter records and their lifecycle.
//!
//! ```text
//! NotRegistered ──register_voter──► Registered ──vote──► Voted
//!                                       │                  ▲
//!                                       └──verify_digital_identity(approved = true)
//! ```
//!
//! Status only ever moves forward. Records are created once and never deleted.

use soroban_sdk::{contracttype, Address, Env};

use crate::DataKey;

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Discriminants are part of the public interface (1 = registered, 2 = voted).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoterStatus {
    NotRegistered = 0,
    Registered = 1,
    Voted = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRecord {
    pub status: VoterStatus,
    /// Outcome of the most recent `verify_digital_identity` call.
    pub identity_verified: bool,
    pub registered_at: u64,
}

impl VoterRecord {
    pub fn new(registered_at: u64) -> Self {
        Self {
            status: VoterStatus::Registered,
            identity_verified: false,
            registered_at,
        }
    }

    pub fn has_voted(&self) -> bool {
        self.status == VoterStatus::Voted
    }

    pub(crate) fn mark_voted(&mut self) {
        self.status = VoterStatus::Voted;
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn voter_key(voter: &Address) -> DataKey {
    DataKey::Voter(voter.clone())
}

pub(crate) fn store(env: &Env, voter: &Address, record: &VoterRecord) {
    let key = voter_key(voter);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, voter: &Address) -> Option<VoterRecord> {
    env.storage().persistent().get(&voter_key(voter))
}

pub(crate) fn exists(env: &Env, voter: &Address) -> bool {
    env.storage().persistent().has(&voter_key(voter))
}

pub(crate) fn status_of(env: &Env, voter: &Address) -> VoterStatus {
    load(env, voter)
        .map(|r| r.status)
        .unwrap_or(VoterStatus::NotRegistered)
}
