//! # Roles and authorisation checks
//!
//! The election recognises a closed set of roles:
//!
//! | Role              | Held by                                   | Grants                         |
//! |-------------------|-------------------------------------------|--------------------------------|
//! | Administrator     | the address passed to `initialize`        | every governance operation     |
//! | ElectoralOfficial | addresses added by the administrator      | `register_voter`               |
//! | Voter             | addresses with a voter record             | `vote` (once)                  |
//! | Candidate         | addresses with a candidate record         | nothing; receives votes        |
//!
//! Entry points authenticate the caller with `require_auth` first and then
//! call one of the `require_*` helpers below before touching any state.
//!
//! ## Storage Keys
//!
//! - `DataKey::Admin` (instance) → Address
//! - `DataKey::Official(addr)` (persistent) → bool

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::voter::{self, VoterStatus};
use crate::{candidate, DataKey, ElectionError};

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Administrator = 0,
    ElectoralOfficial = 1,
    Voter = 2,
    Candidate = 3,
}

pub(crate) fn admin(env: &Env) -> Result<Address, ElectionError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ElectionError::NotInitialized)
}

pub(crate) fn is_official(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Official(who.clone()))
        .unwrap_or(false)
}

pub(crate) fn add_official(env: &Env, who: &Address) {
    let key = DataKey::Official(who.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Whether `who` currently holds `role`.
pub fn has_role(env: &Env, who: &Address, role: Role) -> bool {
    match role {
        Role::Administrator => admin(env).map(|a| a == *who).unwrap_or(false),
        Role::ElectoralOfficial => is_official(env, who),
        Role::Voter => voter::status_of(env, who) != VoterStatus::NotRegistered,
        Role::Candidate => candidate::exists(env, who),
    }
}

pub(crate) fn roles_of(env: &Env, who: &Address) -> Vec<Role> {
    let mut held = Vec::new(env);
    for role in [
        Role::Administrator,
        Role::ElectoralOfficial,
        Role::Voter,
        Role::Candidate,
    ] {
        if has_role(env, who, role) {
            held.push_back(role);
        }
    }
    held
}

pub(crate) fn require_admin(env: &Env, caller: &Address) -> Result<(), ElectionError> {
    if *caller != admin(env)? {
        return Err(ElectionError::Unauthorized);
    }
    Ok(())
}

/// Administrator or electoral official.
pub(crate) fn require_registrar(env: &Env, caller: &Address) -> Result<(), ElectionError> {
    if has_role(env, caller, Role::Administrator) || is_official(env, caller) {
        return Ok(());
    }
    Err(ElectionError::Unauthorized)
}
