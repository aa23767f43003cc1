#![no_std]

//! # Election
//!
//! An authorisation-gated voting ledger. One administrator configures the
//! election, registers candidates and (together with any electoral officials
//! it appoints) registers voters. Every registered voter casts exactly one
//! vote; tallies are published once the administrator closes the election.
//!
//! - **Roles**: Administrator, ElectoralOfficial, Voter, Candidate (see [`roles`])
//! - **Voter lifecycle**: NotRegistered → Registered → Voted (see [`voter`])
//! - **Candidates**: registration order is preserved and drives both result
//!   enumeration and the winner tie-break (see [`candidate`], [`tally`])
//! - **Phase**: Open → Closed, exactly once
//!
//! Every entry point validates all of its preconditions before the first
//! storage write, so a rejected call leaves state untouched.

pub mod candidate;
pub mod events;
pub mod roles;
pub mod tally;
pub mod voter;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, Address, Env, String, Vec,
};

use candidate::Candidate;
use roles::Role;
use tally::CandidateResult;
use voter::{VoterRecord, VoterStatus};

// ── Storage keys ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Phase,
    CandidateOrder,
    TotalVotes,
    Official(Address),
    Voter(Address),
    Candidate(Address),
}

// Instance TTL: ~30 days at 5s/ledger
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

// ── Error codes ───────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ElectionError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AlreadyRegistered = 4,
    NotRegistered = 5,
    CandidateNotFound = 6,
    InvalidCandidate = 7,
    AlreadyVoted = 8,
    AlreadyClosed = 9,
    ElectionOngoing = 10,
    ElectionClosed = 11,
    NoCandidates = 12,
}

// ── Election phase ────────────────────────────────────────────────────────────

/// Lifecycle flag of the election.
///
/// ```text
/// Open ──close_election──► Closed   (terminal)
/// ```
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ElectionPhase {
    Open = 0,
    Closed = 1,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct ElectionContract;

#[contractimpl]
impl ElectionContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the election with its administrator.
    ///
    /// The administrator is fixed for the lifetime of the contract; there is
    /// no entry point that replaces it.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ElectionError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(ElectionError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::Phase, &ElectionPhase::Open);
        env.storage().instance().set(&DataKey::TotalVotes, &0u32);
        env.storage().instance().set(&DataKey::Initialized, &true);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, &admin);
        log!(&env, "election initialized", admin);

        Ok(())
    }

    // ── Governance (administrator only) ───────────────────────────────────────

    /// Grant `official` the right to register voters.
    ///
    /// Membership is add-only; each identity can be added once.
    pub fn add_electoral_official(
        env: Env,
        caller: Address,
        official: Address,
    ) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_admin(&env, &caller)?;

        if roles::is_official(&env, &official) {
            return Err(ElectionError::AlreadyRegistered);
        }

        roles::add_official(&env, &official);
        Self::extend_instance_ttl(&env);

        events::publish_official_added(&env, &official);
        log!(&env, "electoral official added", official);

        Ok(())
    }

    /// Register a candidate and append it to the registration order.
    ///
    /// The order is load-bearing: results are enumerated in it and the
    /// earliest-registered candidate wins a tie.
    ///
    /// Fails with `ElectionClosed` once the election has been closed.
    pub fn register_candidate(
        env: Env,
        caller: Address,
        candidate: Address,
        name: String,
        age: u32,
        manifesto: String,
    ) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_admin(&env, &caller)?;

        if Self::phase(&env) == ElectionPhase::Closed {
            return Err(ElectionError::ElectionClosed);
        }
        if candidate::exists(&env, &candidate) {
            return Err(ElectionError::AlreadyRegistered);
        }

        let record = Candidate {
            address: candidate.clone(),
            name,
            age,
            manifesto,
            vote_count: 0,
            registered_at: env.ledger().timestamp(),
        };
        candidate::store(&env, &record);
        candidate::append_to_order(&env, &candidate);
        Self::extend_instance_ttl(&env);

        events::publish_candidate_registered(&env, &candidate);
        log!(&env, "candidate registered", candidate);

        Ok(())
    }

    /// Close the election. Closing is terminal and happens exactly once.
    pub fn close_election(env: Env, caller: Address) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_admin(&env, &caller)?;

        if Self::phase(&env) == ElectionPhase::Closed {
            return Err(ElectionError::AlreadyClosed);
        }

        env.storage()
            .instance()
            .set(&DataKey::Phase, &ElectionPhase::Closed);
        Self::extend_instance_ttl(&env);

        let total = Self::load_total_votes(&env);
        events::publish_election_closed(&env, total);
        log!(&env, "election closed", total);

        Ok(())
    }

    /// Return the registration status of `voter`.
    ///
    /// Unknown identities report `NotRegistered`; this is not an error.
    pub fn verify_voter_registration(
        env: Env,
        caller: Address,
        voter: Address,
    ) -> Result<VoterStatus, ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_admin(&env, &caller)?;

        Ok(voter::status_of(&env, &voter))
    }

    /// Record the outcome of an off-chain identity check for `voter`.
    ///
    /// An approval also moves the voter to `Voted`, the same level used for
    /// "has voted", without any ballot being counted. That voter can no
    /// longer cast a vote afterwards. A rejection only clears the flag.
    pub fn verify_digital_identity(
        env: Env,
        caller: Address,
        voter: Address,
        approved: bool,
    ) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_admin(&env, &caller)?;

        let mut record = voter::load(&env, &voter).ok_or(ElectionError::NotRegistered)?;
        record.identity_verified = approved;
        if approved {
            record.mark_voted();
        }
        voter::store(&env, &voter, &record);
        Self::extend_instance_ttl(&env);

        events::publish_identity_verified(&env, &voter, approved);
        log!(&env, "digital identity verified", voter, approved);

        Ok(())
    }

    /// Full per-candidate results in registration order.
    ///
    /// Administrator only, and only once the election is closed.
    pub fn get_election_results(
        env: Env,
        caller: Address,
    ) -> Result<Vec<CandidateResult>, ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_admin(&env, &caller)?;

        if Self::phase(&env) != ElectionPhase::Closed {
            return Err(ElectionError::ElectionOngoing);
        }

        Ok(tally::results(&env, &candidate::load_all(&env)))
    }

    // ── Voter-facing operations ───────────────────────────────────────────────

    /// Register `voter`. Callable by the administrator or an electoral official.
    pub fn register_voter(env: Env, caller: Address, voter: Address) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        roles::require_registrar(&env, &caller)?;

        if voter::exists(&env, &voter) {
            return Err(ElectionError::AlreadyRegistered);
        }

        voter::store(&env, &voter, &VoterRecord::new(env.ledger().timestamp()));
        Self::extend_instance_ttl(&env);

        events::publish_voter_registered(&env, &voter);
        log!(&env, "voter registered", voter);

        Ok(())
    }

    /// Cast `voter`'s single vote for `candidate`.
    ///
    /// Checks, in order: the voter is registered, the election is open, the
    /// candidate exists, the voter has not voted yet.
    pub fn vote(env: Env, voter: Address, candidate: Address) -> Result<(), ElectionError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        let mut record = voter::load(&env, &voter)
            .filter(|r| r.status != VoterStatus::NotRegistered)
            .ok_or(ElectionError::Unauthorized)?;

        if Self::phase(&env) == ElectionPhase::Closed {
            return Err(ElectionError::ElectionClosed);
        }

        let mut choice =
            candidate::load(&env, &candidate).ok_or(ElectionError::InvalidCandidate)?;

        if record.has_voted() {
            return Err(ElectionError::AlreadyVoted);
        }

        choice.vote_count = choice.vote_count.saturating_add(1);
        record.mark_voted();
        let total = Self::load_total_votes(&env).saturating_add(1);

        candidate::store(&env, &choice);
        voter::store(&env, &voter, &record);
        env.storage().instance().set(&DataKey::TotalVotes, &total);
        Self::extend_instance_ttl(&env);

        events::publish_vote_cast(&env, &voter, &candidate);
        log!(&env, "vote cast", voter, candidate);

        Ok(())
    }

    // ── Public queries ────────────────────────────────────────────────────────

    /// Name, age, manifesto and current vote count of `candidate`.
    pub fn get_candidate_details(env: Env, candidate: Address) -> Result<Candidate, ElectionError> {
        candidate::load(&env, &candidate).ok_or(ElectionError::CandidateNotFound)
    }

    /// Vote counts in candidate registration order, once the election is closed.
    pub fn display_election_results(env: Env) -> Result<Vec<u32>, ElectionError> {
        Self::require_initialized(&env)?;
        if Self::phase(&env) != ElectionPhase::Closed {
            return Err(ElectionError::ElectionOngoing);
        }
        Ok(tally::vote_counts(&env, &candidate::load_all(&env)))
    }

    /// Current leader and its vote count.
    ///
    /// Callable in either phase; while the election is open the answer is
    /// provisional. Ties go to the earliest-registered candidate.
    pub fn get_winner(env: Env) -> Result<(Address, u32), ElectionError> {
        Self::require_initialized(&env)?;
        let candidates = candidate::load_all(&env);
        tally::select_winner(candidates.iter().map(|c| (c.address, c.vote_count)))
            .ok_or(ElectionError::NoCandidates)
    }

    pub fn get_admin(env: Env) -> Result<Address, ElectionError> {
        roles::admin(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn is_electoral_official(env: Env, identity: Address) -> bool {
        roles::is_official(&env, &identity)
    }

    /// Every role `identity` currently holds.
    pub fn get_roles(env: Env, identity: Address) -> Vec<Role> {
        roles::roles_of(&env, &identity)
    }

    pub fn get_phase(env: Env) -> Result<ElectionPhase, ElectionError> {
        Self::require_initialized(&env)?;
        Ok(Self::phase(&env))
    }

    pub fn get_voter(env: Env, voter: Address) -> Option<VoterRecord> {
        voter::load(&env, &voter)
    }

    /// Candidate identities in registration order.
    pub fn get_candidates(env: Env) -> Vec<Address> {
        candidate::order(&env)
    }

    pub fn candidate_count(env: Env) -> u32 {
        candidate::order(&env).len()
    }

    /// Number of accepted votes. Always equals the sum of all vote counts.
    pub fn total_votes(env: Env) -> u32 {
        Self::load_total_votes(&env)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ElectionError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(ElectionError::NotInitialized);
        }
        Ok(())
    }

    fn phase(env: &Env) -> ElectionPhase {
        env.storage()
            .instance()
            .get(&DataKey::Phase)
            .unwrap_or(ElectionPhase::Open)
    }

    fn load_total_votes(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::TotalVotes)
            .unwrap_or(0u32)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
