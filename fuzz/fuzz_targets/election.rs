#![no_main]

use arbitrary::Arbitrary;
use election::voter::VoterStatus;
use election::{ElectionContract, ElectionContractClient, ElectionPhase};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};

/// Actions covering every state-changing election entry point.
///
/// Participant indices are reduced modulo the pool size; `by_admin = false`
/// routes governance calls through a pool member instead.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    AddOfficial { who: u8, by_admin: bool },
    RegisterCandidate { who: u8, age: u32, by_admin: bool },
    RegisterVoter { caller: u8, who: u8 },
    Vote { voter: u8, candidate: u8 },
    VerifyIdentity { who: u8, approved: bool },
    Close { by_admin: bool },
    AdvanceTime { delta: u16 },
}

const POOL: usize = 6;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let contract_id = env.register(ElectionContract, ());
    let client = ElectionContractClient::new(&env, &contract_id);

    if client.try_initialize(&admin).is_err() {
        return;
    }

    let users: Vec<Address> = (0..POOL).map(|_| Address::generate(&env)).collect();
    let pick = |i: u8| &users[i as usize % POOL];
    let name = String::from_str(&env, "fuzz");

    let mut accepted: u32 = 0;
    let mut closed = false;

    for action in actions {
        let before: Vec<VoterStatus> = users.iter().map(|u| status(&client, u)).collect();

        match action {
            FuzzAction::AddOfficial { who, by_admin } => {
                let caller = if by_admin { &admin } else { pick(who) };
                let _ = client.try_add_electoral_official(caller, pick(who));
            }
            FuzzAction::RegisterCandidate { who, age, by_admin } => {
                let caller = if by_admin { &admin } else { pick(who) };
                let _ = client.try_register_candidate(caller, pick(who), &name, &age, &name);
            }
            FuzzAction::RegisterVoter { caller, who } => {
                let registrar = if caller % 2 == 0 { &admin } else { pick(caller) };
                let _ = client.try_register_voter(registrar, pick(who));
            }
            FuzzAction::Vote { voter, candidate } => {
                let ok = client.try_vote(pick(voter), pick(candidate)).is_ok();
                if ok {
                    assert!(!closed, "INVARIANT VIOLATION: vote accepted after close");
                    accepted += 1;
                }
            }
            FuzzAction::VerifyIdentity { who, approved } => {
                let _ = client.try_verify_digital_identity(&admin, pick(who), &approved);
            }
            FuzzAction::Close { by_admin } => {
                let caller = if by_admin { &admin } else { pick(0) };
                let ok = client.try_close_election(caller).is_ok();
                if ok {
                    assert!(by_admin, "INVARIANT VIOLATION: non-admin closed the election");
                    assert!(!closed, "INVARIANT VIOLATION: election closed twice");
                    closed = true;
                }
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let total = client.total_votes();
        assert_eq!(total, accepted, "INVARIANT VIOLATION: total_votes drifted");

        let mut sum: u64 = 0;
        let mut tallies = Vec::new();
        for c in client.get_candidates().iter() {
            let count = client.get_candidate_details(&c).vote_count;
            sum += count as u64;
            tallies.push((c, count));
        }
        assert_eq!(sum, total as u64, "INVARIANT VIOLATION: tallies != total_votes");

        // Highest count wins; the earliest registration breaks ties.
        let top = tallies.iter().map(|(_, n)| *n).max();
        match top {
            Some(top) => {
                let first = tallies.iter().find(|(_, n)| *n == top).cloned();
                assert_eq!(Some(client.get_winner()), first);
            }
            None => assert!(client.try_get_winner().is_err()),
        }

        for (u, prev) in users.iter().zip(before.iter()) {
            let now = status(&client, u);
            assert!(
                now as u32 >= *prev as u32,
                "INVARIANT VIOLATION: voter status went backwards"
            );
        }

        let phase = client.get_phase();
        assert_eq!(phase == ElectionPhase::Closed, closed);
    }
});

fn status(client: &ElectionContractClient, who: &Address) -> VoterStatus {
    client
        .get_voter(who)
        .map(|r| r.status)
        .unwrap_or(VoterStatus::NotRegistered)
}
