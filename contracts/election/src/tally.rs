//! Result projection and winner selection.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::candidate::Candidate;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateResult {
    pub candidate: Address,
    pub name: String,
    pub vote_count: u32,
}

/// Pick the entry with the highest count.
///
/// Entries must arrive in registration order. The first entry seeds the
/// leader and is only replaced by a strictly greater count, so a tie goes to
/// whichever candidate registered first. Returns `None` for an empty ballot.
pub fn select_winner<I>(entries: I) -> Option<(Address, u32)>
where
    I: IntoIterator<Item = (Address, u32)>,
{
    let mut leader: Option<(Address, u32)> = None;
    for (candidate, count) in entries {
        match &leader {
            Some((_, best)) if count <= *best => {}
            _ => leader = Some((candidate, count)),
        }
    }
    leader
}

pub(crate) fn results(env: &Env, candidates: &Vec<Candidate>) -> Vec<CandidateResult> {
    let mut out = Vec::new(env);
    for c in candidates.iter() {
        out.push_back(CandidateResult {
            candidate: c.address,
            name: c.name,
            vote_count: c.vote_count,
        });
    }
    out
}

pub(crate) fn vote_counts(env: &Env, candidates: &Vec<Candidate>) -> Vec<u32> {
    let mut out = Vec::new(env);
    for c in candidates.iter() {
        out.push_back(c.vote_count);
    }
    out
}
