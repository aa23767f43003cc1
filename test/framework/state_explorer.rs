//! # State Space Explorer
//!
//! Executes election action sequences against a deployed contract and
//! verifies state and transition invariants after every step.
//!
//! Each explored state is an `ElectionSnapshot`; edges are `ElectionAction`s.
//! The explorer tracks every identity in its pool so `TurnoutBound` can be
//! checked exactly.

extern crate std;

use soroban_sdk::{Address, String as SorobanString};
use std::string::String;
use std::vec::Vec;

use super::generators::ElectionAction;
use super::invariants::{InvariantSet, TransitionInvariant, TransitionInvariantSet, VoteRecorded};
use super::{ActionOutcome, ElectionSnapshot, ElectionTestHarness, TestRunSummary};

// ── Explorer Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions to execute in a single exploration run.
    pub max_steps: usize,
    /// Whether to halt on the first invariant violation.
    pub fail_fast: bool,
    /// Whether to record snapshots for later analysis.
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<ElectionSnapshot>,
    pub action_log: Vec<(ElectionAction, ActionOutcome)>,
    /// Votes the contract accepted, as (voter, candidate).
    pub accepted_votes: Vec<(Address, Address)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of actions the contract rejected with an error code.
    pub fn rejected_actions(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| matches!(o, ActionOutcome::ExpectedError(_)))
            .count()
    }

    /// Number of actions that failed outside the contract's error set.
    pub fn unexpected_failures(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| matches!(o, ActionOutcome::UnexpectedError(_)))
            .count()
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Runs action sequences against an election harness.
pub struct StateExplorer<'a> {
    harness: &'a ElectionTestHarness<'a>,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
    users: Vec<Address>,
}

impl<'a> StateExplorer<'a> {
    pub fn new(
        harness: &'a ElectionTestHarness<'a>,
        invariants: InvariantSet,
        transitions: TransitionInvariantSet,
        config: ExplorerConfig,
        users: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions,
            config,
            users,
        }
    }

    /// Explorer with default configuration and all built-in invariants.
    pub fn with_defaults(harness: &'a ElectionTestHarness<'a>, users: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::election_defaults(),
            TransitionInvariantSet::election_defaults(),
            ExplorerConfig::default(),
            users,
        )
    }

    /// Execute a sequence of actions, checking invariants after each.
    pub fn explore(&mut self, actions: &[ElectionAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();
        let mut accepted_votes = Vec::new();

        let mut previous = self.harness.snapshot(&self.users);
        if self.config.record_snapshots {
            snapshots.push(previous.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let outcome = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;

            let snapshot = self.harness.snapshot(&self.users);
            let mut violations = self.invariants.check_all(&snapshot);
            violations.extend(self.transitions.check_all(&previous, &snapshot));

            if let (ElectionAction::Vote { voter_index, candidate_index }, ActionOutcome::Ok) =
                (action, &outcome)
            {
                let voter = self.user(*voter_index).clone();
                let candidate = self.user(*candidate_index).clone();
                let recorded = VoteRecorded {
                    candidate: candidate.clone(),
                };
                if let Err(msg) = recorded.check(&previous, &snapshot) {
                    violations.push((recorded.name().into(), msg));
                }
                accepted_votes.push((voter, candidate));
            }
            summary.invariant_checks += 1;

            action_log.push((action.clone(), outcome));

            let halt = !violations.is_empty() && self.config.fail_fast;
            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(snapshot.clone());
            }
            previous = snapshot;

            if halt {
                break;
            }
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
            accepted_votes,
        }
    }

    fn user(&self, index: usize) -> &Address {
        &self.users[index % self.users.len()]
    }

    fn caller(&self, index: &Option<usize>) -> Address {
        match index {
            Some(i) => self.user(*i).clone(),
            None => self.harness.admin.clone(),
        }
    }

    fn execute_action(&self, action: &ElectionAction) -> ActionOutcome {
        let client = &self.harness.client;
        let admin = &self.harness.admin;

        macro_rules! outcome {
            ($call:expr) => {
                match $call {
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
                }
            };
        }

        match action {
            ElectionAction::AddOfficial { user_index } => {
                outcome!(client.try_add_electoral_official(admin, self.user(*user_index)))
            }
            ElectionAction::RegisterCandidate { user_index } => {
                let env = &self.harness.env.env;
                outcome!(client.try_register_candidate(
                    admin,
                    self.user(*user_index),
                    &SorobanString::from_str(env, "Candidate"),
                    &35,
                    &SorobanString::from_str(env, "Manifesto"),
                ))
            }
            ElectionAction::RegisterVoter {
                caller_index,
                user_index,
            } => {
                let caller = self.caller(caller_index);
                outcome!(client.try_register_voter(&caller, self.user(*user_index)))
            }
            ElectionAction::Vote {
                voter_index,
                candidate_index,
            } => outcome!(client.try_vote(self.user(*voter_index), self.user(*candidate_index))),
            ElectionAction::VerifyIdentity {
                user_index,
                approved,
            } => outcome!(client.try_verify_digital_identity(
                admin,
                self.user(*user_index),
                approved
            )),
            ElectionAction::CloseElection { caller_index } => {
                let caller = self.caller(caller_index);
                outcome!(client.try_close_election(&caller))
            }
            ElectionAction::AdvanceTime { delta } => {
                self.harness.env.advance_time(*delta);
                ActionOutcome::Ok
            }
        }
    }
}

/// Map an election action to its entry point name for coverage tracking.
fn action_entry_point(action: &ElectionAction) -> String {
    match action {
        ElectionAction::AddOfficial { .. } => "add_electoral_official".into(),
        ElectionAction::RegisterCandidate { .. } => "register_candidate".into(),
        ElectionAction::RegisterVoter { .. } => "register_voter".into(),
        ElectionAction::Vote { .. } => "vote".into(),
        ElectionAction::VerifyIdentity { .. } => "verify_digital_identity".into(),
        ElectionAction::CloseElection { .. } => "close_election".into(),
        ElectionAction::AdvanceTime { .. } => "advance_time".into(),
    }
}

/// State-changing election entry points, for coverage calculation.
pub const ELECTION_ENTRY_POINTS: &[&str] = &[
    "add_electoral_official",
    "register_candidate",
    "register_voter",
    "vote",
    "verify_digital_identity",
    "close_election",
];
