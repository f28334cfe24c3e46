//! Drives the program's instruction logic through an in-memory ledger.
//!
//! The ledger stores accounts by PDA and runs every instruction as one
//! all-or-nothing transaction: work happens on a copy that is committed only
//! when the instruction succeeds. Each method resolves accounts the way the
//! runtime does before a handler runs (`init` fails when the address is
//! taken, `init_if_needed` hands over the existing account) and then calls the
//! same per-instruction function the handler calls.

use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use voting_dapp::auth::Caller;
use voting_dapp::errors::VotingError;
use voting_dapp::instructions::*;
use voting_dapp::pda;
use voting_dapp::states::*;

use voting_dapp::ID as PROGRAM;

fn already_in_use() -> Error {
    // SystemError::AccountAlreadyInUse
    ProgramError::Custom(0).into()
}

fn missing() -> Error {
    ProgramError::UninitializedAccount.into()
}

#[derive(Clone, Default)]
struct Ledger {
    registry: Option<AdminRegistry>,
    admins: HashMap<Pubkey, Admin>,
    elections: HashMap<Pubkey, Election>,
    candidates: HashMap<Pubkey, Candidate>,
    registrations: HashMap<Pubkey, VoterRegistration>,
    votes: HashMap<Pubkey, VoteRecord>,
    now: i64,
}

impl Ledger {
    fn transact<T>(&mut self, ix: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let mut draft = self.clone();
        let out = ix(&mut draft)?;
        draft.now += 1;
        *self = draft;
        Ok(out)
    }

    fn registry(&mut self) -> Result<&mut AdminRegistry> {
        self.registry.as_mut().ok_or_else(missing)
    }

    fn initialize(&mut self, signer: Pubkey) -> Result<()> {
        self.transact(|l| {
            if l.registry.is_some() {
                return Err(already_in_use());
            }
            let (_, bump) = pda::admin_registry_address(&PROGRAM);
            let mut registry = AdminRegistry::default();
            registry.initialize(signer, bump);
            l.registry = Some(registry);
            Ok(())
        })
    }

    fn add_admin(
        &mut self,
        signer: Pubkey,
        new_admin: Pubkey,
        name: &str,
        permissions: AdminPermissions,
    ) -> Result<()> {
        self.transact(|l| {
            let (address, bump) = pda::admin_address(&new_admin, &PROGRAM);
            if l.admins.contains_key(&address) {
                return Err(already_in_use());
            }
            let now = l.now;
            let admin = admit_admin(
                l.registry()?,
                signer,
                new_admin,
                name.to_string(),
                permissions,
                now,
                bump,
            )?;
            l.admins.insert(address, admin);
            Ok(())
        })
    }

    fn update_admin(&mut self, signer: Pubkey, target: Pubkey, permissions: AdminPermissions) -> Result<()> {
        self.transact(|l| {
            let address = pda::admin_address(&target, &PROGRAM).0;
            let mut admin = l.admins.get(&address).cloned().ok_or_else(missing)?;
            regrant_admin(l.registry()?, &signer, &mut admin, permissions)?;
            l.admins.insert(address, admin);
            Ok(())
        })
    }

    fn deactivate_admin(&mut self, signer: Pubkey, target: Pubkey) -> Result<()> {
        self.transact(|l| {
            let address = pda::admin_address(&target, &PROGRAM).0;
            let mut admin = l.admins.get(&address).cloned().ok_or_else(missing)?;
            retire_admin(l.registry()?, &signer, &mut admin)?;
            l.admins.insert(address, admin);
            Ok(())
        })
    }

    fn set_paused(&mut self, signer: Pubkey, paused: bool) -> Result<()> {
        self.transact(|l| switch_pause(l.registry()?, &signer, paused))
    }

    /// The signer's own `Admin` account, passed only when it exists.
    fn caller(admins: &HashMap<Pubkey, Admin>, signer: Pubkey) -> Caller<'_> {
        Caller {
            key: signer,
            admin: admins.get(&pda::admin_address(&signer, &PROGRAM).0),
        }
    }

    fn create_election(&mut self, signer: Pubkey, cfg: ElectionConfig) -> Result<Pubkey> {
        self.transact(|l| {
            let Ledger {
                registry,
                admins,
                elections,
                ..
            } = l;
            let registry = registry.as_mut().ok_or_else(missing)?;
            let (address, bump) = pda::election_address(registry.election_count, &PROGRAM);
            if elections.contains_key(&address) {
                return Err(already_in_use());
            }
            let election = open_election(registry, Self::caller(admins, signer), cfg, bump)?;
            elections.insert(address, election);
            Ok(address)
        })
    }

    fn add_candidate(&mut self, signer: Pubkey, election: Pubkey, name: &str) -> Result<Pubkey> {
        self.transact(|l| {
            let now = l.now;
            let Ledger {
                registry,
                admins,
                elections,
                candidates,
                ..
            } = l;
            let registry = registry.as_ref().ok_or_else(missing)?;
            let record = elections.get_mut(&election).ok_or_else(missing)?;
            let (address, bump) = pda::candidate_address(&election, record.candidate_count, &PROGRAM);
            if candidates.contains_key(&address) {
                return Err(already_in_use());
            }
            let profile = CandidateProfile {
                name: name.to_string(),
                description: String::new(),
                image_url: String::new(),
            };
            let candidate = enroll_candidate(
                registry,
                Self::caller(admins, signer),
                record,
                election,
                profile,
                now,
                bump,
            )?;
            candidates.insert(address, candidate);
            Ok(address)
        })
    }

    fn change_status(&mut self, signer: Pubkey, election: Pubkey, change: StatusChange) -> Result<()> {
        self.transact(|l| {
            let Ledger {
                registry,
                admins,
                elections,
                ..
            } = l;
            let registry = registry.as_ref().ok_or_else(missing)?;
            let record = elections.get_mut(&election).ok_or_else(missing)?;
            move_election(registry, Self::caller(admins, signer), record, change)?;
            Ok(())
        })
    }

    fn request_registration(&mut self, voter: Pubkey, election: Pubkey) -> Result<()> {
        self.transact(|l| {
            let now = l.now;
            let Ledger {
                registry,
                elections,
                registrations,
                ..
            } = l;
            let registry = registry.as_ref().ok_or_else(missing)?;
            let record = elections.get(&election).ok_or_else(missing)?;
            let (address, bump) = pda::voter_registration_address(&election, &voter, &PROGRAM);
            // init_if_needed: a zeroed account on first use, the stored one after
            let registration = registrations.entry(address).or_default();
            request_registration(registry, record, election, voter, registration, now, bump)
        })
    }

    fn review(&mut self, signer: Pubkey, election: Pubkey, voter: Pubkey, review: Review) -> Result<()> {
        self.transact(|l| {
            let now = l.now;
            let Ledger {
                registry,
                admins,
                registrations,
                ..
            } = l;
            let registry = registry.as_ref().ok_or_else(missing)?;
            let address = pda::voter_registration_address(&election, &voter, &PROGRAM).0;
            let registration = registrations.get_mut(&address).ok_or_else(missing)?;
            review_registration(registry, Self::caller(admins, signer), registration, review, now)
        })
    }

    fn cast_vote(&mut self, voter: Pubkey, election: Pubkey, candidate: Pubkey) -> Result<()> {
        self.transact(|l| {
            let ballot = Ballot {
                election,
                candidate,
                voter,
                voted_at: l.now,
            };
            let Ledger {
                registry,
                elections,
                candidates,
                registrations,
                votes,
                ..
            } = l;
            let registry = registry.as_ref().ok_or_else(missing)?;
            let election_account = elections.get_mut(&election).ok_or_else(missing)?;
            let candidate_account = candidates.get_mut(&candidate).ok_or_else(missing)?;
            let registration =
                registrations.get(&pda::voter_registration_address(&election, &voter, &PROGRAM).0);
            let (record_address, bump) = pda::vote_record_address(&election, &voter, &PROGRAM);
            let record = votes.entry(record_address).or_default();
            record_vote(
                registry,
                &ballot,
                election_account,
                candidate_account,
                registration,
                record,
                bump,
            )
        })
    }

    fn election(&self, key: &Pubkey) -> &Election {
        &self.elections[key]
    }

    fn votes_for(&self, key: &Pubkey) -> u64 {
        self.candidates[key].vote_count
    }

    fn candidate_sum(&self, election: &Pubkey) -> u64 {
        self.candidates
            .values()
            .filter(|c| c.election == *election)
            .map(|c| c.vote_count)
            .sum()
    }
}

fn config(title: &str, registration: VoterRegistrationType) -> ElectionConfig {
    ElectionConfig {
        title: title.to_string(),
        description: "annual".to_string(),
        start_time: 1_700_000_000,
        end_time: 1_700_086_400,
        voter_registration_type: registration,
    }
}

fn assert_err<T: std::fmt::Debug>(res: Result<T>, expected: VotingError) {
    assert_eq!(res.unwrap_err(), Error::from(expected));
}

struct Setup {
    ledger: Ledger,
    root: Pubkey,
    election: Pubkey,
    candidates: Vec<Pubkey>,
}

fn setup(registration: VoterRegistrationType, names: &[&str], start: bool) -> Setup {
    let root = Pubkey::new_unique();
    let mut ledger = Ledger::default();
    ledger.initialize(root).unwrap();
    let election = ledger
        .create_election(root, config("Council Vote", registration))
        .unwrap();
    let candidates = names
        .iter()
        .map(|name| ledger.add_candidate(root, election, name).unwrap())
        .collect();
    if start {
        ledger
            .change_status(root, election, StatusChange::Start)
            .unwrap();
    }
    Setup {
        ledger,
        root,
        election,
        candidates,
    }
}

#[test]
fn council_vote_walkthrough() {
    let Setup {
        mut ledger,
        root,
        election,
        candidates,
    } = setup(VoterRegistrationType::Open, &["Alice", "Bob"], false);
    let (alice, bob) = (candidates[0], candidates[1]);
    assert_eq!(ledger.election(&election).status, ElectionStatus::Draft);
    assert_eq!(ledger.election(&election).candidate_count, 2);
    assert_eq!(ledger.candidates[&bob].candidate_id, 1);

    ledger.change_status(root, election, StatusChange::Start).unwrap();
    assert_eq!(ledger.election(&election).status, ElectionStatus::Active);

    let voter = Pubkey::new_unique();
    ledger.cast_vote(voter, election, alice).unwrap();
    assert_eq!(ledger.votes_for(&alice), 1);
    assert_eq!(ledger.election(&election).total_votes, 1);

    assert_err(ledger.cast_vote(voter, election, bob), VotingError::AlreadyVoted);
    assert_eq!(ledger.votes_for(&alice), 1);
    assert_eq!(ledger.votes_for(&bob), 0);

    ledger.change_status(root, election, StatusChange::End).unwrap();
    ledger.change_status(root, election, StatusChange::Finalize).unwrap();
    assert_eq!(ledger.election(&election).status, ElectionStatus::Finalized);

    assert_err(
        ledger.add_candidate(root, election, "Carol"),
        VotingError::CannotModifyActiveElection,
    );
    assert_err(
        ledger.cast_vote(Pubkey::new_unique(), election, alice),
        VotingError::ElectionNotActive,
    );
}

#[test]
fn registry_initializes_once() {
    let mut ledger = Ledger::default();
    let root = Pubkey::new_unique();
    ledger.initialize(root).unwrap();
    assert_eq!(ledger.initialize(Pubkey::new_unique()).unwrap_err(), already_in_use());
    assert_eq!(ledger.registry.as_ref().unwrap().super_admin, root);
}

#[test]
fn election_ids_follow_the_counter() {
    let Setup { mut ledger, root, .. } = setup(VoterRegistrationType::Open, &[], false);
    let second = ledger
        .create_election(root, config("Budget", VoterRegistrationType::Open))
        .unwrap();
    assert_eq!(ledger.election(&second).election_id, 1);
    assert_eq!(second, pda::election_address(1, &PROGRAM).0);
    assert_eq!(ledger.registry.as_ref().unwrap().election_count, 2);

    // a rejected create leaves the counter alone
    let mut bad = config("Budget", VoterRegistrationType::Open);
    bad.end_time = bad.start_time;
    assert_err(ledger.create_election(root, bad), VotingError::InvalidTimeRange);
    assert_eq!(ledger.registry.as_ref().unwrap().election_count, 2);
}

#[test]
fn double_vote_loses_in_either_order() {
    for first_wins_with in [0usize, 1] {
        let Setup {
            mut ledger,
            election,
            candidates,
            ..
        } = setup(VoterRegistrationType::Open, &["Alice", "Bob"], true);
        let voter = Pubkey::new_unique();

        // two submissions from one voter race; inclusion order decides
        let order = [candidates[first_wins_with], candidates[1 - first_wins_with]];
        let outcomes: Vec<_> = order
            .iter()
            .map(|candidate| ledger.cast_vote(voter, election, *candidate))
            .collect();

        assert!(outcomes[0].is_ok());
        assert_eq!(
            outcomes[1].as_ref().unwrap_err(),
            &Error::from(VotingError::AlreadyVoted)
        );
        assert_eq!(ledger.votes_for(&order[0]), 1);
        assert_eq!(ledger.votes_for(&order[1]), 0);
        assert_eq!(ledger.election(&election).total_votes, 1);

        let record = &ledger.votes[&pda::vote_record_address(&election, &voter, &PROGRAM).0];
        assert_eq!(record.candidate, order[0]);
    }
}

#[test]
fn shuffled_ballots_count_each_voter_once() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..25 {
        let Setup {
            mut ledger,
            election,
            candidates,
            ..
        } = setup(VoterRegistrationType::Open, &["Alice", "Bob", "Carol"], true);
        let voters: Vec<Pubkey> = (0..12).map(|_| Pubkey::new_unique()).collect();

        // every voter submits between one and three ballots
        let mut ballots = Vec::new();
        for voter in &voters {
            for _ in 0..rng.gen_range(1..=3) {
                ballots.push((*voter, candidates[rng.gen_range(0..candidates.len())]));
            }
        }
        ballots.shuffle(&mut rng);

        let mut accepted = HashMap::new();
        for (voter, candidate) in ballots {
            match ledger.cast_vote(voter, election, candidate) {
                Ok(()) => assert!(accepted.insert(voter, candidate).is_none()),
                Err(err) => {
                    assert_eq!(err, Error::from(VotingError::AlreadyVoted));
                    assert!(accepted.contains_key(&voter));
                }
            }
        }

        assert_eq!(accepted.len(), voters.len());
        assert_eq!(ledger.election(&election).total_votes, voters.len() as u64);
        assert_eq!(ledger.candidate_sum(&election), voters.len() as u64);
        for candidate in &candidates {
            let expected = accepted.values().filter(|c| *c == candidate).count() as u64;
            assert_eq!(ledger.votes_for(candidate), expected);
        }
    }
}

#[test]
fn status_only_moves_forward() {
    const CHANGES: [StatusChange; 4] = [
        StatusChange::Start,
        StatusChange::End,
        StatusChange::Finalize,
        StatusChange::Cancel,
    ];
    let rank = |status: ElectionStatus| match status {
        ElectionStatus::Draft => 0,
        ElectionStatus::Active => 1,
        ElectionStatus::Ended => 2,
        ElectionStatus::Finalized => 3,
        ElectionStatus::Cancelled => 4,
    };

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let Setup {
            mut ledger,
            root,
            election,
            ..
        } = setup(VoterRegistrationType::Open, &["Alice"], false);
        let mut seen = vec![ElectionStatus::Draft];
        for _ in 0..8 {
            let before = ledger.election(&election).status;
            let change = CHANGES[rng.gen_range(0..CHANGES.len())];
            let result = ledger.change_status(root, election, change);
            let after = ledger.election(&election).status;
            if result.is_err() {
                assert_eq!(before, after);
            } else if after != *seen.last().unwrap() {
                seen.push(after);
            }
        }

        let cancelled_at = seen.iter().position(|s| *s == ElectionStatus::Cancelled);
        if let Some(at) = cancelled_at {
            assert_eq!(at, seen.len() - 1, "cancel is absorbing: {seen:?}");
            assert!(seen[..at]
                .iter()
                .all(|s| matches!(s, ElectionStatus::Draft | ElectionStatus::Active)));
        }
        let forward = &seen[..cancelled_at.unwrap_or(seen.len())];
        assert!(
            forward.windows(2).all(|w| rank(w[1]) == rank(w[0]) + 1),
            "skipped or reversed: {seen:?}"
        );
    }
}

#[test]
fn empty_election_cannot_start() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Open, &[], false);
    assert_err(
        ledger.change_status(root, election, StatusChange::Start),
        VotingError::NoCandidates,
    );
    assert_eq!(ledger.election(&election).status, ElectionStatus::Draft);
}

#[test]
fn whitelist_votes_need_approval() {
    let mut rng = StdRng::seed_from_u64(42);
    let Setup {
        mut ledger,
        root,
        election,
        candidates,
    } = setup(VoterRegistrationType::Whitelist, &["Alice", "Bob"], true);

    for _ in 0..30 {
        let voter = Pubkey::new_unique();
        // 0: never asked, 1: pending, 2: approved, 3: rejected, 4: revoked
        let path = rng.gen_range(0..5);
        if path > 0 {
            ledger.request_registration(voter, election).unwrap();
        }
        match path {
            2 => ledger.review(root, election, voter, Review::Approve).unwrap(),
            3 => ledger.review(root, election, voter, Review::Reject).unwrap(),
            4 => {
                ledger.review(root, election, voter, Review::Approve).unwrap();
                ledger.review(root, election, voter, Review::Revoke).unwrap();
            }
            _ => {}
        }

        let result = ledger.cast_vote(voter, election, candidates[0]);
        if path == 2 {
            result.unwrap();
        } else {
            assert_err(result, VotingError::VoterNotRegistered);
        }
    }
    assert_eq!(ledger.election(&election).total_votes, ledger.candidate_sum(&election));
}

#[test]
fn open_elections_ignore_registrations() {
    let Setup {
        mut ledger,
        election,
        candidates,
        ..
    } = setup(VoterRegistrationType::Open, &["Alice"], true);
    let voter = Pubkey::new_unique();
    assert_err(
        ledger.request_registration(voter, election),
        VotingError::RegistrationNotRequired,
    );

    // even a stray revoked record is never consulted
    let address = pda::voter_registration_address(&election, &voter, &PROGRAM).0;
    ledger.registrations.insert(
        address,
        VoterRegistration {
            election,
            voter,
            status: RegistrationStatus::Revoked,
            ..Default::default()
        },
    );
    ledger.cast_vote(voter, election, candidates[0]).unwrap();
}

#[test]
fn revocation_keeps_past_votes() {
    let Setup {
        mut ledger,
        root,
        election,
        candidates,
    } = setup(VoterRegistrationType::Whitelist, &["Alice"], true);
    let voter = Pubkey::new_unique();
    ledger.request_registration(voter, election).unwrap();
    ledger.review(root, election, voter, Review::Approve).unwrap();
    ledger.cast_vote(voter, election, candidates[0]).unwrap();
    ledger.review(root, election, voter, Review::Revoke).unwrap();

    assert_eq!(ledger.votes_for(&candidates[0]), 1);
    assert!(ledger
        .votes
        .contains_key(&pda::vote_record_address(&election, &voter, &PROGRAM).0));
}

#[test]
fn second_registration_request_changes_nothing() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Whitelist, &["Alice"], false);
    let voter = Pubkey::new_unique();
    let address = pda::voter_registration_address(&election, &voter, &PROGRAM).0;

    ledger.request_registration(voter, election).unwrap();
    ledger.review(root, election, voter, Review::Approve).unwrap();
    let before = ledger.registrations[&address].clone();

    assert_err(
        ledger.request_registration(voter, election),
        VotingError::AlreadyRegistered,
    );
    let after = &ledger.registrations[&address];
    assert_eq!(after.status, before.status);
    assert_eq!(after.requested_at, before.requested_at);
    assert_eq!(after.approved_at, before.approved_at);
}

#[test]
fn closed_elections_refuse_registrations() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Whitelist, &["Alice"], true);
    ledger.change_status(root, election, StatusChange::Cancel).unwrap();
    assert_err(
        ledger.request_registration(Pubkey::new_unique(), election),
        VotingError::ElectionClosed,
    );
}

#[test]
fn delegated_admins_are_checked_every_call() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Open, &["Alice"], false);
    let delegate = Pubkey::new_unique();
    ledger
        .add_admin(
            root,
            delegate,
            "Dana",
            AdminPermissions {
                can_manage_candidates: true,
                ..AdminPermissions::none()
            },
        )
        .unwrap();
    assert_eq!(
        ledger
            .add_admin(root, delegate, "Dana", AdminPermissions::full())
            .unwrap_err(),
        already_in_use()
    );
    assert_err(
        ledger.add_admin(delegate, Pubkey::new_unique(), "Eve", AdminPermissions::full()),
        VotingError::Unauthorized,
    );

    ledger.add_candidate(delegate, election, "Bob").unwrap();
    assert_err(
        ledger.change_status(delegate, election, StatusChange::Start),
        VotingError::InsufficientPermissions,
    );

    ledger.deactivate_admin(root, delegate).unwrap();
    assert_err(
        ledger.add_candidate(delegate, election, "Carol"),
        VotingError::AdminNotActive,
    );
    assert_err(
        ledger.add_candidate(Pubkey::new_unique(), election, "Dave"),
        VotingError::Unauthorized,
    );
    assert_eq!(ledger.election(&election).candidate_count, 2);
}

#[test]
fn finalizing_needs_its_own_permission() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Open, &["Alice"], true);
    let manager = Pubkey::new_unique();
    ledger
        .add_admin(
            root,
            manager,
            "Mo",
            AdminPermissions {
                can_manage_elections: true,
                ..AdminPermissions::none()
            },
        )
        .unwrap();
    ledger.change_status(manager, election, StatusChange::End).unwrap();
    assert_err(
        ledger.change_status(manager, election, StatusChange::Finalize),
        VotingError::InsufficientPermissions,
    );
    ledger.change_status(root, election, StatusChange::Finalize).unwrap();
}

#[test]
fn pause_freezes_everything_but_unpause() {
    let Setup {
        mut ledger,
        root,
        election,
        candidates,
    } = setup(VoterRegistrationType::Open, &["Alice"], true);
    ledger.set_paused(root, true).unwrap();
    assert_err(
        ledger.cast_vote(Pubkey::new_unique(), election, candidates[0]),
        VotingError::SystemPaused,
    );
    assert_err(
        ledger.change_status(root, election, StatusChange::End),
        VotingError::SystemPaused,
    );
    assert_err(
        ledger.set_paused(Pubkey::new_unique(), false),
        VotingError::Unauthorized,
    );

    ledger.set_paused(root, false).unwrap();
    ledger
        .cast_vote(Pubkey::new_unique(), election, candidates[0])
        .unwrap();
}

#[test]
fn candidates_from_other_elections_are_refused() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Open, &["Alice"], true);
    let other = ledger
        .create_election(root, config("Budget", VoterRegistrationType::Open))
        .unwrap();
    let stranger = ledger.add_candidate(root, other, "Zed").unwrap();
    assert_err(
        ledger.cast_vote(Pubkey::new_unique(), election, stranger),
        VotingError::InvalidCandidate,
    );
}

#[test]
fn admin_names_are_checked_before_anything_is_counted() {
    let mut ledger = Ledger::default();
    let root = Pubkey::new_unique();
    ledger.initialize(root).unwrap();
    let key = Pubkey::new_unique();

    assert_err(
        ledger.add_admin(root, key, &"n".repeat(MAX_NAME + 1), AdminPermissions::full()),
        VotingError::NameTooLong,
    );
    assert_err(
        ledger.add_admin(root, key, "  ", AdminPermissions::full()),
        VotingError::InvalidInput,
    );
    assert_eq!(ledger.registry.as_ref().unwrap().admin_count, 0);
    assert!(ledger.admins.is_empty());

    ledger.add_admin(root, key, "Election Office", AdminPermissions::full()).unwrap();
    let admin = &ledger.admins[&pda::admin_address(&key, &PROGRAM).0];
    assert_eq!(admin.name, "Election Office");
    assert_eq!(admin.added_by, root);
    assert_eq!(ledger.registry.as_ref().unwrap().admin_count, 1);
}

#[test]
fn permission_updates_apply_on_the_next_call() {
    let Setup {
        mut ledger,
        root,
        election,
        ..
    } = setup(VoterRegistrationType::Open, &["Alice"], false);
    let delegate = Pubkey::new_unique();
    ledger
        .add_admin(root, delegate, "Dana", AdminPermissions::none())
        .unwrap();
    assert_err(
        ledger.change_status(delegate, election, StatusChange::Start),
        VotingError::InsufficientPermissions,
    );
    assert_err(
        ledger.update_admin(delegate, delegate, AdminPermissions::full()),
        VotingError::Unauthorized,
    );

    ledger
        .update_admin(
            root,
            delegate,
            AdminPermissions {
                can_manage_elections: true,
                ..AdminPermissions::none()
            },
        )
        .unwrap();
    ledger
        .change_status(delegate, election, StatusChange::Start)
        .unwrap();
}

#[test]
fn deactivation_happens_once() {
    let mut ledger = Ledger::default();
    let root = Pubkey::new_unique();
    ledger.initialize(root).unwrap();
    let key = Pubkey::new_unique();
    ledger.add_admin(root, key, "Dana", AdminPermissions::full()).unwrap();

    ledger.deactivate_admin(root, key).unwrap();
    assert_eq!(ledger.registry.as_ref().unwrap().admin_count, 0);
    assert_err(ledger.deactivate_admin(root, key), VotingError::AdminNotActive);
    assert_eq!(ledger.registry.as_ref().unwrap().admin_count, 0);
    assert!(!ledger.admins[&pda::admin_address(&key, &PROGRAM).0].is_active);
}
