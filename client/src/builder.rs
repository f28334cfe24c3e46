//! One function per program instruction.
//!
//! Addresses come from `voting_dapp::pda` and the account lists from the
//! program's generated `accounts` structs, so they cannot drift from the
//! on-chain constraints.

use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use voting_dapp::instructions::{Review, StatusChange};
use voting_dapp::pda;
use voting_dapp::states::{AdminPermissions, CandidateProfile, ElectionConfig};
use voting_dapp::{accounts, instruction};

/// Signer of an admin-gated instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminKey {
    /// Passes without an `Admin` account.
    Super(Pubkey),
    Delegated(Pubkey),
}

impl AdminKey {
    pub fn authority(&self) -> Pubkey {
        match self {
            AdminKey::Super(key) | AdminKey::Delegated(key) => *key,
        }
    }

    fn admin_account(&self, program_id: &Pubkey) -> Option<Pubkey> {
        match self {
            AdminKey::Super(_) => None,
            AdminKey::Delegated(key) => Some(pda::admin_address(key, program_id).0),
        }
    }
}

fn build(program_id: &Pubkey, accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

fn registry(program_id: &Pubkey) -> Pubkey {
    pda::admin_registry_address(program_id).0
}

pub fn initialize_admin_registry(program_id: &Pubkey, super_admin: &Pubkey) -> Instruction {
    build(
        program_id,
        accounts::InitializeAdminRegistry {
            admin_registry: registry(program_id),
            super_admin: *super_admin,
            system_program: system_program::ID,
        },
        instruction::InitializeAdminRegistry {},
    )
}

pub fn add_admin(
    program_id: &Pubkey,
    super_admin: &Pubkey,
    new_admin: &Pubkey,
    name: String,
    permissions: AdminPermissions,
) -> Instruction {
    build(
        program_id,
        accounts::AddAdmin {
            admin_registry: registry(program_id),
            admin_account: pda::admin_address(new_admin, program_id).0,
            new_admin: *new_admin,
            super_admin: *super_admin,
            system_program: system_program::ID,
        },
        instruction::AddAdmin { name, permissions },
    )
}

pub fn update_admin_permissions(
    program_id: &Pubkey,
    super_admin: &Pubkey,
    admin: &Pubkey,
    permissions: AdminPermissions,
) -> Instruction {
    build(
        program_id,
        accounts::UpdateAdminPermissions {
            admin_registry: registry(program_id),
            admin_account: pda::admin_address(admin, program_id).0,
            super_admin: *super_admin,
        },
        instruction::UpdateAdminPermissions { permissions },
    )
}

pub fn deactivate_admin(program_id: &Pubkey, super_admin: &Pubkey, admin: &Pubkey) -> Instruction {
    build(
        program_id,
        accounts::DeactivateAdmin {
            admin_registry: registry(program_id),
            admin_account: pda::admin_address(admin, program_id).0,
            super_admin: *super_admin,
        },
        instruction::DeactivateAdmin {},
    )
}

pub fn set_paused(program_id: &Pubkey, super_admin: &Pubkey, paused: bool) -> Instruction {
    let keys = accounts::SetPaused {
        admin_registry: registry(program_id),
        super_admin: *super_admin,
    };
    if paused {
        build(program_id, keys, instruction::PauseSystem {})
    } else {
        build(program_id, keys, instruction::UnpauseSystem {})
    }
}

/// `next_election_id` is the registry's current `election_count`; the
/// program rejects any other address.
pub fn create_election(
    program_id: &Pubkey,
    admin: AdminKey,
    next_election_id: u64,
    cfg: ElectionConfig,
) -> Instruction {
    build(
        program_id,
        accounts::CreateElection {
            admin_registry: registry(program_id),
            admin_account: admin.admin_account(program_id),
            election: pda::election_address(next_election_id, program_id).0,
            authority: admin.authority(),
            system_program: system_program::ID,
        },
        instruction::CreateElection {
            title: cfg.title,
            description: cfg.description,
            start_time: cfg.start_time,
            end_time: cfg.end_time,
            voter_registration_type: cfg.voter_registration_type,
        },
    )
}

/// `next_candidate_id` is the election's current `candidate_count`.
pub fn add_candidate(
    program_id: &Pubkey,
    admin: AdminKey,
    election_id: u64,
    next_candidate_id: u32,
    profile: CandidateProfile,
) -> Instruction {
    let election = pda::election_address(election_id, program_id).0;
    build(
        program_id,
        accounts::AddCandidate {
            admin_registry: registry(program_id),
            admin_account: admin.admin_account(program_id),
            election,
            candidate: pda::candidate_address(&election, next_candidate_id, program_id).0,
            authority: admin.authority(),
            system_program: system_program::ID,
        },
        instruction::AddCandidate {
            name: profile.name,
            description: profile.description,
            image_url: profile.image_url,
        },
    )
}

pub fn update_election_status(
    program_id: &Pubkey,
    admin: AdminKey,
    election_id: u64,
    change: StatusChange,
) -> Instruction {
    let keys = accounts::UpdateElectionStatus {
        admin_registry: registry(program_id),
        admin_account: admin.admin_account(program_id),
        election: pda::election_address(election_id, program_id).0,
        authority: admin.authority(),
    };
    match change {
        StatusChange::Start => build(program_id, keys, instruction::StartElection {}),
        StatusChange::End => build(program_id, keys, instruction::EndElection {}),
        StatusChange::Finalize => build(program_id, keys, instruction::FinalizeElection {}),
        StatusChange::Cancel => build(program_id, keys, instruction::CancelElection {}),
    }
}

pub fn request_voter_registration(program_id: &Pubkey, voter: &Pubkey, election_id: u64) -> Instruction {
    let election = pda::election_address(election_id, program_id).0;
    build(
        program_id,
        accounts::RequestVoterRegistration {
            admin_registry: registry(program_id),
            election,
            voter_registration: pda::voter_registration_address(&election, voter, program_id).0,
            voter: *voter,
            system_program: system_program::ID,
        },
        instruction::RequestVoterRegistration {},
    )
}

pub fn review_voter_registration(
    program_id: &Pubkey,
    admin: AdminKey,
    election_id: u64,
    voter: &Pubkey,
    review: Review,
) -> Instruction {
    let election = pda::election_address(election_id, program_id).0;
    let keys = accounts::ReviewVoterRegistration {
        admin_registry: registry(program_id),
        admin_account: admin.admin_account(program_id),
        election,
        voter_registration: pda::voter_registration_address(&election, voter, program_id).0,
        authority: admin.authority(),
    };
    match review {
        Review::Approve => build(program_id, keys, instruction::ApproveVoterRegistration {}),
        Review::Reject => build(program_id, keys, instruction::RejectVoterRegistration {}),
        Review::Revoke => build(program_id, keys, instruction::RevokeVoterRegistration {}),
    }
}

/// Whitelist elections need the voter's registration account; open ones
/// leave the slot empty.
pub fn cast_vote(
    program_id: &Pubkey,
    voter: &Pubkey,
    election_id: u64,
    candidate_id: u32,
    whitelist: bool,
) -> Instruction {
    let election = pda::election_address(election_id, program_id).0;
    build(
        program_id,
        accounts::CastVote {
            admin_registry: registry(program_id),
            election,
            candidate: pda::candidate_address(&election, candidate_id, program_id).0,
            voter_registration: whitelist
                .then(|| pda::voter_registration_address(&election, voter, program_id).0),
            vote_record: pda::vote_record_address(&election, voter, program_id).0,
            voter: *voter,
            system_program: system_program::ID,
        },
        instruction::CastVote {},
    )
}

/// Registers and approves `voter` in one go. Both instructions belong in a
/// single transaction signed by the voter and the admin; the program never
/// creates a registration without the voter's signature.
pub fn manual_add_voter(
    program_id: &Pubkey,
    admin: AdminKey,
    election_id: u64,
    voter: &Pubkey,
) -> [Instruction; 2] {
    [
        request_voter_registration(program_id, voter, election_id),
        review_voter_registration(program_id, admin, election_id, voter, Review::Approve),
    ]
}
