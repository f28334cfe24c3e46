//! Seed labels and address derivation shared by the program and its clients.
//!
//! Every account the program owns lives at a PDA built from one of these
//! labels plus its parent keys, so anyone can compute an address offline.

use anchor_lang::prelude::*;

pub const ADMIN_REGISTRY_SEED: &[u8] = b"admin_registry";
pub const ADMIN_SEED: &[u8] = b"admin";
pub const ELECTION_SEED: &[u8] = b"election";
pub const CANDIDATE_SEED: &[u8] = b"candidate";
pub const VOTER_REGISTRATION_SEED: &[u8] = b"voter_registration";
pub const VOTE_RECORD_SEED: &[u8] = b"vote_record";

/// Panics if no bump yields an off-curve address, which does not happen in
/// practice for these seed sizes.
pub fn admin_registry_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ADMIN_REGISTRY_SEED], program_id)
}

pub fn admin_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ADMIN_SEED, authority.as_ref()], program_id)
}

pub fn election_address(election_id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ELECTION_SEED, &election_id.to_le_bytes()], program_id)
}

pub fn candidate_address(election: &Pubkey, candidate_id: u32, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CANDIDATE_SEED, election.as_ref(), &candidate_id.to_le_bytes()],
        program_id,
    )
}

pub fn voter_registration_address(
    election: &Pubkey,
    voter: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VOTER_REGISTRATION_SEED, election.as_ref(), voter.as_ref()],
        program_id,
    )
}

pub fn vote_record_address(election: &Pubkey, voter: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VOTE_RECORD_SEED, election.as_ref(), voter.as_ref()],
        program_id,
    )
}
