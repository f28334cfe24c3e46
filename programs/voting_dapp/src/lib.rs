#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod auth;
pub mod errors;
pub mod instructions;
pub mod pda;
pub mod states;

use instructions::*;
use states::{AdminPermissions, CandidateProfile, ElectionConfig, VoterRegistrationType};

declare_id!("2V9BTFvNVqKszMMsgFgVyLDv1LfjpCFJCn62rQvvUCVR");

#[program]
pub mod voting_dapp {
    use super::*;

    pub fn initialize_admin_registry(ctx: Context<InitializeAdminRegistry>) -> Result<()> {
        initialize_admin_registry::handler(ctx)
    }

    pub fn add_admin(
        ctx: Context<AddAdmin>,
        name: String,
        permissions: AdminPermissions,
    ) -> Result<()> {
        add_admin::handler(ctx, name, permissions)
    }

    pub fn update_admin_permissions(
        ctx: Context<UpdateAdminPermissions>,
        permissions: AdminPermissions,
    ) -> Result<()> {
        update_admin_permissions::handler(ctx, permissions)
    }

    pub fn deactivate_admin(ctx: Context<DeactivateAdmin>) -> Result<()> {
        deactivate_admin::handler(ctx)
    }

    pub fn pause_system(ctx: Context<SetPaused>) -> Result<()> {
        set_paused::handler(ctx, true)
    }

    pub fn unpause_system(ctx: Context<SetPaused>) -> Result<()> {
        set_paused::handler(ctx, false)
    }

    pub fn create_election(
        ctx: Context<CreateElection>,
        title: String,
        description: String,
        start_time: i64,
        end_time: i64,
        voter_registration_type: VoterRegistrationType,
    ) -> Result<()> {
        create_election::handler(
            ctx,
            ElectionConfig {
                title,
                description,
                start_time,
                end_time,
                voter_registration_type,
            },
        )
    }

    pub fn add_candidate(
        ctx: Context<AddCandidate>,
        name: String,
        description: String,
        image_url: String,
    ) -> Result<()> {
        add_candidate::handler(
            ctx,
            CandidateProfile {
                name,
                description,
                image_url,
            },
        )
    }

    pub fn start_election(ctx: Context<UpdateElectionStatus>) -> Result<()> {
        update_election_status::handler(ctx, StatusChange::Start)
    }

    pub fn end_election(ctx: Context<UpdateElectionStatus>) -> Result<()> {
        update_election_status::handler(ctx, StatusChange::End)
    }

    pub fn cancel_election(ctx: Context<UpdateElectionStatus>) -> Result<()> {
        update_election_status::handler(ctx, StatusChange::Cancel)
    }

    pub fn finalize_election(ctx: Context<UpdateElectionStatus>) -> Result<()> {
        update_election_status::handler(ctx, StatusChange::Finalize)
    }

    pub fn request_voter_registration(ctx: Context<RequestVoterRegistration>) -> Result<()> {
        request_voter_registration::handler(ctx)
    }

    pub fn approve_voter_registration(ctx: Context<ReviewVoterRegistration>) -> Result<()> {
        review_voter_registration::handler(ctx, Review::Approve)
    }

    pub fn reject_voter_registration(ctx: Context<ReviewVoterRegistration>) -> Result<()> {
        review_voter_registration::handler(ctx, Review::Reject)
    }

    pub fn revoke_voter_registration(ctx: Context<ReviewVoterRegistration>) -> Result<()> {
        review_voter_registration::handler(ctx, Review::Revoke)
    }

    pub fn cast_vote(ctx: Context<CastVote>) -> Result<()> {
        cast_vote::handler(ctx)
    }
}
