use anchor_lang::prelude::*;
use crate::auth::Caller;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED, ELECTION_SEED, VOTER_REGISTRATION_SEED};
use crate::states::{
    Admin, AdminRegistry, Election, Permission, VoterRegistration, VoterRegistrationChanged,
};

/// Admin decisions on a whitelist registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Review {
    Approve,
    Reject,
    Revoke,
}

impl Review {
    pub fn apply(self, registration: &mut VoterRegistration, reviewer: Pubkey, now: i64) -> Result<()> {
        match self {
            Review::Approve => registration.approve(reviewer, now),
            Review::Reject => registration.reject(),
            Review::Revoke => registration.revoke(),
        }
    }
}

pub fn review_registration(
    registry: &AdminRegistry,
    caller: Caller,
    registration: &mut VoterRegistration,
    review: Review,
    now: i64,
) -> Result<()> {
    registry.ensure_not_paused()?;
    caller.authorize(registry, Permission::ManageVoters)?;
    review.apply(registration, caller.key, now)
}

pub fn handler(ctx: Context<ReviewVoterRegistration>, review: Review) -> Result<()> {
    let reviewer = ctx.accounts.authority.key();
    let caller = Caller {
        key: reviewer,
        admin: ctx.accounts.admin_account.as_deref(),
    };
    let registration = &mut ctx.accounts.voter_registration;
    review_registration(
        &ctx.accounts.admin_registry,
        caller,
        registration,
        review,
        Clock::get()?.unix_timestamp,
    )?;

    msg!("Voter registration {:?}", registration.status);
    msg!("Voter: {}", registration.voter);
    msg!("Reviewed by: {}", reviewer);
    emit!(VoterRegistrationChanged {
        election: registration.election,
        voter: registration.voter,
        status: registration.status,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ReviewVoterRegistration<'info> {
    #[account(
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    #[account(
        seeds = [ADMIN_SEED, authority.key().as_ref()],
        bump = admin_account.bump
    )]
    pub admin_account: Option<Account<'info, Admin>>,

    #[account(
        seeds = [ELECTION_SEED, election.election_id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    #[account(
        mut,
        seeds = [
            VOTER_REGISTRATION_SEED,
            election.key().as_ref(),
            voter_registration.voter.as_ref()
        ],
        bump = voter_registration.bump
    )]
    pub voter_registration: Account<'info, VoterRegistration>,

    pub authority: Signer<'info>,
}
