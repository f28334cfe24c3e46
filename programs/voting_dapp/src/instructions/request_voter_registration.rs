use anchor_lang::prelude::*;
use crate::pda::{ADMIN_REGISTRY_SEED, ELECTION_SEED, VOTER_REGISTRATION_SEED};
use crate::states::{AdminRegistry, Election, VoterRegistration, VoterRegistrationChanged};

/// `registration` is either freshly zeroed or the voter's existing record,
/// which is refused with `AlreadyRegistered`.
pub fn request_registration(
    registry: &AdminRegistry,
    election: &Election,
    election_key: Pubkey,
    voter: Pubkey,
    registration: &mut VoterRegistration,
    now: i64,
    bump: u8,
) -> Result<()> {
    registry.ensure_not_paused()?;
    election.ensure_registration_open()?;
    registration.open(election_key, voter, now, bump)
}

pub fn handler(ctx: Context<RequestVoterRegistration>) -> Result<()> {
    let election = &ctx.accounts.election;
    let election_key = election.key();
    let voter = ctx.accounts.voter.key();
    let registration = &mut ctx.accounts.voter_registration;
    request_registration(
        &ctx.accounts.admin_registry,
        election,
        election_key,
        voter,
        registration,
        Clock::get()?.unix_timestamp,
        ctx.bumps.voter_registration,
    )?;

    msg!("Voter registration requested");
    msg!("Voter: {}", voter);
    msg!("Election: {}", election.title);
    emit!(VoterRegistrationChanged {
        election: election_key,
        voter,
        status: registration.status,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RequestVoterRegistration<'info> {
    #[account(
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    #[account(
        seeds = [ELECTION_SEED, election.election_id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    // init_if_needed so a repeat request reaches the handler and reports
    // AlreadyRegistered instead of a bare "already in use"
    #[account(
        init_if_needed,
        payer = voter,
        space = VoterRegistration::SPACE,
        seeds = [VOTER_REGISTRATION_SEED, election.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub voter_registration: Account<'info, VoterRegistration>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}
