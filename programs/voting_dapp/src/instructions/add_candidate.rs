use anchor_lang::prelude::*;
use crate::auth::Caller;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED, CANDIDATE_SEED, ELECTION_SEED};
use crate::states::{
    Admin, AdminRegistry, Candidate, CandidateAdded, CandidateProfile, Election, Permission,
};

/// Takes the next id from the election's counter; only Draft elections
/// accept candidates.
pub fn enroll_candidate(
    registry: &AdminRegistry,
    caller: Caller,
    election: &mut Election,
    election_key: Pubkey,
    profile: CandidateProfile,
    now: i64,
    bump: u8,
) -> Result<Candidate> {
    registry.ensure_not_paused()?;
    caller.authorize(registry, Permission::ManageCandidates)?;
    profile.validate()?;
    let candidate_id = election.allocate_candidate_id()?;
    Ok(Candidate {
        election: election_key,
        candidate_id,
        name: profile.name,
        description: profile.description,
        image_url: profile.image_url,
        vote_count: 0,
        added_by: caller.key,
        added_at: now,
        bump,
    })
}

pub fn handler(ctx: Context<AddCandidate>, profile: CandidateProfile) -> Result<()> {
    let election_key = ctx.accounts.election.key();
    let caller = Caller {
        key: ctx.accounts.authority.key(),
        admin: ctx.accounts.admin_account.as_deref(),
    };
    let candidate = enroll_candidate(
        &ctx.accounts.admin_registry,
        caller,
        &mut ctx.accounts.election,
        election_key,
        profile,
        Clock::get()?.unix_timestamp,
        ctx.bumps.candidate,
    )?;
    let candidate_id = candidate.candidate_id;
    ctx.accounts.candidate.set_inner(candidate);

    let candidate = &ctx.accounts.candidate;
    msg!("Candidate added");
    msg!("Election: {}", ctx.accounts.election.title);
    msg!("Candidate: {}", candidate.name);
    msg!("Candidate ID: {}", candidate_id);
    emit!(CandidateAdded {
        election: election_key,
        candidate: candidate.key(),
        candidate_id,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AddCandidate<'info> {
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
        mut,
        seeds = [ELECTION_SEED, election.election_id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    // ids are handed out from the election's counter
    #[account(
        init,
        payer = authority,
        space = Candidate::SPACE,
        seeds = [
            CANDIDATE_SEED,
            election.key().as_ref(),
            election.candidate_count.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub candidate: Account<'info, Candidate>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
