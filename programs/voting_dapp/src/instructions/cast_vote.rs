use anchor_lang::prelude::*;
use crate::pda::{ADMIN_REGISTRY_SEED, CANDIDATE_SEED, ELECTION_SEED, VOTER_REGISTRATION_SEED, VOTE_RECORD_SEED};
use crate::states::{AdminRegistry, Ballot, Candidate, Election, VoteCast, VoteRecord, VoterRegistration};

pub fn record_vote(
    registry: &AdminRegistry,
    ballot: &Ballot,
    election: &mut Election,
    candidate: &mut Candidate,
    registration: Option<&VoterRegistration>,
    record: &mut VoteRecord,
    record_bump: u8,
) -> Result<()> {
    registry.ensure_not_paused()?;
    ballot.apply(election, candidate, registration, record, record_bump)
}

pub fn handler(ctx: Context<CastVote>) -> Result<()> {
    let ballot = Ballot {
        election: ctx.accounts.election.key(),
        candidate: ctx.accounts.candidate.key(),
        voter: ctx.accounts.voter.key(),
        voted_at: Clock::get()?.unix_timestamp,
    };
    record_vote(
        &ctx.accounts.admin_registry,
        &ballot,
        &mut ctx.accounts.election,
        &mut ctx.accounts.candidate,
        ctx.accounts.voter_registration.as_deref(),
        &mut ctx.accounts.vote_record,
        ctx.bumps.vote_record,
    )?;

    let election = &ctx.accounts.election;
    let candidate = &ctx.accounts.candidate;
    msg!("Vote cast");
    msg!("Voter: {}", ballot.voter);
    msg!("Candidate: {}", candidate.name);
    msg!("Candidate vote count: {}", candidate.vote_count);
    msg!("Total election votes: {}", election.total_votes);
    emit!(VoteCast {
        election: ballot.election,
        voter: ballot.voter,
        candidate: ballot.candidate,
        candidate_votes: candidate.vote_count,
        total_votes: election.total_votes,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CastVote<'info> {
    #[account(
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    #[account(
        mut,
        seeds = [ELECTION_SEED, election.election_id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    #[account(
        mut,
        seeds = [
            CANDIDATE_SEED,
            election.key().as_ref(),
            candidate.candidate_id.to_le_bytes().as_ref()
        ],
        bump = candidate.bump
    )]
    pub candidate: Account<'info, Candidate>,

    // Open elections pass the program id here, which Anchor reads as None
    #[account(
        seeds = [VOTER_REGISTRATION_SEED, election.key().as_ref(), voter.key().as_ref()],
        bump = voter_registration.bump
    )]
    pub voter_registration: Option<Account<'info, VoterRegistration>>,

    // existence of this account is the "has voted" flag; init_if_needed lets
    // a second ballot reach the handler and fail with AlreadyVoted
    #[account(
        init_if_needed,
        payer = voter,
        space = VoteRecord::SPACE,
        seeds = [VOTE_RECORD_SEED, election.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}
