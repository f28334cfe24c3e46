use anchor_lang::prelude::*;
use crate::auth::Caller;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED, ELECTION_SEED};
use crate::states::{Admin, AdminRegistry, Election, ElectionStatus, ElectionStatusChanged, Permission};

/// The four admin-driven lifecycle moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusChange {
    Start,
    End,
    Finalize,
    Cancel,
}

impl StatusChange {
    pub fn permission(self) -> Permission {
        match self {
            StatusChange::Finalize => Permission::FinalizeResults,
            _ => Permission::ManageElections,
        }
    }

    /// Applies the move to `election`, leaving it untouched on error.
    pub fn apply(self, election: &mut Election) -> Result<()> {
        match self {
            StatusChange::Start => election.start(),
            StatusChange::End => election.end(),
            StatusChange::Finalize => election.finalize(),
            StatusChange::Cancel => election.cancel(),
        }
    }
}

/// Returns the status the election left.
pub fn move_election(
    registry: &AdminRegistry,
    caller: Caller,
    election: &mut Election,
    change: StatusChange,
) -> Result<ElectionStatus> {
    registry.ensure_not_paused()?;
    caller.authorize(registry, change.permission())?;
    let from = election.status;
    change.apply(election)?;
    Ok(from)
}

pub fn handler(ctx: Context<UpdateElectionStatus>, change: StatusChange) -> Result<()> {
    let caller = Caller {
        key: ctx.accounts.authority.key(),
        admin: ctx.accounts.admin_account.as_deref(),
    };
    let election = &mut ctx.accounts.election;
    let from = move_election(&ctx.accounts.admin_registry, caller, election, change)?;

    msg!("Election {:?}: {:?} -> {:?}", change, from, election.status);
    msg!("Election ID: {}", election.election_id);
    msg!("Total votes: {}", election.total_votes);
    emit!(ElectionStatusChanged {
        election: election.key(),
        from,
        to: election.status,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateElectionStatus<'info> {
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

    pub authority: Signer<'info>,
}
