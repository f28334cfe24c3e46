use anchor_lang::prelude::*;
use crate::auth::Caller;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED, ELECTION_SEED};
use crate::states::{
    Admin, AdminRegistry, Election, ElectionConfig, ElectionCreated, Permission,
};

/// Takes the next id from the registry counter. The election PDA is derived
/// from the counter before this bump.
pub fn open_election(
    registry: &mut AdminRegistry,
    caller: Caller,
    cfg: ElectionConfig,
    bump: u8,
) -> Result<Election> {
    registry.ensure_not_paused()?;
    caller.authorize(registry, Permission::ManageElections)?;
    cfg.validate()?;
    let election_id = registry.allocate_election_id()?;
    Ok(Election::from_config(cfg, election_id, caller.key, bump))
}

pub fn handler(ctx: Context<CreateElection>, cfg: ElectionConfig) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let caller = Caller {
        key: authority,
        admin: ctx.accounts.admin_account.as_deref(),
    };
    let election = open_election(
        &mut ctx.accounts.admin_registry,
        caller,
        cfg,
        ctx.bumps.election,
    )?;
    let election_id = election.election_id;
    ctx.accounts.election.set_inner(election);

    let election = &ctx.accounts.election;
    msg!("Election created");
    msg!("Election ID: {}", election.election_id);
    msg!("Title: {}", election.title);
    emit!(ElectionCreated {
        election: election.key(),
        election_id,
        authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CreateElection<'info> {
    #[account(
        mut,
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    // absent when the super admin signs
    #[account(
        seeds = [ADMIN_SEED, authority.key().as_ref()],
        bump = admin_account.bump
    )]
    pub admin_account: Option<Account<'info, Admin>>,

    #[account(
        init,
        payer = authority,
        space = Election::SPACE,
        seeds = [ELECTION_SEED, &admin_registry.election_count.to_le_bytes()],
        bump
    )]
    pub election: Account<'info, Election>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
