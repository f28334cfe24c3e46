use anchor_lang::prelude::*;
use crate::auth::require_super_admin;
use crate::pda::ADMIN_REGISTRY_SEED;
use crate::states::{AdminRegistry, SystemPauseChanged};

/// Unpausing is the one action a paused registry still accepts.
pub fn switch_pause(registry: &mut AdminRegistry, super_admin: &Pubkey, paused: bool) -> Result<()> {
    require_super_admin(registry, super_admin)?;
    registry.paused = paused;
    Ok(())
}

pub fn handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let super_admin = ctx.accounts.super_admin.key();
    switch_pause(&mut ctx.accounts.admin_registry, &super_admin, paused)?;

    msg!("System {}", if paused { "paused" } else { "unpaused" });
    emit!(SystemPauseChanged { paused });
    Ok(())
}

#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        mut,
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    pub super_admin: Signer<'info>,
}
