use anchor_lang::prelude::*;
use crate::auth::require_super_admin;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED};
use crate::states::{Admin, AdminRegistry, AdminUpdated};

/// The Admin account stays on chain with `is_active = false`; every gate
/// checks the flag on each call, so the change applies immediately.
pub fn retire_admin(registry: &mut AdminRegistry, super_admin: &Pubkey, admin: &mut Admin) -> Result<()> {
    require_super_admin(registry, super_admin)?;
    registry.ensure_not_paused()?;
    admin.deactivate()?;
    registry.admin_removed();
    Ok(())
}

pub fn handler(ctx: Context<DeactivateAdmin>) -> Result<()> {
    let super_admin = ctx.accounts.super_admin.key();
    let admin = &mut ctx.accounts.admin_account;
    retire_admin(&mut ctx.accounts.admin_registry, &super_admin, admin)?;

    msg!("Admin deactivated");
    msg!("Admin: {}", admin.authority);
    emit!(AdminUpdated {
        authority: admin.authority,
        permissions: admin.permissions,
        is_active: false,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct DeactivateAdmin<'info> {
    #[account(
        mut,
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    #[account(
        mut,
        seeds = [ADMIN_SEED, admin_account.authority.as_ref()],
        bump = admin_account.bump
    )]
    pub admin_account: Account<'info, Admin>,

    pub super_admin: Signer<'info>,
}
