use anchor_lang::prelude::*;
use crate::auth::require_super_admin;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED};
use crate::states::{Admin, AdminPermissions, AdminRegistry, AdminUpdated};

pub fn regrant_admin(
    registry: &AdminRegistry,
    super_admin: &Pubkey,
    admin: &mut Admin,
    permissions: AdminPermissions,
) -> Result<()> {
    require_super_admin(registry, super_admin)?;
    registry.ensure_not_paused()?;
    admin.permissions = permissions;
    Ok(())
}

pub fn handler(ctx: Context<UpdateAdminPermissions>, permissions: AdminPermissions) -> Result<()> {
    let super_admin = ctx.accounts.super_admin.key();
    let admin = &mut ctx.accounts.admin_account;
    regrant_admin(&ctx.accounts.admin_registry, &super_admin, admin, permissions)?;

    msg!("Admin permissions updated");
    msg!("Admin: {}", admin.authority);
    emit!(AdminUpdated {
        authority: admin.authority,
        permissions,
        is_active: admin.is_active,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateAdminPermissions<'info> {
    #[account(
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
