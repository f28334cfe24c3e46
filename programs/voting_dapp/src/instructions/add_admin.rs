use anchor_lang::prelude::*;
use crate::auth::require_super_admin;
use crate::pda::{ADMIN_REGISTRY_SEED, ADMIN_SEED};
use crate::states::{validate_name, Admin, AdminAdded, AdminPermissions, AdminRegistry};

/// Builds the new `Admin` and counts it in the registry.
pub fn admit_admin(
    registry: &mut AdminRegistry,
    super_admin: Pubkey,
    authority: Pubkey,
    name: String,
    permissions: AdminPermissions,
    now: i64,
    bump: u8,
) -> Result<Admin> {
    require_super_admin(registry, &super_admin)?;
    registry.ensure_not_paused()?;
    validate_name(&name)?;
    registry.admin_added()?;
    Ok(Admin {
        authority,
        name,
        permissions,
        added_by: super_admin,
        added_at: now,
        is_active: true,
        bump,
    })
}

pub fn handler(ctx: Context<AddAdmin>, name: String, permissions: AdminPermissions) -> Result<()> {
    let super_admin = ctx.accounts.super_admin.key();
    let authority = ctx.accounts.new_admin.key();
    let admin = admit_admin(
        &mut ctx.accounts.admin_registry,
        super_admin,
        authority,
        name,
        permissions,
        Clock::get()?.unix_timestamp,
        ctx.bumps.admin_account,
    )?;
    ctx.accounts.admin_account.set_inner(admin);

    let registry = &ctx.accounts.admin_registry;
    msg!("Admin added");
    msg!("Admin: {}", authority);
    msg!("Total admins: {}", registry.admin_count);
    emit!(AdminAdded {
        authority,
        added_by: super_admin,
        permissions,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AddAdmin<'info> {
    #[account(
        mut,
        seeds = [ADMIN_REGISTRY_SEED],
        bump = admin_registry.bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    // one Admin per wallet: a second add for the same key fails on init
    #[account(
        init,
        payer = super_admin,
        space = Admin::SPACE,
        seeds = [ADMIN_SEED, new_admin.key().as_ref()],
        bump
    )]
    pub admin_account: Account<'info, Admin>,

    /// CHECK: only used as a seed and stored as the admin's authority
    pub new_admin: UncheckedAccount<'info>,

    #[account(mut)]
    pub super_admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
