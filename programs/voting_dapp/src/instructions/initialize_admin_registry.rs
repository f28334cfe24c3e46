use anchor_lang::prelude::*;
use crate::pda::ADMIN_REGISTRY_SEED;
use crate::states::{AdminRegistry, RegistryInitialized};

/// Whoever creates the registry becomes its permanent super admin. The PDA
/// has a single fixed seed, so a second call fails with "already in use".
pub fn handler(ctx: Context<InitializeAdminRegistry>) -> Result<()> {
    let super_admin = ctx.accounts.super_admin.key();
    ctx.accounts
        .admin_registry
        .initialize(super_admin, ctx.bumps.admin_registry);

    msg!("Admin registry initialized");
    msg!("Super admin: {}", super_admin);
    emit!(RegistryInitialized { super_admin });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeAdminRegistry<'info> {
    #[account(
        init,
        payer = super_admin,
        space = AdminRegistry::SPACE,
        seeds = [ADMIN_REGISTRY_SEED],
        bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    #[account(mut)]
    pub super_admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
