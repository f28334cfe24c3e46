use anchor_lang::prelude::*;

use crate::errors::VotingError;
use crate::states::{Admin, AdminRegistry, Permission};

/// How a signer got through the admin gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authority {
    SuperAdmin,
    Admin,
}

/// Signer of an admin-gated instruction, with their `Admin` account when one
/// was passed.
#[derive(Clone, Copy, Debug)]
pub struct Caller<'a> {
    pub key: Pubkey,
    pub admin: Option<&'a Admin>,
}

impl Caller<'_> {
    pub fn authorize(&self, registry: &AdminRegistry, permission: Permission) -> Result<Authority> {
        authorize(registry, &self.key, self.admin, permission)
    }
}

pub fn require_super_admin(registry: &AdminRegistry, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(registry.super_admin, *signer, VotingError::Unauthorized);
    Ok(())
}

/// Admin gate for every privileged instruction.
///
/// The super admin passes without an `Admin` account and ignores the
/// permission flags. Anyone else needs an active `Admin` record for their own
/// key carrying `permission`. Nothing is cached; each call checks afresh.
pub fn authorize(
    registry: &AdminRegistry,
    signer: &Pubkey,
    admin: Option<&Admin>,
    permission: Permission,
) -> Result<Authority> {
    if registry.is_super_admin(signer) {
        return Ok(Authority::SuperAdmin);
    }
    let Some(admin) = admin else {
        return err!(VotingError::Unauthorized);
    };
    require_keys_eq!(admin.authority, *signer, VotingError::Unauthorized);
    require!(admin.is_active, VotingError::AdminNotActive);
    require!(
        admin.permissions.allows(permission),
        VotingError::InsufficientPermissions
    );
    Ok(Authority::Admin)
}
