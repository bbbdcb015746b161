// programs/incident_pool/src/instructions/roles.rs

use anchor_lang::prelude::*;
use crate::state::{Role, RoleRegistry};
use crate::errors::PoolError;
use crate::events::{RoleGranted, RoleRevoked};

/// Grant or revoke a role (admin only)
#[derive(Accounts)]
pub struct ManageRole<'info> {
    #[account(
        mut,
        seeds = [RoleRegistry::SEED_PREFIX],
        bump = role_registry.bump,
        constraint = role_registry.has_role(Role::Admin, &admin.key()) @ PoolError::Unauthorized
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    pub admin: Signer<'info>,
}

pub fn grant_role(ctx: Context<ManageRole>, role: Role, account: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let registry = &mut ctx.accounts.role_registry;

    registry.grant(role, account)?;

    emit!(RoleGranted {
        role,
        account,
        granted_by: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

pub fn revoke_role(ctx: Context<ManageRole>, role: Role, account: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let registry = &mut ctx.accounts.role_registry;

    registry.revoke(role, account)?;

    emit!(RoleRevoked {
        role,
        account,
        revoked_by: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
