// programs/incident_pool/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::state::{PoolState, Role, RoleRegistry};
use crate::errors::PoolError;
use crate::events::{PoolInitialized, PoolParamsUpdated, PoolPauseChanged};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + PoolState::INIT_SPACE,
        seeds = [PoolState::SEED_PREFIX],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        init,
        payer = authority,
        space = 8 + RoleRegistry::INIT_SPACE,
        seeds = [RoleRegistry::SEED_PREFIX],
        bump
    )]
    pub role_registry: Box<Account<'info, RoleRegistry>>,

    /// Main pot
    #[account(
        init,
        payer = authority,
        token::mint = token_mint,
        token::authority = pool_state,
        seeds = [PoolState::POOL_VAULT_SEED],
        bump
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    /// Ring-fenced emergency pot
    #[account(
        init,
        payer = authority,
        token::mint = token_mint,
        token::authority = pool_state,
        seeds = [PoolState::EMERGENCY_VAULT_SEED],
        bump
    )]
    pub emergency_vault: Box<Account<'info, TokenAccount>>,

    pub token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializePoolParams {
    pub per_claim_cap: Option<u64>,
    pub emergency_cap: Option<u64>,
    pub cooldown_period: Option<i64>,
    pub fee_bps: Option<u16>,
}

pub fn handler(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
    let clock = Clock::get()?;

    let per_claim_cap = params
        .per_claim_cap
        .unwrap_or(PoolState::DEFAULT_PER_CLAIM_CAP);
    let emergency_cap = params
        .emergency_cap
        .unwrap_or(PoolState::DEFAULT_EMERGENCY_CAP);
    let cooldown_period = params
        .cooldown_period
        .unwrap_or(PoolState::DEFAULT_COOLDOWN_PERIOD);
    let fee_bps = params.fee_bps.unwrap_or(PoolState::DEFAULT_FEE_BPS);

    PoolState::validate_params(per_claim_cap, emergency_cap, cooldown_period, fee_bps)?;

    let authority = ctx.accounts.authority.key();

    let pool = &mut ctx.accounts.pool_state;
    pool.authority = authority;
    pool.token_mint = ctx.accounts.token_mint.key();
    pool.total_balance = 0;
    pool.emergency_balance = 0;
    pool.reserved_total = 0;
    pool.claim_count = 0;
    pool.per_claim_cap = per_claim_cap;
    pool.emergency_cap = emergency_cap;
    pool.cooldown_period = cooldown_period;
    pool.fee_bps = fee_bps;
    pool.is_paused = false;
    pool.total_deposited = 0;
    pool.total_emergency_deposited = 0;
    pool.total_emergency_paid = 0;
    pool.total_settled = 0;
    pool.claims_approved = 0;
    pool.claims_rejected = 0;
    pool.bump = ctx.bumps.pool_state;

    let registry = &mut ctx.accounts.role_registry;
    registry.admins = vec![];
    registry.oracles = vec![];
    registry.underwriters = vec![];
    registry.bump = ctx.bumps.role_registry;
    registry.grant(Role::Admin, authority)?;

    msg!(
        "Pool initialized: per-claim cap {}, emergency cap {}",
        per_claim_cap,
        emergency_cap
    );

    emit!(PoolInitialized {
        authority,
        token_mint: ctx.accounts.token_mint.key(),
        per_claim_cap,
        emergency_cap,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Update pool parameters (admin only)
#[derive(Accounts)]
pub struct UpdatePoolParams<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [RoleRegistry::SEED_PREFIX],
        bump = role_registry.bump,
        constraint = role_registry.has_role(Role::Admin, &admin.key()) @ PoolError::Unauthorized
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    pub admin: Signer<'info>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct PoolParamsInput {
    pub per_claim_cap: Option<u64>,
    pub emergency_cap: Option<u64>,
    pub cooldown_period: Option<i64>,
    pub fee_bps: Option<u16>,
}

pub fn update_pool_params(ctx: Context<UpdatePoolParams>, params: PoolParamsInput) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_state;

    let per_claim_cap = params.per_claim_cap.unwrap_or(pool.per_claim_cap);
    let emergency_cap = params.emergency_cap.unwrap_or(pool.emergency_cap);
    let cooldown_period = params.cooldown_period.unwrap_or(pool.cooldown_period);
    let fee_bps = params.fee_bps.unwrap_or(pool.fee_bps);

    PoolState::validate_params(per_claim_cap, emergency_cap, cooldown_period, fee_bps)?;

    pool.per_claim_cap = per_claim_cap;
    pool.emergency_cap = emergency_cap;
    pool.cooldown_period = cooldown_period;
    pool.fee_bps = fee_bps;

    emit!(PoolParamsUpdated {
        per_claim_cap,
        emergency_cap,
        cooldown_period,
        fee_bps,
        updater: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Pause or resume new reservations and emergency payouts (admin only)
#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [RoleRegistry::SEED_PREFIX],
        bump = role_registry.bump,
        constraint = role_registry.has_role(Role::Admin, &admin.key()) @ PoolError::Unauthorized
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    pub admin: Signer<'info>,
}

pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_state;

    pool.is_paused = paused;
    msg!("Pool {}", if paused { "paused" } else { "resumed" });

    emit!(PoolPauseChanged {
        paused,
        changed_by: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
