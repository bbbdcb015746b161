// programs/incident_pool/src/instructions/views.rs
//
// Read-only entry points. Values are returned through Anchor return data
// so clients can simulate them without parsing raw account bytes.

use anchor_lang::prelude::*;
use crate::instructions::claims::load_claim;
use crate::state::{ClaimAccount, ClaimView, PoolState};

#[derive(Accounts)]
pub struct ReadPool<'info> {
    #[account(
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,
}

#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct ReadClaim<'info> {
    #[account(
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    /// CHECK: claim PDA for `claim_id`; loaded by `load_claim`
    #[account(
        seeds = [ClaimAccount::SEED_PREFIX, &claim_id.to_le_bytes()],
        bump,
    )]
    pub claim: UncheckedAccount<'info>,
}

pub fn get_pool_balance(ctx: Context<ReadPool>) -> Result<u64> {
    Ok(ctx.accounts.pool_state.total_balance)
}

pub fn emergency_pool_balance(ctx: Context<ReadPool>) -> Result<u64> {
    Ok(ctx.accounts.pool_state.emergency_balance)
}

pub fn available_liquidity(ctx: Context<ReadPool>) -> Result<u64> {
    ctx.accounts.pool_state.available_liquidity()
}

pub fn get_claim(ctx: Context<ReadClaim>, claim_id: u64) -> Result<ClaimView> {
    let claim_info: &AccountInfo = Box::leak(Box::new(ctx.accounts.claim.to_account_info()));
    let claim = load_claim(&ctx.accounts.pool_state, claim_info, claim_id)?;
    Ok(ClaimView::from(&*claim))
}
