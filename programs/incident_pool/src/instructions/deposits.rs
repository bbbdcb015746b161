// programs/incident_pool/src/instructions/deposits.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::state::{DepositTarget, PoolState};
use crate::errors::PoolError;
use crate::events::Deposited;

/// Deposit into the main pot (anyone)
#[derive(Accounts)]
pub struct DepositToPool<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [PoolState::POOL_VAULT_SEED],
        bump,
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = source.mint == pool_state.token_mint @ PoolError::InvalidMint
    )]
    pub source: Account<'info, TokenAccount>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit_to_pool(ctx: Context<DepositToPool>, amount: u64) -> Result<()> {
    require!(amount > 0, PoolError::InvalidAmount);
    let clock = Clock::get()?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.pool_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    let new_balance = ctx.accounts.pool_state.record_deposit(amount)?;

    emit!(Deposited {
        depositor: ctx.accounts.depositor.key(),
        target: DepositTarget::Main,
        amount,
        new_balance,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Deposit into the emergency pot (anyone)
#[derive(Accounts)]
pub struct DepositToEmergencyPool<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        mut,
        seeds = [PoolState::EMERGENCY_VAULT_SEED],
        bump,
    )]
    pub emergency_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = source.mint == pool_state.token_mint @ PoolError::InvalidMint
    )]
    pub source: Account<'info, TokenAccount>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit_to_emergency_pool(ctx: Context<DepositToEmergencyPool>, amount: u64) -> Result<()> {
    require!(amount > 0, PoolError::InvalidAmount);
    let clock = Clock::get()?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.emergency_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    let new_balance = ctx.accounts.pool_state.record_emergency_deposit(amount)?;

    emit!(Deposited {
        depositor: ctx.accounts.depositor.key(),
        target: DepositTarget::Emergency,
        amount,
        new_balance,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
